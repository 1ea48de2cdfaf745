//! Logging and observability
//!
//! Structured logging built on `tracing`:
//! - Human-readable console output
//! - Configurable log levels, overridable through `RUST_LOG`
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use regulus::logging::init_logging;
//! use regulus::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! tracing::warn!(base_url = "https://api.regulus.example", "Server unreachable");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use regulus::log_error_with_context;
/// use regulus::domain::RegulusError;
///
/// let error = RegulusError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log the outcome of a host probe
///
/// # Example
///
/// ```no_run
/// use regulus::log_host_probe;
///
/// log_host_probe!("https://api.regulus.example", true, 42u128);
/// ```
#[macro_export]
macro_rules! log_host_probe {
    ($base_url:expr, $healthy:expr, $latency_ms:expr) => {
        tracing::debug!(
            base_url = %$base_url,
            healthy = $healthy,
            latency_ms = $latency_ms as u64,
            "Probed content host"
        );
    };
}
