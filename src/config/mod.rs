//! Configuration management for Regulus.
//!
//! TOML configuration with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `REGULUS_<SECTION>_<KEY>` environment overrides
//! - Defaults for every setting, including the built-in content API hosts
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use regulus::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("regulus.toml")?;
//! println!("Hosts: {:?}", config.api.base_urls);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [api]
//! base_urls = ["https://api.regulus.example", "https://api-eu.regulus.example"]
//! timeout_seconds = 15
//!
//! [site]
//! base_url = "https://www.regulus.example"
//!
//! [logging]
//! local_enabled = false
//! ```
//!
//! # Sections
//!
//! - [`ApplicationConfig`] - log level
//! - [`ApiConfig`] - candidate hosts, timeouts, user agent
//! - [`SiteConfig`] - public site base URL
//! - [`LoggingConfig`] - file logging

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApiConfig, ApplicationConfig, LoggingConfig, RegulusConfig, SiteConfig, DEFAULT_BASE_URLS,
};
