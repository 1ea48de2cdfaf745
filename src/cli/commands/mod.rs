//! CLI command implementations
//!
//! Exit codes shared by every command:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 2 | Configuration error |
//! | 3 | Logical failure (server refused, not found, bad input) |
//! | 4 | Connectivity failure or timeout |
//! | 5 | Fatal error |

pub mod browse;
pub mod health;
pub mod init;
pub mod search;
pub mod sitemap;
pub mod validate;

use crate::adapters::content_api::ContentApiClient;
use crate::config::RegulusConfig;
use crate::domain::{FailureKind, RegulusError};
use serde::Serialize;

pub const EXIT_OK: i32 = 0;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_LOGICAL: i32 = 3;
pub const EXIT_UNAVAILABLE: i32 = 4;
pub const EXIT_FATAL: i32 = 5;

/// Map an error to the process exit code
pub fn exit_code_for(error: &RegulusError) -> i32 {
    match error {
        RegulusError::Configuration(_) => EXIT_CONFIG,
        RegulusError::Validation(_) => EXIT_LOGICAL,
        RegulusError::Api(api) => match api.kind() {
            FailureKind::Logical => EXIT_LOGICAL,
            FailureKind::Connectivity | FailureKind::Timeout => EXIT_UNAVAILABLE,
        },
        _ => EXIT_FATAL,
    }
}

/// Configuration loaded once by the binary, or the error that stopped it
pub type LoadedConfig<'a> = std::result::Result<&'a RegulusConfig, &'a RegulusError>;

/// Build a client from the loaded configuration, printing any failure
///
/// On failure the exit code to return is given back as the error.
pub(crate) fn connect(
    config: LoadedConfig<'_>,
) -> std::result::Result<(&RegulusConfig, ContentApiClient), i32> {
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ Failed to load configuration");
            eprintln!("   Error: {e}");
            return Err(EXIT_CONFIG);
        }
    };

    match ContentApiClient::new(&config.api) {
        Ok(client) => Ok((config, client)),
        Err(e) => {
            eprintln!("❌ Failed to create content API client");
            eprintln!("   Error: {e}");
            Err(exit_code_for(&e))
        }
    }
}

/// Print a failed operation and return its exit code
pub(crate) fn report_failure(action: &str, error: &RegulusError) -> i32 {
    tracing::error!(action, error = %error, "Command failed");

    eprintln!("❌ {action} failed");
    match error.as_api() {
        Some(api) => eprintln!("   {}", api.user_message()),
        None => eprintln!("   Error: {error}"),
    }
    exit_code_for(error)
}

/// Print a value as pretty JSON on stdout
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<i32> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(EXIT_OK)
}
