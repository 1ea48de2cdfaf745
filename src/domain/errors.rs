//! Domain error types
//!
//! This module defines the error hierarchy for Regulus. Errors never expose
//! the HTTP client's types; transport failures are captured as strings at the
//! point where they are classified.

use std::time::Duration;
use thiserror::Error;

/// Main Regulus error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum RegulusError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Content API errors
    #[error("Content API error: {0}")]
    Api(#[from] ApiError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl RegulusError {
    /// Returns the underlying API error, if this is one
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            RegulusError::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// Broad origin of a content API failure
///
/// Callers use this to pick what to show: "offline", "slow", or the
/// server-provided message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No candidate host could be reached
    Connectivity,
    /// Hosts were reachable but did not answer within the timeout
    Timeout,
    /// A host answered, but the operation itself failed
    Logical,
}

/// Content API errors
///
/// The first three variants are produced only after every candidate host has
/// been tried once. The remaining variants come from a single reachable host
/// and never trigger failover.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Every candidate failed and the last failure was a transport error
    #[error("Unable to reach any content server after {attempts} attempt(s): {last_error}")]
    Connectivity { attempts: usize, last_error: String },

    /// Every candidate failed and the last failure was a timeout
    #[error("Content servers did not respond within {timeout:?} after {attempts} attempt(s)")]
    Timeout { attempts: usize, timeout: Duration },

    /// Every candidate failed and the last failure was an HTTP status
    #[error("All content servers are unavailable (last status {last_status})")]
    AllServersUnavailable { attempts: usize, last_status: u16 },

    /// Envelope reported `success: false`
    #[error("{0}")]
    Logical(String),

    /// Body could not be decoded as the expected envelope
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// The requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ApiError {
    /// Classifies the error by origin
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Connectivity { .. } | ApiError::AllServersUnavailable { .. } => {
                FailureKind::Connectivity
            }
            ApiError::Timeout { .. } => FailureKind::Timeout,
            ApiError::Logical(_) | ApiError::InvalidResponse(_) | ApiError::NotFound(_) => {
                FailureKind::Logical
            }
        }
    }

    /// Text suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self.kind() {
            FailureKind::Connectivity => {
                "Our servers are currently unavailable. Please try again later.".to_string()
            }
            FailureKind::Timeout => {
                "Our servers are responding slowly. Please try again in a moment.".to_string()
            }
            FailureKind::Logical => match self {
                ApiError::Logical(msg) if !msg.trim().is_empty() => msg.clone(),
                ApiError::NotFound(what) => format!("{what} could not be found."),
                _ => "The request could not be completed.".to_string(),
            },
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for RegulusError {
    fn from(err: std::io::Error) -> Self {
        RegulusError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RegulusError {
    fn from(err: serde_json::Error) -> Self {
        RegulusError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RegulusError {
    fn from(err: toml::de::Error) -> Self {
        RegulusError::Configuration(format!("TOML parse error: {err}"))
    }
}
