//! Configuration schema types
//!
//! Every section has defaults, so an empty file (or no file at all) yields a
//! working configuration pointed at the built-in content API hosts.

use serde::{Deserialize, Serialize};

/// Built-in content API hosts, in failover order
pub const DEFAULT_BASE_URLS: [&str; 3] = [
    "https://api.regulus.example",
    "https://api-eu.regulus.example",
    "https://api-staging.regulus.example",
];

/// Main Regulus configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegulusConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Content API client settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Public site settings
    #[serde(default)]
    pub site: SiteConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RegulusConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate()?;
        self.site.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Content API client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Candidate base URLs in failover order
    #[serde(default = "default_base_urls")]
    pub base_urls: Vec<String>,

    /// Per-attempt timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ApiConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_urls.is_empty() {
            return Err("api.base_urls cannot be empty".to_string());
        }

        for (i, url) in self.base_urls.iter().enumerate() {
            let trimmed = url.trim().trim_end_matches('/');
            if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
                return Err(format!(
                    "api.base_urls[{i}] must start with http:// or https://, got '{url}'"
                ));
            }
            url::Url::parse(trimmed)
                .map_err(|e| format!("api.base_urls[{i}] is not a valid URL: {e}"))?;

            let duplicate = self.base_urls[..i]
                .iter()
                .any(|other| other.trim().trim_end_matches('/') == trimmed);
            if duplicate {
                return Err(format!("api.base_urls contains '{trimmed}' more than once"));
            }
        }

        if !(1..=300).contains(&self.timeout_seconds) {
            return Err(format!(
                "api.timeout_seconds must be between 1 and 300, got {}",
                self.timeout_seconds
            ));
        }

        if self.connect_timeout_seconds == 0 || self.connect_timeout_seconds > self.timeout_seconds
        {
            return Err(format!(
                "api.connect_timeout_seconds must be between 1 and timeout_seconds ({}), got {}",
                self.timeout_seconds, self.connect_timeout_seconds
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err("api.user_agent cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_urls: default_base_urls(),
            timeout_seconds: default_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

/// Public site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the public website, used for sitemap links
    #[serde(default = "default_site_base_url")]
    pub base_url: String,
}

impl SiteConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("site.base_url must start with http:// or https://".to_string());
        }
        Ok(())
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_site_base_url(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to rolling files
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_urls() -> Vec<String> {
    DEFAULT_BASE_URLS.iter().map(|u| u.to_string()).collect()
}

fn default_timeout_seconds() -> u64 {
    15
}

fn default_connect_timeout_seconds() -> u64 {
    5
}

fn default_user_agent() -> String {
    format!("regulus/{}", env!("CARGO_PKG_VERSION"))
}

fn default_site_base_url() -> String {
    "https://www.regulus.example".to_string()
}

fn default_local_path() -> String {
    "/var/log/regulus".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
