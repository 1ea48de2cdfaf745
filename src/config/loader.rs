//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RegulusConfig;
use crate::domain::errors::RegulusError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RegulusConfig
/// 4. Applies environment variable overrides (REGULUS_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use regulus::config::loader::load_config;
///
/// let config = load_config("regulus.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RegulusConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RegulusError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RegulusError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: RegulusConfig = toml::from_str(&contents)
        .map_err(|e| RegulusError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;
    finish(config)
}

/// Loads configuration from a file if given, otherwise from defaults
///
/// Without a file the built-in hosts are used, still subject to `REGULUS_*`
/// environment overrides.
pub fn load_config_or_default(path: Option<&Path>) -> Result<RegulusConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            let mut config = RegulusConfig::default();
            apply_env_overrides(&mut config)?;
            finish(config)
        }
    }
}

fn finish(config: RegulusConfig) -> Result<RegulusConfig> {
    config.validate().map_err(|e| {
        RegulusError::Configuration(format!("Configuration validation failed: {}", e))
    })?;
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| RegulusError::Other(format!("invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RegulusError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using REGULUS_* prefix
///
/// Environment variables follow the pattern: REGULUS_<SECTION>_<KEY>.
/// `REGULUS_API_BASE_URLS` is a comma-separated list.
fn apply_env_overrides(config: &mut RegulusConfig) -> Result<()> {
    if let Ok(val) = std::env::var("REGULUS_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("REGULUS_API_BASE_URLS") {
        config.api.base_urls = val
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if let Ok(val) = std::env::var("REGULUS_API_TIMEOUT_SECONDS") {
        config.api.timeout_seconds = val.trim().parse().map_err(|_| {
            RegulusError::Configuration(format!(
                "REGULUS_API_TIMEOUT_SECONDS must be a positive integer, got '{val}'"
            ))
        })?;
    }
    if let Ok(val) = std::env::var("REGULUS_API_CONNECT_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.trim().parse() {
            config.api.connect_timeout_seconds = secs;
        }
    }
    if let Ok(val) = std::env::var("REGULUS_API_USER_AGENT") {
        config.api.user_agent = val;
    }

    if let Ok(val) = std::env::var("REGULUS_SITE_BASE_URL") {
        config.site.base_url = val;
    }

    if let Ok(val) = std::env::var("REGULUS_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("REGULUS_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("REGULUS_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
