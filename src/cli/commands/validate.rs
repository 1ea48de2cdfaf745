//! Validate config command implementation
//!
//! Reports on the configuration exactly as the other commands received it
//! (file, `${VAR}` substitution, `REGULUS_*` overrides).

use super::{LoadedConfig, EXIT_CONFIG, EXIT_OK};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(
        &self,
        config_path: Option<&str>,
        config: LoadedConfig<'_>,
    ) -> anyhow::Result<i32> {
        let source = config_path.unwrap_or("<built-in defaults>");
        tracing::info!(config_path = %source, "Validating configuration");

        println!("🔍 Validating configuration: {source}");
        println!();

        let config = match config {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Content API hosts ({}):", config.api.base_urls.len());
        for (i, url) in config.api.base_urls.iter().enumerate() {
            println!("    {}. {url}", i + 1);
        }
        println!("  Request Timeout: {}s", config.api.timeout_seconds);
        println!("  Connect Timeout: {}s", config.api.connect_timeout_seconds);
        println!("  User Agent: {}", config.api.user_agent);
        println!("  Site Base URL: {}", config.site.base_url);
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        } else {
            println!("  File Logging: disabled");
        }
        println!();
        Ok(EXIT_OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_or_default;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_reports_missing_file() {
        let loaded = load_config_or_default(Some(Path::new("does-not-exist.toml")));
        let code = ValidateArgs {}
            .execute(Some("does-not-exist.toml"), loaded.as_ref())
            .await
            .unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }

    #[tokio::test]
    async fn test_validate_accepts_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[api]\nbase_urls = [\"https://one.example\"]\n")
            .unwrap();
        file.flush().unwrap();

        let path = file.path().to_string_lossy().to_string();
        let loaded = load_config_or_default(Some(file.path()));
        let code = ValidateArgs {}
            .execute(Some(path.as_str()), loaded.as_ref())
            .await
            .unwrap();
        assert_eq!(code, EXIT_OK);
    }
}
