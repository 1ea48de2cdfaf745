//! Init command implementation
//!
//! Writes a starter `regulus.toml` listing the built-in content hosts.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use crate::config::DEFAULT_BASE_URLS;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "regulus.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Regulus configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your hosts and site URL", self.output);
                println!("  2. Validate configuration: regulus --config {} validate-config", self.output);
                println!("  3. Check the hosts: regulus --config {} health --all", self.output);
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate the starter configuration
    fn generate_config() -> String {
        let hosts = DEFAULT_BASE_URLS
            .iter()
            .map(|url| format!("    \"{url}\","))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"# Regulus Configuration File
# Any value may reference an environment variable as ${{VAR_NAME}}.
# Every key can also be overridden with REGULUS_<SECTION>_<KEY>.

[application]
# trace | debug | info | warn | error
log_level = "info"

[api]
# Tried in order. A host that fails is skipped until another host fails.
base_urls = [
{hosts}
]

# Seconds before a single attempt is abandoned and the next host is tried
timeout_seconds = 15
connect_timeout_seconds = 5

[site]
# Public website root, used for sitemap links
base_url = "https://www.regulus.example"

[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "/var/log/regulus"
# daily | hourly | never
local_rotation = "daily"
"#
        )
    }
}
