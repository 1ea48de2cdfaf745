//! Health command implementation
//!
//! Without `--all`, asks the backend through the normal failover path.
//! With `--all`, probes every configured host directly.

use super::{connect, print_json, report_failure, LoadedConfig, EXIT_OK, EXIT_UNAVAILABLE};
use crate::adapters::content_api::ContentSource;
use clap::Args;

/// Arguments for the health command
#[derive(Args, Debug)]
pub struct HealthArgs {
    /// Probe every configured host instead of the first reachable one
    #[arg(long)]
    pub all: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl HealthArgs {
    /// Execute the health command
    pub async fn execute(&self, config: LoadedConfig<'_>) -> anyhow::Result<i32> {
        let (_, client) = match connect(config) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        if self.all {
            let report = client.probe_hosts().await;
            let any_healthy = report.iter().any(|h| h.healthy);
            let code = if any_healthy { EXIT_OK } else { EXIT_UNAVAILABLE };

            if self.json {
                print_json(&report)?;
                return Ok(code);
            }

            println!("🩺 Content hosts");
            println!();
            for host in &report {
                let marker = if host.healthy { "✅" } else { "❌" };
                print!("  {marker} {} ({} ms)", host.base_url, host.latency_ms);
                if let Some(ref version) = host.version {
                    print!(" v{version}");
                }
                println!();
                if let Some(ref error) = host.error {
                    println!("     {error}");
                }
            }
            println!();
            return Ok(code);
        }

        let status = match client.health().await {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Health check", &e)),
        };
        let code = if status.is_ok() { EXIT_OK } else { EXIT_UNAVAILABLE };

        if self.json {
            print_json(&status)?;
            return Ok(code);
        }

        let marker = if status.is_ok() { "✅" } else { "⚠️ " };
        println!("{marker} Backend status: {}", status.status);
        if let Some(ref version) = status.version {
            println!("   Version: {version}");
        }
        println!("   Served by: {}", client.current_base_url());
        Ok(code)
    }
}
