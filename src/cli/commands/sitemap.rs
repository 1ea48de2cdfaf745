//! Sitemap command implementation

use super::{connect, report_failure, LoadedConfig, EXIT_FATAL, EXIT_OK};
use crate::core::sitemap::SitemapBuilder;
use clap::Args;
use std::fs;

/// Arguments for the sitemap command
#[derive(Args, Debug)]
pub struct SitemapArgs {
    /// Write the sitemap to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override the public site base URL from configuration
    #[arg(long)]
    pub base_url: Option<String>,
}

impl SitemapArgs {
    /// Execute the sitemap command
    pub async fn execute(&self, config: LoadedConfig<'_>) -> anyhow::Result<i32> {
        let (config, client) = match connect(config) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let base_url = self.base_url.as_deref().unwrap_or(&config.site.base_url);
        let builder = SitemapBuilder::new(base_url);

        let xml = match builder.build(&client).await {
            Ok(xml) => xml,
            Err(e) => return Ok(report_failure("Sitemap generation", &e)),
        };

        match self.output {
            Some(ref path) => match fs::write(path, &xml) {
                Ok(_) => {
                    tracing::info!(path = %path, bytes = xml.len(), "Sitemap written");
                    eprintln!("✅ Sitemap written to {path}");
                    Ok(EXIT_OK)
                }
                Err(e) => {
                    eprintln!("❌ Failed to write sitemap");
                    eprintln!("   Error: {e}");
                    Ok(EXIT_FATAL)
                }
            },
            None => {
                print!("{xml}");
                Ok(EXIT_OK)
            }
        }
    }
}
