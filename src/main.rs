// Regulus - Regulation content client and site tooling
// Copyright (c) 2025 Regulus Contributors
// Licensed under the MIT License

use clap::Parser;
use regulus::cli::commands::{LoadedConfig, EXIT_FATAL};
use regulus::cli::{Cli, Commands};
use regulus::config::{load_config_or_default, LoggingConfig};
use regulus::log_error_with_context;
use regulus::logging::init_logging;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Loaded once for the whole run. A broken file is reported by the
    // command itself, logging falls back to defaults meanwhile.
    let loaded = load_config_or_default(cli.config.as_deref().map(Path::new));
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| {
            loaded
                .as_ref()
                .ok()
                .map(|c| c.application.log_level.clone())
        })
        .unwrap_or_else(|| "info".to_string());
    let default_logging = LoggingConfig::default();
    let logging_config = loaded
        .as_ref()
        .map(|c| &c.logging)
        .unwrap_or(&default_logging);

    let _guard = match init_logging(&log_level, logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            // Fall back to console-only logging
            match init_logging("info", &LoggingConfig::default()) {
                Ok(guard) => guard,
                Err(_) => process::exit(EXIT_FATAL),
            }
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Regulus starting");

    let exit_code = match execute_command(&cli, loaded.as_ref()).await {
        Ok(code) => code,
        Err(e) => {
            log_error_with_context!(&e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, config: LoadedConfig<'_>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Institutions(args) => args.execute(config).await,
        Commands::Documents(args) => args.execute(config).await,
        Commands::Document(args) => args.execute(config).await,
        Commands::Search(args) => args.execute(config).await,
        Commands::Suggest(args) => args.execute(config).await,
        Commands::Health(args) => args.execute(config).await,
        Commands::Sitemap(args) => args.execute(config).await,
        Commands::ValidateConfig(args) => args.execute(cli.config.as_deref(), config).await,
        Commands::Init(args) => args.execute().await,
    }
}
