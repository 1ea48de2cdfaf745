//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Regulus using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Regulus - regulation content browser and site tooling
#[derive(Parser, Debug)]
#[command(name = "regulus")]
#[command(version, about, long_about = None)]
#[command(author = "Regulus Contributors")]
pub struct Cli {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long, env = "REGULUS_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "REGULUS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List institutions, or show one with --slug
    Institutions(commands::browse::InstitutionsArgs),

    /// List documents page by page
    Documents(commands::browse::DocumentsArgs),

    /// Show a single document
    Document(commands::browse::DocumentArgs),

    /// Full-text search
    Search(commands::search::SearchArgs),

    /// Autocomplete suggestions for partial search text
    Suggest(commands::search::SuggestArgs),

    /// Check backend health
    Health(commands::health::HealthArgs),

    /// Generate sitemap.xml for the public site
    Sitemap(commands::sitemap::SitemapArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
