// Regulus - Regulation content client and site tooling
// Copyright (c) 2025 Regulus Contributors
// Licensed under the MIT License

//! # Regulus
//!
//! Regulus is the data layer of a public regulation-search website. It talks
//! to a content API that is served by several interchangeable hosts and keeps
//! working while some of those hosts are down or slow.
//!
//! ## Overview
//!
//! This library provides:
//! - **Failover** across an ordered list of content hosts with a sticky cursor
//! - **Envelope handling** for `{ success, data, count, message }` responses
//! - **Typed endpoints** for institutions, documents, search, autocomplete,
//!   sitemap feeds and health
//! - **Sitemap generation** for the public site
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Record adapters and sitemap generation
//! - [`adapters`] - The content API client
//! - [`domain`] - Domain records, ids and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use regulus::adapters::content_api::{ContentApiClient, ContentSource};
//! use regulus::config::RegulusConfig;
//! use regulus::domain::SearchQuery;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RegulusConfig::default();
//!     let client = ContentApiClient::new(&config.api)?;
//!
//!     let results = client.search(&SearchQuery::new("capital adequacy")).await?;
//!     println!("{} matches", results.total_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Failure handling
//!
//! A failing host (network error, timeout, or non-2xx status) is skipped and
//! the next host is tried, at most once per host. A host that answers with
//! `success: false` is not a failing host: the server's message comes back
//! as [`domain::ApiError::Logical`] and no other host is contacted.
//!
//! ```rust,no_run
//! use regulus::adapters::content_api::{ContentApiClient, ContentSource};
//! use regulus::domain::{DocumentId, FailureKind};
//!
//! # async fn example(client: &ContentApiClient) -> Result<(), Box<dyn std::error::Error>> {
//! let id = DocumentId::new("4821")?;
//! match client.document(&id).await {
//!     Ok(regulation) => println!("{}", regulation.title),
//!     Err(e) => match e.as_api() {
//!         Some(api) if api.kind() != FailureKind::Logical => {
//!             eprintln!("{}", api.user_message())
//!         }
//!         _ => eprintln!("{e}"),
//!     },
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! Regulus logs with the `tracing` crate. Every failed attempt is logged at
//! `warn` with the host that failed.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
