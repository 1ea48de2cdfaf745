//! External system integrations for Regulus.
//!
//! - [`content_api`] - the regulation content REST API, reached through a
//!   failover client over a fixed list of interchangeable hosts
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies. Everything above this layer talks
//! to the [`content_api::ContentSource`] trait, so tests can swap in an
//! in-memory source.
//!
//! ```rust,no_run
//! use regulus::adapters::content_api::{ContentApiClient, ContentSource};
//! use regulus::domain::SearchQuery;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ContentApiClient::with_base_urls([
//!     "https://api.regulus.example",
//!     "https://api-fallback.regulus.example",
//! ])?;
//!
//! let page = client.search(&SearchQuery::new("banking").limit(10)).await?;
//! println!("{} of {} results", page.items.len(), page.total_count);
//! # Ok(())
//! # }
//! ```

pub mod content_api;
