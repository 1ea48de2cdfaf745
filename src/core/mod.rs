//! Core logic for Regulus.
//!
//! # Modules
//!
//! - [`adapt`] - Raw API record → domain record conversion
//! - [`sitemap`] - Sitemap XML generation from the sitemap feeds
//!
//! # Example
//!
//! ```rust,no_run
//! use regulus::adapters::content_api::ContentApiClient;
//! use regulus::core::sitemap::SitemapBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ContentApiClient::with_base_urls(["https://api.regulus.example"])?;
//! let xml = SitemapBuilder::new("https://www.regulus.example")
//!     .build(&client)
//!     .await?;
//! std::fs::write("sitemap.xml", xml)?;
//! # Ok(())
//! # }
//! ```

pub mod adapt;
pub mod sitemap;
