//! Content API adapter
//!
//! Integration with the regulation content REST API: the failover transport,
//! the wire models, and the typed [`ContentSource`] operations built on them.

pub mod client;
pub mod models;
pub mod source;

pub use client::{ContentApiClient, Enveloped, RawResponse, RequestOptions};
pub use models::Envelope;
pub use source::{ContentSource, DEFAULT_SUGGESTION_LIMIT};
