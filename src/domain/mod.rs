//! Domain models and types for Regulus.
//!
//! The domain layer holds the presentation-friendly records produced from
//! raw API payloads, plus the error and result types shared by the crate.
//!
//! # Overview
//!
//! - **Identifiers** ([`DocumentId`], [`InstitutionSlug`])
//! - **Records** ([`Institution`], [`Regulation`], [`SearchResult`], [`Suggestion`])
//! - **Queries and pages** ([`SearchQuery`], [`DocumentFilter`], [`Page`])
//! - **Error types** ([`RegulusError`], [`ApiError`], [`FailureKind`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, RegulusError>`]. Content API
//! failures carry a [`FailureKind`] so callers can tell "offline" from "slow"
//! from "the server said no":
//!
//! ```rust
//! use regulus::domain::{ApiError, FailureKind};
//! use std::time::Duration;
//!
//! let err = ApiError::Timeout { attempts: 3, timeout: Duration::from_secs(15) };
//! assert_eq!(err.kind(), FailureKind::Timeout);
//! ```

pub mod errors;
pub mod feeds;
pub mod ids;
pub mod institution;
pub mod regulation;
pub mod result;
pub mod search;

// Re-export commonly used types for convenience
pub use errors::{ApiError, FailureKind, RegulusError};
pub use feeds::{FeedKind, HealthStatus, HostHealth, SitemapEntry};
pub use ids::{encode_path_segment, DocumentId, InstitutionSlug};
pub use institution::{Institution, InstitutionRef};
pub use regulation::{Regulation, RegulationStatus};
pub use result::Result;
pub use search::{
    DocumentFilter, DocumentPage, Page, SearchPage, SearchQuery, SearchResult, Suggestion,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
