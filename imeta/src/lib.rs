//! imeta library interface
//!
//! Two independent pieces:
//! - [`services::EnrichmentCache`]: issuer metadata lookups behind a global
//!   rate limiter, with stale-data fallback
//! - [`classifier::ResponseClassifier`]: ordered first-match normalization of
//!   payment outcome text into canonical tags

pub mod classifier;
pub mod config;
pub mod models;
pub mod services;

pub use classifier::{Classification, OutcomeTag, ResponseClassifier};
pub use config::{CliOverrides, EnrichmentSettings};
pub use models::IssuerRecord;
pub use services::{EnrichmentCache, RateLimiter, UpstreamClient, UpstreamError};
