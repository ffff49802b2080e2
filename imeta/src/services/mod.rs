//! Enrichment services
//!
//! - [`RateLimiter`]: global spacing between upstream calls
//! - [`UpstreamClient`] / [`HttpUpstreamClient`]: raw metadata source
//! - [`EnrichmentCache`]: fresh/stale cache in front of both

pub mod enrichment_cache;
pub mod rate_limiter;
pub mod upstream_client;

pub use enrichment_cache::{normalize_key, CacheStats, CachedRecord, EnrichmentCache};
pub use rate_limiter::RateLimiter;
pub use upstream_client::{HttpUpstreamClient, UpstreamClient, UpstreamError, DEFAULT_UPSTREAM_URL};
