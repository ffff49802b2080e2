//! Enrichment cache with stale-data fallback
//!
//! Maps a key to the last successfully fetched [`IssuerRecord`]. Fresh entries
//! are served without touching upstream. Misses and stale entries go through
//! the shared [`RateLimiter`] and then the [`UpstreamClient`]. When upstream
//! is unavailable the last known record is returned, or the all-default
//! record if there is none.
//!
//! Concurrent misses for the same key are not coalesced: each one passes the
//! limiter and fetches, and the last write wins.

use crate::config::EnrichmentSettings;
use crate::models::IssuerRecord;
use crate::services::rate_limiter::RateLimiter;
use crate::services::upstream_client::{HttpUpstreamClient, UpstreamClient, UpstreamError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: IssuerRecord,
    fetched_at: Instant,
    fetched_at_utc: DateTime<Utc>,
}

/// Snapshot of a cached entry returned by [`EnrichmentCache::peek`]
#[derive(Debug, Clone, Serialize)]
pub struct CachedRecord {
    pub value: IssuerRecord,
    pub fetched_at: DateTime<Utc>,
    #[serde(skip)]
    pub age: Duration,
    pub fresh: bool,
}

/// Cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub upstream_calls: u64,
    pub stale_fallbacks: u64,
    pub default_fallbacks: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    upstream_calls: AtomicU64,
    stale_fallbacks: AtomicU64,
    default_fallbacks: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            upstream_calls: self.upstream_calls.load(Ordering::Relaxed),
            stale_fallbacks: self.stale_fallbacks.load(Ordering::Relaxed),
            default_fallbacks: self.default_fallbacks.load(Ordering::Relaxed),
        }
    }
}

/// Enrichment cache
///
/// Construct once per process and share via `Arc`.
pub struct EnrichmentCache {
    client: Arc<dyn UpstreamClient>,
    limiter: Arc<RateLimiter>,
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    max_entries: Option<usize>,
    counters: Counters,
}

impl EnrichmentCache {
    pub fn new(client: Arc<dyn UpstreamClient>, limiter: Arc<RateLimiter>, ttl: Duration) -> Self {
        Self {
            client,
            limiter,
            entries: RwLock::new(HashMap::new()),
            ttl,
            max_entries: None,
            counters: Counters::default(),
        }
    }

    /// Cap the number of cached entries; the oldest fetch is evicted first.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    /// Build the cache, limiter and HTTP client from resolved settings
    pub fn from_settings(settings: &EnrichmentSettings) -> Result<Self, UpstreamError> {
        let client = HttpUpstreamClient::new(
            settings.upstream_url.clone(),
            &imeta_common::config::get_user_agent(),
            settings.upstream_timeout,
        )?;
        let limiter = Arc::new(RateLimiter::new(settings.min_interval));

        let cache = Self::new(Arc::new(client), limiter, settings.cache_ttl);
        Ok(match settings.cache_max_entries {
            Some(max) => cache.with_max_entries(max),
            None => cache,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Look up issuer metadata for `key`.
    ///
    /// Never fails: every failure path resolves to a stale or default record.
    pub async fn lookup(&self, key: &str) -> IssuerRecord {
        let key = normalize_key(key);
        if key.is_empty() {
            tracing::warn!("Empty lookup key, returning default record");
            Counters::bump(&self.counters.default_fallbacks);
            return IssuerRecord::default();
        }

        if let Some(value) = self.fresh_value(&key).await {
            tracing::debug!(key = %key, "Cache hit");
            Counters::bump(&self.counters.hits);
            return value;
        }
        Counters::bump(&self.counters.misses);

        self.limiter.acquire().await;
        Counters::bump(&self.counters.upstream_calls);

        match self.client.fetch(&key).await.and_then(require_object) {
            Ok(payload) => {
                let record = IssuerRecord::from_payload(&payload);
                tracing::info!(
                    key = %key,
                    scheme = %record.scheme,
                    bank = %record.bank,
                    country = %record.country_alpha2,
                    "Fetched issuer metadata"
                );
                self.store(key, record.clone()).await;
                record
            }
            Err(e) if e.allows_stale_fallback() => self.fallback(&key, &e).await,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Upstream rejected lookup");
                Counters::bump(&self.counters.default_fallbacks);
                IssuerRecord::default()
            }
        }
    }

    /// Look up several keys concurrently; all fetches share the one limiter.
    pub async fn lookup_many(&self, keys: &[String]) -> Vec<(String, IssuerRecord)> {
        let lookups = keys.iter().map(|key| async move {
            let record = self.lookup(key).await;
            (key.clone(), record)
        });
        futures::future::join_all(lookups).await
    }

    /// Inspect the cached entry for `key` without contacting upstream
    pub async fn peek(&self, key: &str) -> Option<CachedRecord> {
        let key = normalize_key(key);
        let entries = self.entries.read().await;
        entries.get(&key).map(|entry| {
            let age = entry.fetched_at.elapsed();
            CachedRecord {
                value: entry.value.clone(),
                fetched_at: entry.fetched_at_utc,
                age,
                fresh: age < self.ttl,
            }
        })
    }

    async fn fresh_value(&self, key: &str) -> Option<IssuerRecord> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    async fn fallback(&self, key: &str, error: &UpstreamError) -> IssuerRecord {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) => {
                tracing::warn!(
                    key = %key,
                    error = %error,
                    age = %imeta_common::human_time::format_duration(entry.fetched_at.elapsed()),
                    "Upstream unavailable, serving stale record"
                );
                Counters::bump(&self.counters.stale_fallbacks);
                entry.value.clone()
            }
            None => {
                tracing::warn!(
                    key = %key,
                    error = %error,
                    "Upstream unavailable and nothing cached, returning default record"
                );
                Counters::bump(&self.counters.default_fallbacks);
                IssuerRecord::default()
            }
        }
    }

    async fn store(&self, key: String, value: IssuerRecord) {
        let mut entries = self.entries.write().await;

        if let Some(max) = self.max_entries {
            if !entries.contains_key(&key) && entries.len() >= max {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.fetched_at)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    tracing::debug!(evicted = %oldest, "Cache full, evicting oldest entry");
                    entries.remove(&oldest);
                }
            }
        }

        entries.insert(
            key,
            CacheEntry {
                value,
                fetched_at: Instant::now(),
                fetched_at_utc: Utc::now(),
            },
        );
    }
}

/// A usable payload is a JSON object; anything else is a malformed response
fn require_object(payload: Value) -> Result<Value, UpstreamError> {
    if payload.is_object() {
        Ok(payload)
    } else {
        Err(UpstreamError::Parse(format!(
            "expected a JSON object, got {}",
            json_kind(&payload)
        )))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Strip whitespace and dash separators (`"4571 7360"` → `"45717360"`)
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key(" 4571 7360 "), "45717360");
        assert_eq!(normalize_key("4571-73"), "457173");
        assert_eq!(normalize_key("   "), "");
    }

    #[test]
    fn test_require_object() {
        assert!(require_object(serde_json::json!({})).is_ok());
        for payload in [
            Value::Null,
            serde_json::json!([]),
            serde_json::json!("text"),
            serde_json::json!(16),
        ] {
            assert!(matches!(require_object(payload), Err(UpstreamError::Parse(_))));
        }
    }

    #[test]
    fn test_stats_snapshot_starts_at_zero() {
        let counters = Counters::default();
        assert_eq!(counters.snapshot(), CacheStats::default());
        Counters::bump(&counters.hits);
        assert_eq!(counters.snapshot().hits, 1);
    }
}
