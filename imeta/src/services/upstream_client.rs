//! Upstream issuer-metadata client
//!
//! The cache talks to upstream through the [`UpstreamClient`] trait. The HTTP
//! implementation targets a binlist-style endpoint (`GET {base_url}/{key}`,
//! JSON body) and enforces its own request timeout. The key is sent as one
//! percent-encoded path segment.

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Default upstream base URL
pub const DEFAULT_UPSTREAM_URL: &str = "https://lookup.binlist.net";

/// Upstream client errors
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// Upstream asked us to slow down (HTTP 429)
    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    /// Body was not valid JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Any other non-success status
    #[error("API error {0}: {1}")]
    Api(u16, String),
}

impl UpstreamError {
    /// True for failures where a stale cached record is an acceptable answer
    pub fn allows_stale_fallback(&self) -> bool {
        !matches!(self, UpstreamError::Api(..))
    }
}

/// Source of raw issuer metadata payloads
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Fetch the raw payload for `key`
    async fn fetch(&self, key: &str) -> Result<Value, UpstreamError>;
}

/// HTTP upstream client
pub struct HttpUpstreamClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl HttpUpstreamClient {
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let raw = base_url.into();
        let base_url = Url::parse(raw.trim_end_matches('/'))
            .map_err(|e| UpstreamError::Network(format!("invalid upstream URL '{}': {}", raw, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::Network(format!(
                "upstream URL '{}' cannot take a path",
                raw
            )));
        }

        let http_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `key` as a single path segment (`#`, `?` and `/` are escaped)
    fn url_for(&self, key: &str) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new(), so segments are always available
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(key);
        }
        url
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn fetch(&self, key: &str) -> Result<Value, UpstreamError> {
        let url = self.url_for(key);
        tracing::debug!(key = %key, url = %url, "Querying upstream");

        let response = self
            .http_client
            .get(url)
            .header("Accept-Version", "3")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::Timeout
                } else {
                    UpstreamError::Network(e.to_string())
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(UpstreamError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Api(status.as_u16(), error_text));
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout
            } else {
                UpstreamError::Parse(e.to_string())
            }
        })
    }
}
