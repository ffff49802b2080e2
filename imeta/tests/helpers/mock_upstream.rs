//! Scripted upstream client
//!
//! Records every fetch with its start instant (on the tokio clock, so paused
//! tests see virtual time) and answers from a per-call script.

use async_trait::async_trait;
use imeta::{UpstreamClient, UpstreamError};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

type Responder = Box<dyn Fn(&str) -> Result<Value, UpstreamError> + Send + Sync>;

pub struct ScriptedUpstream {
    script: Mutex<VecDeque<Result<Value, UpstreamError>>>,
    fallback: Responder,
    latency: Duration,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl ScriptedUpstream {
    /// Every call succeeds with a payload naming the key as the bank
    pub fn always_ok() -> Self {
        Self::with_fallback(|key| Ok(binlist_payload(key)))
    }

    /// Every call fails with `error`
    pub fn always_err(error: UpstreamError) -> Self {
        Self::with_fallback(move |_| Err(error.clone()))
    }

    pub fn with_fallback<F>(fallback: F) -> Self
    where
        F: Fn(&str) -> Result<Value, UpstreamError> + Send + Sync + 'static,
    {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Box::new(fallback),
            latency: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue responses consumed in call order before the fallback applies
    pub fn then(self, response: Result<Value, UpstreamError>) -> Self {
        self.script.lock().unwrap().push_back(response);
        self
    }

    /// Simulated network time per call
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call_starts(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }

    pub fn called_keys(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(k, _)| k.clone()).collect()
    }
}

#[async_trait]
impl UpstreamClient for ScriptedUpstream {
    async fn fetch(&self, key: &str) -> Result<Value, UpstreamError> {
        self.calls
            .lock()
            .unwrap()
            .push((key.to_string(), Instant::now()));

        let scripted = self.script.lock().unwrap().pop_front();
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        match scripted {
            Some(response) => response,
            None => (self.fallback)(key),
        }
    }
}

/// Realistic upstream payload; the bank name carries `tag` so tests can tell
/// records apart
pub fn binlist_payload(tag: &str) -> Value {
    json!({
        "number": {"length": 16, "luhn": true},
        "scheme": "visa",
        "type": "debit",
        "brand": "Visa/Dankort",
        "prepaid": false,
        "country": {
            "numeric": "208",
            "alpha2": "DK",
            "name": "Denmark",
            "emoji": "🇩🇰",
            "currency": "DKK",
            "latitude": 56,
            "longitude": 10
        },
        "bank": {"name": format!("bank {}", tag)}
    })
}
