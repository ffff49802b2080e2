//! Global spacing limiter for upstream calls
//!
//! One instance guards every call to the upstream service, regardless of key
//! or caller. The read-wait-write sequence runs while holding a single async
//! mutex, so concurrent callers queue behind it and call starts are never
//! closer together than `min_interval`.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Rate limiter enforcing a minimum interval between call starts
#[derive(Debug)]
pub struct RateLimiter {
    last_call: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_call: Mutex::new(None),
            min_interval,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until the next upstream call may start, then record its start.
    ///
    /// The lock is held across the sleep.
    pub async fn acquire(&self) {
        let mut last = self.last_call.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_rate_limiter_creation() {
        let limiter = RateLimiter::new(Duration::from_secs(5));
        assert_eq!(limiter.min_interval(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_acquire_is_immediate() {
        let limiter = RateLimiter::new(Duration::from_secs(5));

        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_acquires_are_spaced() {
        let limiter = RateLimiter::new(Duration::from_secs(5));

        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;

        assert!(start.elapsed() >= Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_after_interval_passed() {
        let limiter = RateLimiter::new(Duration::from_secs(5));
        limiter.acquire().await;

        tokio::time::advance(Duration::from_secs(6)).await;

        let before = Instant::now();
        limiter.acquire().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_acquires_serialize() {
        let limiter = Arc::new(RateLimiter::new(Duration::from_secs(5)));
        let starts = Arc::new(Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let limiter = Arc::clone(&limiter);
            let starts = Arc::clone(&starts);
            handles.push(tokio::spawn(async move {
                limiter.acquire().await;
                starts.lock().await.push(Instant::now());
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let mut starts = starts.lock().await.clone();
        starts.sort();
        assert_eq!(starts.len(), 4);
        for pair in starts.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_secs(5));
        }
    }
}
