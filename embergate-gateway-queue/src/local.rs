//! The default, in-process `IdentifyLimiter`.

use crate::limiter::IdentifyLimiter;
use async_trait::async_trait;
use leaky_bucket_lite::LeakyBucket;
use std::time::Duration;

/// Discord's default Identify bucket: one token, refilled every 5 seconds.
const DEFAULT_CAPACITY: u32 = 1;
const DEFAULT_REFILL_INTERVAL: Duration = Duration::from_secs(5);

/// Token bucket of capacity `r`, refilled one token every interval `t`.
/// Starts full; a token dripped in while the bucket is already full is
/// dropped rather than queued, matching §4.3's default-implementation
/// contract. Built on [`leaky_bucket_lite`], the same crate the gateway's
/// per-shard command rate limiter uses for an equivalent token-bucket
/// shape.
#[derive(Debug)]
pub struct LocalIdentifyLimiter {
    bucket: LeakyBucket,
}

impl LocalIdentifyLimiter {
    /// A bucket of capacity `capacity`, starting full, refilling one token
    /// every `refill_interval`.
    pub fn new(capacity: u32, refill_interval: Duration) -> Self {
        let bucket = LeakyBucket::builder()
            .max(capacity as usize)
            .tokens(capacity as usize)
            .refill_interval(refill_interval)
            .refill_amount(1)
            .build();

        Self { bucket }
    }
}

impl Default for LocalIdentifyLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_REFILL_INTERVAL)
    }
}

#[async_trait]
impl IdentifyLimiter for LocalIdentifyLimiter {
    async fn wait(&self) {
        self.bucket.acquire_one().await;
    }
}

#[cfg(test)]
mod tests {
    use super::LocalIdentifyLimiter;
    use crate::limiter::IdentifyLimiter;
    use static_assertions::assert_impl_all;
    use std::time::{Duration, Instant};

    assert_impl_all!(LocalIdentifyLimiter: Send, Sync);

    #[tokio::test]
    async fn starts_full_and_returns_immediately() {
        let limiter = LocalIdentifyLimiter::new(2, Duration::from_secs(60));

        let start = Instant::now();
        limiter.wait().await;
        limiter.wait().await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn blocks_once_exhausted() {
        let limiter = LocalIdentifyLimiter::new(1, Duration::from_millis(200));

        limiter.wait().await;

        let start = Instant::now();
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(150));
    }
}
