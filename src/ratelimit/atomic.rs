//! Race-free limiter variant over stores with atomic counting.

use std::sync::Arc;
use tracing::{debug, trace};

use super::context::RequestContext;
use super::keymaker::KeyMaker;
use crate::config::QuotaConfig;
use crate::error::{Result, TurnstileError};
use crate::store::AtomicQuotaStore;

/// Fixed-window limiter that counts through
/// [`AtomicQuotaStore::try_acquire`] instead of a read-modify-write.
///
/// Same quota semantics as [`RateLimiter`](super::RateLimiter), but two
/// concurrent checks for one key can no longer both consume the same unit.
/// Requires a store with a conditional-decrement primitive.
pub struct AtomicRateLimiter {
    store: Arc<dyn AtomicQuotaStore>,
    config: QuotaConfig,
    key_maker: Arc<dyn KeyMaker>,
}

impl AtomicRateLimiter {
    pub fn new(
        store: Arc<dyn AtomicQuotaStore>,
        config: QuotaConfig,
        key_maker: Arc<dyn KeyMaker>,
    ) -> Self {
        Self {
            store,
            config,
            key_maker,
        }
    }

    /// Check whether this request may proceed.
    pub async fn admit(&self, ctx: &RequestContext) -> Result<()> {
        let key = self.key_maker.make(ctx).await?;

        trace!(key = %key, "checking quota");

        let identity = ctx.hostname().unwrap_or(&key).to_string();
        let admitted = self
            .store
            .try_acquire(
                &key,
                &identity,
                self.config.limit,
                self.config.refresh_interval(),
            )
            .await?;

        match admitted {
            Some(remaining) => {
                trace!(key = %key, remaining, "request admitted");
                Ok(())
            }
            None => {
                debug!(key = %key, "quota exhausted");
                Err(TurnstileError::quota_exceeded())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Interval;
    use crate::ratelimit::keymaker::HostnameKeyMaker;
    use crate::store::MemoryStore;
    use std::time::Duration;
    use tokio::time::advance;
    use tokio_test::assert_ok;

    fn limiter(store: Arc<MemoryStore>, limit: u64) -> AtomicRateLimiter {
        AtomicRateLimiter::new(
            store,
            QuotaConfig::new(limit, Interval::Second),
            Arc::new(HostnameKeyMaker::new()),
        )
    }

    #[tokio::test]
    async fn test_admits_up_to_limit_then_rejects() {
        let store = Arc::new(MemoryStore::new());
        let limiter = limiter(store, 5);
        let ctx = RequestContext::from_hostname("::1");

        for _ in 0..5 {
            assert_ok!(limiter.admit(&ctx).await);
        }

        let err = limiter.admit(&ctx).await.unwrap_err();
        assert!(matches!(err, TurnstileError::QuotaExceeded { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_quota_refreshes_after_window() {
        let store = Arc::new(MemoryStore::new());
        let limiter = limiter(store, 2);
        let ctx = RequestContext::from_hostname("::1");

        assert_ok!(limiter.admit(&ctx).await);
        assert_ok!(limiter.admit(&ctx).await);
        assert!(limiter.admit(&ctx).await.is_err());

        advance(Duration::from_secs(1)).await;

        assert_ok!(limiter.admit(&ctx).await);
    }

    #[tokio::test]
    async fn test_missing_identity_is_surfaced_before_store_access() {
        let store = Arc::new(MemoryStore::new());
        let limiter = limiter(store.clone(), 5);

        let err = limiter.admit(&RequestContext::new()).await.unwrap_err();
        assert!(matches!(err, TurnstileError::IdentityUnavailable));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_checks_never_overadmit() {
        let store = Arc::new(MemoryStore::new());
        let limiter = Arc::new(limiter(store, 10));

        let mut tasks = Vec::new();
        for _ in 0..25 {
            let limiter = Arc::clone(&limiter);
            tasks.push(tokio::spawn(async move {
                limiter.admit(&RequestContext::from_hostname("::1")).await
            }));
        }

        let mut admitted = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 10);
    }
}
