//! Core admission-control algorithm.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, trace};

use super::context::RequestContext;
use super::entry::Entry;
use super::keymaker::KeyMaker;
use crate::config::QuotaConfig;
use crate::error::{Result, TurnstileError};
use crate::store::QuotaStore;

/// Per-call overrides for an admission check.
///
/// The defaults come from the limiter's constructor; a caller wrapping the
/// limiter in per-route middleware can swap any of them for a single check.
#[derive(Clone, Default)]
pub struct Overrides {
    config: Option<QuotaConfig>,
    key_maker: Option<Arc<dyn KeyMaker>>,
    rejection: Option<String>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this quota instead of the limiter's default.
    pub fn with_config(mut self, config: QuotaConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use this key maker instead of the limiter's default.
    pub fn with_key_maker(mut self, key_maker: Arc<dyn KeyMaker>) -> Self {
        self.key_maker = Some(key_maker);
        self
    }

    /// Replace the default "too many requests" message on rejection.
    pub fn with_rejection(mut self, reason: impl Into<String>) -> Self {
        self.rejection = Some(reason.into());
        self
    }
}

/// Fixed-window rate limiter over a TTL-keyed quota store.
///
/// Holds no counter state itself: every check is a fresh read from the
/// store, and window rollover happens implicitly when the store evicts a
/// record whose TTL has elapsed. The get/decrement/set sequence is not
/// atomic, so two concurrent checks for the same key can each consume the
/// same unit of quota; see [`AtomicRateLimiter`](super::AtomicRateLimiter)
/// for the variant without that race.
pub struct RateLimiter {
    store: Arc<dyn QuotaStore>,
    config: QuotaConfig,
    key_maker: Arc<dyn KeyMaker>,
}

impl RateLimiter {
    /// Create a limiter with its store, quota, and key strategy injected.
    pub fn new(store: Arc<dyn QuotaStore>, config: QuotaConfig, key_maker: Arc<dyn KeyMaker>) -> Self {
        Self {
            store,
            config,
            key_maker,
        }
    }

    /// Check whether this request may proceed.
    ///
    /// `Ok(())` admits the request. Errors distinguish a missing client
    /// identity, an exhausted quota, and a store failure; the store failure
    /// is never mapped to an allow or a deny.
    pub async fn admit(&self, ctx: &RequestContext) -> Result<()> {
        self.admit_with(ctx, &Overrides::default()).await
    }

    /// [`admit`](Self::admit) with per-call overrides.
    pub async fn admit_with(&self, ctx: &RequestContext, overrides: &Overrides) -> Result<()> {
        let config = overrides.config.unwrap_or(self.config);
        let key_maker = overrides.key_maker.as_ref().unwrap_or(&self.key_maker);

        let key = key_maker.make(ctx).await?;

        trace!(key = %key, "checking quota");

        let now = Utc::now();
        let mut entry = match self.store.get(&key).await? {
            Some(entry) => entry,
            None => {
                // First request for this key, or the previous window's
                // record was evicted by its TTL.
                let identity = ctx.hostname().unwrap_or(&key).to_string();
                debug!(key = %key, limit = config.limit, "creating quota record");
                Entry::new(identity, now, config.limit)
            }
        };

        if entry.is_exhausted() {
            // Left untouched: the TTL written on the last admission decides
            // when this key resets.
            debug!(key = %key, "quota exhausted");
            return Err(match &overrides.rejection {
                Some(reason) => TurnstileError::QuotaExceeded {
                    reason: reason.clone(),
                },
                None => TurnstileError::quota_exceeded(),
            });
        }

        entry.consume();

        let ttl = entry.remaining_ttl(config.refresh_interval(), now);
        self.store.set(&key, entry, ttl).await?;
        Ok(())
    }
}
