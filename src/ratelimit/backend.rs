//! Admission trait for abstracting over limiter implementations.

use async_trait::async_trait;

use super::atomic::AtomicRateLimiter;
use super::context::RequestContext;
use super::limiter::RateLimiter;
use crate::error::Result;

/// Trait for admission-control implementations.
///
/// This abstracts over both the read-modify-write `RateLimiter` and the
/// `AtomicRateLimiter` so a host application can hold either behind one
/// object and swap the counting strategy without touching call sites.
#[async_trait]
pub trait AdmissionControl: Send + Sync {
    /// Check whether this request may proceed.
    async fn admit(&self, ctx: &RequestContext) -> Result<()>;
}

#[async_trait]
impl AdmissionControl for RateLimiter {
    async fn admit(&self, ctx: &RequestContext) -> Result<()> {
        RateLimiter::admit(self, ctx).await
    }
}

#[async_trait]
impl AdmissionControl for AtomicRateLimiter {
    async fn admit(&self, ctx: &RequestContext) -> Result<()> {
        AtomicRateLimiter::admit(self, ctx).await
    }
}
