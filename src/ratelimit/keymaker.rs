//! Key derivation strategies.

use async_trait::async_trait;

use super::context::RequestContext;
use crate::error::{Result, TurnstileError};

/// Namespace prefix for keys written by the built-in strategy, so quota
/// records do not collide with unrelated keys in a shared store.
pub const KEY_NAMESPACE: &str = "ratelimit_";

/// Derives the string key a request's quota is tracked under.
///
/// Implementations are injected into the limiter at construction time.
/// Two strategies never collide unless they produce the same key.
#[async_trait]
pub trait KeyMaker: Send + Sync {
    /// Derive the key for this request, or fail with
    /// [`TurnstileError::IdentityUnavailable`] when the context carries no
    /// usable identity.
    async fn make(&self, ctx: &RequestContext) -> Result<String>;
}

/// Default strategy: one quota per resolved client hostname.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostnameKeyMaker;

impl HostnameKeyMaker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl KeyMaker for HostnameKeyMaker {
    async fn make(&self, ctx: &RequestContext) -> Result<String> {
        let hostname = ctx.hostname().ok_or(TurnstileError::IdentityUnavailable)?;
        Ok(format!("{KEY_NAMESPACE}{hostname}"))
    }
}
