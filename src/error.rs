//! Error types for the Turnstile admission-control core.

use thiserror::Error;

/// Default message attached to a quota rejection when the caller does not
/// supply its own.
pub const DEFAULT_REJECTION: &str = "Slow down. You sent too many requests.";

/// Main error type for admission checks.
///
/// Every variant propagates synchronously to the caller of the check; none
/// are swallowed internally. The surrounding transport layer is responsible
/// for translating each kind into a response.
#[derive(Error, Debug)]
pub enum TurnstileError {
    /// The key maker could not derive a key because the request carries no
    /// determinable client identity. Raised before any store access.
    #[error("unable to determine client identity")]
    IdentityUnavailable,

    /// The quota for this key was already exhausted at check time.
    #[error("{reason}")]
    QuotaExceeded { reason: String },

    /// The quota store failed. Never interpreted as an allow or a deny.
    #[error("quota store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(String),
}

impl TurnstileError {
    /// A quota rejection carrying the default message.
    pub fn quota_exceeded() -> Self {
        Self::QuotaExceeded {
            reason: DEFAULT_REJECTION.to_string(),
        }
    }

    /// The conventional HTTP status for this error kind, for callers that
    /// map admission results onto transport responses.
    pub fn status_hint(&self) -> u16 {
        match self {
            Self::IdentityUnavailable => 403,
            Self::QuotaExceeded { .. } => 429,
            Self::Store(_) | Self::Config(_) => 500,
        }
    }
}

/// Errors raised by quota store implementations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record encoding/decoding errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend-specific failures
    #[error("{0}")]
    Backend(String),
}

/// Result type alias for Turnstile operations.
pub type Result<T> = std::result::Result<T, TurnstileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_hints() {
        assert_eq!(TurnstileError::IdentityUnavailable.status_hint(), 403);
        assert_eq!(TurnstileError::quota_exceeded().status_hint(), 429);
        let store = TurnstileError::Store(StoreError::Backend("down".to_string()));
        assert_eq!(store.status_hint(), 500);
    }

    #[test]
    fn test_default_rejection_message() {
        let err = TurnstileError::quota_exceeded();
        assert_eq!(err.to_string(), DEFAULT_REJECTION);
    }
}
