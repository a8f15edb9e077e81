//! Per-key counter record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The counter record tracked for one key within one window.
///
/// Records cross the quota-store boundary, so they serialize; a
/// network-backed store encodes them however it likes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Opaque descriptor of the client this record tracks. Informational
    /// only; never used in comparisons.
    pub identity: String,
    /// Start of the current window. Set once at creation and never updated
    /// on later hits.
    pub created_at: DateTime<Utc>,
    /// Remaining admitted requests in the current window.
    pub requests_left: u64,
}

impl Entry {
    /// Create a fresh record anchored at `created_at`.
    pub fn new(identity: impl Into<String>, created_at: DateTime<Utc>, requests_left: u64) -> Self {
        Self {
            identity: identity.into(),
            created_at,
            requests_left,
        }
    }

    /// Whether the quota for this window is used up.
    pub fn is_exhausted(&self) -> bool {
        self.requests_left == 0
    }

    /// Consume one request from the quota. Saturates at zero; the count is
    /// never persisted negative.
    pub fn consume(&mut self) {
        self.requests_left = self.requests_left.saturating_sub(1);
    }

    /// Time this record should remain stored: the refresh interval minus
    /// the whole seconds elapsed since the window started, clamped to zero.
    ///
    /// A zero result means the window has already rolled over; the store
    /// must treat the entry as absent on the next read.
    pub fn remaining_ttl(&self, refresh_interval: Duration, now: DateTime<Utc>) -> Duration {
        let elapsed = (now - self.created_at).num_seconds();
        let remaining = refresh_interval.as_secs() as i64 - elapsed;
        Duration::from_secs(remaining.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_consume_decrements() {
        let mut entry = Entry::new("::1", Utc::now(), 3);
        entry.consume();
        assert_eq!(entry.requests_left, 2);
        assert!(!entry.is_exhausted());
    }

    #[test]
    fn test_consume_saturates_at_zero() {
        let mut entry = Entry::new("::1", Utc::now(), 1);
        entry.consume();
        entry.consume();
        assert_eq!(entry.requests_left, 0);
        assert!(entry.is_exhausted());
    }

    #[test]
    fn test_consume_keeps_window_anchor() {
        let created_at = Utc::now();
        let mut entry = Entry::new("::1", created_at, 5);
        entry.consume();
        assert_eq!(entry.created_at, created_at);
    }

    #[test]
    fn test_remaining_ttl_shrinks_with_elapsed_time() {
        let now = Utc::now();
        let entry = Entry::new("::1", now - TimeDelta::seconds(40), 5);
        let ttl = entry.remaining_ttl(Duration::from_secs(60), now);
        assert_eq!(ttl, Duration::from_secs(20));
    }

    #[test]
    fn test_remaining_ttl_clamps_to_zero() {
        let now = Utc::now();
        let entry = Entry::new("::1", now - TimeDelta::seconds(90), 5);
        let ttl = entry.remaining_ttl(Duration::from_secs(60), now);
        assert_eq!(ttl, Duration::ZERO);
    }

    #[test]
    fn test_remaining_ttl_truncates_subsecond_elapsed() {
        let now = Utc::now();
        let entry = Entry::new("::1", now - TimeDelta::milliseconds(900), 5);
        let ttl = entry.remaining_ttl(Duration::from_secs(60), now);
        assert_eq!(ttl, Duration::from_secs(60));
    }
}
