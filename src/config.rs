//! Quota configuration for the admission-control core.
//!
//! Configuration is resolved once at startup and handed to the limiter by
//! value; nothing in this crate reads it from a global registry.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Time window on which a quota refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// Per-second quota
    Second,
    /// Per-minute quota
    Minute,
    /// Per-hour quota
    Hour,
    /// Per-day quota
    Day,
}

impl Interval {
    /// Get the duration of this window.
    pub fn duration(&self) -> Duration {
        match self {
            Interval::Second => Duration::from_secs(1),
            Interval::Minute => Duration::from_secs(60),
            Interval::Hour => Duration::from_secs(3600),
            Interval::Day => Duration::from_secs(86400),
        }
    }
}

/// Quota applied to each tracked key.
///
/// A `limit` of zero is legal and rejects every request for the configured
/// window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Maximum requests admitted per window
    pub limit: u64,
    /// Window on which the quota refreshes
    pub interval: Interval,
}

impl QuotaConfig {
    /// Create a quota of `limit` requests per `interval`.
    pub fn new(limit: u64, interval: Interval) -> Self {
        Self { limit, interval }
    }

    /// Duration of the refresh window.
    pub fn refresh_interval(&self) -> Duration {
        self.interval.duration()
    }

    /// Load a quota configuration from a YAML file.
    pub fn from_file(path: &str) -> crate::error::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| crate::error::TurnstileError::Config(e.to_string()))?;
        let config: QuotaConfig = serde_yaml::from_str(&contents)
            .map_err(|e| crate::error::TurnstileError::Config(e.to_string()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_duration() {
        assert_eq!(Interval::Second.duration(), Duration::from_secs(1));
        assert_eq!(Interval::Minute.duration(), Duration::from_secs(60));
        assert_eq!(Interval::Hour.duration(), Duration::from_secs(3600));
        assert_eq!(Interval::Day.duration(), Duration::from_secs(86400));
    }

    #[test]
    fn test_refresh_interval_follows_interval() {
        let config = QuotaConfig::new(10, Interval::Minute);
        assert_eq!(config.refresh_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_config_from_yaml() {
        let config: QuotaConfig = serde_yaml::from_str("limit: 100\ninterval: hour\n").unwrap();
        assert_eq!(config, QuotaConfig::new(100, Interval::Hour));
    }

    #[test]
    fn test_zero_limit_is_legal() {
        let config = QuotaConfig::new(0, Interval::Second);
        assert_eq!(config.limit, 0);
    }
}
