//! In-process quota store backed by a concurrent map.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

use super::{AtomicQuotaStore, QuotaStore};
use crate::error::StoreError;
use crate::ratelimit::Entry;

struct Stored {
    entry: Entry,
    expires_at: Instant,
}

/// TTL-keyed in-memory store.
///
/// Expiry is lazy: records past their deadline are dropped when next read.
/// A record written with a zero TTL is expired immediately and never
/// observable. Uses `tokio::time::Instant`, so tests can drive expiry with
/// a paused clock.
#[derive(Default)]
pub struct MemoryStore {
    records: DashMap<String, Stored>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Number of records currently held, including any awaiting lazy
    /// eviction.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop all records. Primarily useful for tests.
    pub fn clear(&self) {
        self.records.clear();
    }
}

#[async_trait]
impl QuotaStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Entry>, StoreError> {
        let now = Instant::now();
        if let Some(stored) = self.records.get(key) {
            if now < stored.expires_at {
                return Ok(Some(stored.entry.clone()));
            }
        }
        // Evict lazily. remove_if re-checks the deadline so a record
        // refreshed by a concurrent set is not lost.
        self.records.remove_if(key, |_, stored| now >= stored.expires_at);
        Ok(None)
    }

    async fn set(&self, key: &str, entry: Entry, ttl: Duration) -> Result<(), StoreError> {
        let expires_at = Instant::now() + ttl;
        self.records
            .insert(key.to_string(), Stored { entry, expires_at });
        Ok(())
    }
}

#[async_trait]
impl AtomicQuotaStore for MemoryStore {
    async fn try_acquire(
        &self,
        key: &str,
        identity: &str,
        limit: u64,
        window: Duration,
    ) -> Result<Option<u64>, StoreError> {
        if limit == 0 {
            return Ok(None);
        }

        let now = Instant::now();
        // The entry guard holds the shard lock, making the whole
        // check-and-decrement atomic per key.
        let mut slot = self.records.entry(key.to_string()).or_insert_with(|| Stored {
            entry: Entry::new(identity, Utc::now(), limit),
            expires_at: now + window,
        });

        if now >= slot.expires_at {
            // Window rolled over; start a fresh one in place.
            slot.entry = Entry::new(identity, Utc::now(), limit);
            slot.expires_at = now + window;
        }

        if slot.entry.is_exhausted() {
            return Ok(None);
        }

        slot.entry.consume();
        Ok(Some(slot.entry.requests_left))
    }
}
