//! Quota store contracts and the built-in in-memory implementation.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use std::time::Duration;

use crate::error::StoreError;
use crate::ratelimit::Entry;

/// TTL-keyed store holding counter records.
///
/// The limiter performs its read-modify-write against this contract in
/// separate steps; no atomicity is assumed. Implementations may be local or
/// network-backed, so both operations can suspend.
#[async_trait]
pub trait QuotaStore: Send + Sync {
    /// Fetch the record for `key`. Must return `None` both for keys that
    /// were never written and for keys whose TTL has elapsed.
    async fn get(&self, key: &str) -> Result<Option<Entry>, StoreError>;

    /// Store or overwrite the record for `key` with the given expiry. A
    /// zero `ttl` means the record is already expired and must be absent on
    /// the very next read; the limiter relies on this for window rollover.
    async fn set(&self, key: &str, entry: Entry, ttl: Duration) -> Result<(), StoreError>;
}

/// Optional hardened contract for stores that can count atomically.
///
/// The plain [`QuotaStore`] path has a check-then-act race: two concurrent
/// checks for one key can both read the same count, both decrement, and
/// both persist. Stores with a native conditional-decrement (or an internal
/// lock, like [`MemoryStore`]) can implement this trait instead and the
/// race disappears. Opting in changes observable counting behavior under
/// contention.
#[async_trait]
pub trait AtomicQuotaStore: QuotaStore {
    /// Atomically decrement the quota for `key` if any remains, creating a
    /// fresh record with `limit` requests and a `window` expiry when the
    /// key is absent or expired.
    ///
    /// Returns `Some(remaining)` when the request was admitted and `None`
    /// when the quota is exhausted. The window expiry is fixed at creation
    /// and never extended by later decrements.
    async fn try_acquire(
        &self,
        key: &str,
        identity: &str,
        limit: u64,
        window: Duration,
    ) -> Result<Option<u64>, StoreError>;
}
