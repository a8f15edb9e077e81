//! Turnstile - Fixed-Window Request Admission Control
//!
//! This crate implements a per-client admission-control core: each incoming
//! request is admitted or rejected based on a configurable quota that
//! refreshes on a fixed time window. Counter state lives in a pluggable,
//! TTL-keyed quota store, so the same core works against an in-process map
//! or a network-backed cache.

pub mod config;
pub mod error;
pub mod ratelimit;
pub mod store;

pub use config::{Interval, QuotaConfig};
pub use error::{Result, StoreError, TurnstileError};
pub use ratelimit::{
    AdmissionControl, AtomicRateLimiter, Entry, HostnameKeyMaker, KeyMaker, Overrides,
    RateLimiter, RequestContext,
};
pub use store::{AtomicQuotaStore, MemoryStore, QuotaStore};
