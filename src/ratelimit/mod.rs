//! Admission-control logic and per-key counter state.

mod atomic;
mod backend;
mod context;
mod entry;
mod keymaker;
mod limiter;

pub use atomic::AtomicRateLimiter;
pub use backend::AdmissionControl;
pub use context::RequestContext;
pub use entry::Entry;
pub use keymaker::{HostnameKeyMaker, KeyMaker, KEY_NAMESPACE};
pub use limiter::{Overrides, RateLimiter};
