//! TTL LRU - a fixed-capacity, thread-safe cache
//!
//! Entries are evicted by recency of use when the cache is full and are
//! treated as absent once their TTL has elapsed. Expiry is discovered lazily
//! on access; an optional background sweep reclaims memory early.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheStats, CacheStore, Clock, Lookup, ManualClock, SystemClock, TtlLruCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_sweep_task;
