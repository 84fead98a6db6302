//! Cache Module
//!
//! Provides a bounded in-memory cache with lazy TTL expiration and LRU eviction.

mod clock;
mod entry;
mod lru;
mod stats;
mod store;
mod ttl_cache;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub(crate) use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::{CacheStore, Lookup};
pub use ttl_cache::TtlLruCache;
