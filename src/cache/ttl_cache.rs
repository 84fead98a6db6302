//! Thread-Safe Cache Module
//!
//! Wraps [`CacheStore`] in a single mutex together with an injectable clock.

use std::borrow::Borrow;
use std::hash::Hash;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::{CacheStats, CacheStore, Clock, Lookup, SystemClock};
use crate::config::Config;
use crate::error::Result;

// == TTL LRU Cache ==
/// Fixed-capacity LRU cache with per-entry TTL, safe to share across threads.
///
/// One lock guards the index and the recency list together, and every
/// operation holds it for its whole duration, so operations are linearizable.
/// The clock is read after the lock is taken.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use ttl_lru::TtlLruCache;
///
/// let cache = TtlLruCache::new(2).unwrap();
/// cache.put("a", 1, Duration::from_secs(5)).unwrap();
/// assert_eq!(cache.get("a"), Some(1));
/// assert_eq!(cache.get("b"), None);
/// ```
#[derive(Debug)]
pub struct TtlLruCache<K, V, C = SystemClock> {
    store: Mutex<CacheStore<K, V>>,
    clock: C,
    capacity: usize,
}

impl<K, V> TtlLruCache<K, V, SystemClock>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructors ==
    /// Creates a cache holding at most `capacity` entries, timed by the system clock.
    ///
    /// Fails with [`CacheError::InvalidCapacity`](crate::CacheError::InvalidCapacity)
    /// when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_clock(capacity, SystemClock)
    }

    /// Creates a cache sized by `config.max_entries`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.max_entries)
    }
}

impl<K, V, C> TtlLruCache<K, V, C>
where
    K: Hash + Eq + Clone,
    V: Clone,
    C: Clock,
{
    /// Creates a cache that reads time from `clock`.
    pub fn with_clock(capacity: usize, clock: C) -> Result<Self> {
        Ok(Self {
            store: Mutex::new(CacheStore::new(capacity)?),
            clock,
            capacity,
        })
    }

    // == Get ==
    /// Returns a copy of the value for `key` if present and not expired.
    ///
    /// A hit marks the key most recently used. An expired entry is removed.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup(key).into_value()
    }

    // == Lookup ==
    /// Like [`get`](Self::get), but tells an expired entry apart from a missing one.
    pub fn lookup<Q>(&self, key: &Q) -> Lookup<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut store = self.store.lock();
        let now = self.clock.now();
        store.get(key, now)
    }

    // == Put ==
    /// Stores `value` under `key` for `ttl` from now, as the most recently used entry.
    ///
    /// Overwriting replaces both value and expiry. Inserting a new key into a
    /// full cache evicts the least recently used entry. A zero `ttl` is
    /// rejected with [`CacheError::InvalidTtl`](crate::CacheError::InvalidTtl).
    pub fn put(&self, key: K, value: V, ttl: Duration) -> Result<()> {
        let mut store = self.store.lock();
        let now = self.clock.now();
        store.put(key, value, ttl, now)
    }

    // == Remove ==
    /// Removes `key`, returning its value if it was still live.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut store = self.store.lock();
        let now = self.clock.now();
        store.remove(key, now)
    }

    // == Purge Expired ==
    /// Removes every expired entry and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let mut store = self.store.lock();
        let now = self.clock.now();
        store.purge_expired(now)
    }

    // == Keys ==
    /// Returns the live keys from most to least recently used.
    ///
    /// Expired entries are never listed. Recency is not affected.
    pub fn keys(&self) -> Vec<K> {
        let store = self.store.lock();
        let now = self.clock.now();
        store.keys(now)
    }

    // == Stats ==
    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        let store = self.store.lock();
        let now = self.clock.now();
        store.stats(now)
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        let store = self.store.lock();
        let now = self.clock.now();
        store.len(now)
    }

    // == Is Empty ==
    /// Returns true if the cache holds no live entry.
    pub fn is_empty(&self) -> bool {
        let store = self.store.lock();
        let now = self.clock.now();
        store.is_empty(now)
    }

    // == Capacity ==
    /// Returns the maximum number of entries, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Clock ==
    /// Returns the clock the cache reads time from.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
