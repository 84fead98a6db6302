//! Cache Store Module
//!
//! Unsynchronised cache core combining a HashMap index with an LRU list and
//! lazy TTL expiration. Every operation takes the current instant explicitly;
//! [`TtlLruCache`](crate::cache::TtlLruCache) supplies it from its clock.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::lru::{LruList, NodeId};
use crate::cache::{CacheEntry, CacheStats};
use crate::error::{CacheError, Result};

// == Lookup ==
/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<V> {
    /// Key present and live
    Hit(V),
    /// Key was present but its TTL had elapsed; it has now been removed
    Expired,
    /// Key not present
    Absent,
}

impl<V> Lookup<V> {
    /// Collapses the lookup into the two-way found/not-found contract.
    pub fn into_value(self) -> Option<V> {
        match self {
            Lookup::Hit(value) => Some(value),
            Lookup::Expired | Lookup::Absent => None,
        }
    }

    /// Returns true for a live value.
    pub fn is_hit(&self) -> bool {
        matches!(self, Lookup::Hit(_))
    }
}

#[derive(Debug)]
struct Slot<K, V> {
    key: K,
    entry: CacheEntry<V>,
}

// == Cache Store ==
/// Bounded key-value storage with LRU eviction and TTL support.
///
/// `index` and `order` always hold exactly the same entries.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key to list node
    index: HashMap<K, NodeId>,
    /// Recency order, most recently used first
    order: LruList<Slot<K, V>>,
    /// Counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore holding at most `capacity` entries.
    ///
    /// Fails with [`CacheError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        Ok(Self {
            index: HashMap::with_capacity(capacity),
            order: LruList::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
        })
    }

    // == Put ==
    /// Stores a key-value pair that expires `ttl` after `now`.
    ///
    /// An existing entry for `key` has its value and expiry replaced.
    /// Otherwise, if the cache is full, the least recently used entry is
    /// evicted first, whether or not it has already expired. Either way the
    /// key ends up most recently used.
    ///
    /// A zero `ttl` is rejected and leaves the store untouched.
    pub fn put(&mut self, key: K, value: V, ttl: Duration, now: Instant) -> Result<()> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidTtl("ttl must be positive".to_string()));
        }
        let expires_at = now.checked_add(ttl).ok_or_else(|| {
            CacheError::InvalidTtl(format!("ttl of {ttl:?} overflows the clock"))
        })?;
        let entry = CacheEntry::new(value, expires_at);

        // Overwrite: full replace of value and expiry
        if let Some(&id) = self.index.get(&key) {
            if let Some(slot) = self.order.get_mut(id) {
                slot.entry = entry;
            }
            self.order.move_to_front(id);
            return Ok(());
        }

        if self.index.len() >= self.capacity {
            self.evict_lru();
        }

        let id = self.order.push_front(Slot {
            key: key.clone(),
            entry,
        });
        self.index.insert(key, id);

        Ok(())
    }

    // == Get ==
    /// Looks up `key` as of `now`.
    ///
    /// A live entry becomes most recently used. An expired entry is removed
    /// on the spot.
    pub fn get<Q>(&mut self, key: &Q, now: Instant) -> Lookup<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&id) = self.index.get(key) else {
            self.stats.record_miss();
            return Lookup::Absent;
        };

        let expired = self
            .order
            .get(id)
            .map_or(true, |slot| slot.entry.is_expired(now));
        if expired {
            self.unlink(key, id);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            debug!(remaining = self.index.len(), "Removed expired entry on access");
            return Lookup::Expired;
        }

        self.order.move_to_front(id);
        match self.order.get(id) {
            Some(slot) => {
                self.stats.record_hit();
                Lookup::Hit(slot.entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                Lookup::Absent
            }
        }
    }

    // == Remove ==
    /// Removes `key`, returning its value if it was still live.
    pub fn remove<Q>(&mut self, key: &Q, now: Instant) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        let slot = self.unlink(key, id)?;
        if slot.entry.is_expired(now) {
            self.stats.record_expirations(1);
            None
        } else {
            Some(slot.entry.value)
        }
    }

    // == Purge Expired ==
    /// Removes all entries expired as of `now`.
    ///
    /// Returns the number of entries removed. Recency order of the remaining
    /// entries is unchanged.
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let expired: Vec<(NodeId, K)> = self
            .order
            .iter()
            .filter(|(_, slot)| slot.entry.is_expired(now))
            .map(|(id, slot)| (id, slot.key.clone()))
            .collect();

        let count = expired.len();
        for (id, key) in expired {
            self.unlink(&key, id);
        }

        self.stats.record_expirations(count);
        count
    }

    // == Keys ==
    /// Returns the keys live at `now`, from most to least recently used.
    ///
    /// Expired entries not yet removed are skipped. Recency is not affected.
    pub fn keys(&self, now: Instant) -> Vec<K> {
        self.order
            .iter()
            .filter(|(_, slot)| !slot.entry.is_expired(now))
            .map(|(_, slot)| slot.key.clone())
            .collect()
    }

    // == Stats ==
    /// Returns current cache statistics, counting only entries live at `now`.
    pub fn stats(&self, now: Instant) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.len(now));
        stats
    }

    // == Capacity ==
    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Length ==
    /// Returns the number of entries live at `now`.
    ///
    /// Walks the recency list, so this is linear in the number of stored entries.
    pub fn len(&self, now: Instant) -> usize {
        self.order
            .iter()
            .filter(|(_, slot)| !slot.entry.is_expired(now))
            .count()
    }

    // == Is Empty ==
    /// Returns true if no entry is live at `now`.
    pub fn is_empty(&self, now: Instant) -> bool {
        self.order
            .iter()
            .all(|(_, slot)| slot.entry.is_expired(now))
    }

    fn evict_lru(&mut self) {
        if let Some(slot) = self.order.pop_back() {
            self.index.remove(&slot.key);
            self.stats.record_eviction();
            debug!(capacity = self.capacity, "Evicted least recently used entry");
        }
    }

    fn unlink<Q>(&mut self, key: &Q, id: NodeId) -> Option<Slot<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.remove(key);
        self.order.remove(id)
    }

    /// Checks that index and order agree entry for entry.
    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        self.order.debug_validate_invariants();
        assert_eq!(self.index.len(), self.order.len());
        assert!(self.index.len() <= self.capacity);
        for (id, slot) in self.order.iter() {
            assert_eq!(self.index.get(&slot.key), Some(&id));
        }
    }
}
