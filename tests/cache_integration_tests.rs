//! Integration Tests for the TTL LRU cache
//!
//! Exercises the public API end to end: recency eviction, lazy expiry with a
//! manual clock, and concurrent access from many threads.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use ttl_lru::{spawn_sweep_task, CacheError, Lookup, ManualClock, TtlLruCache};

// == Helper Functions ==

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

fn manual_cache<K, V>(capacity: usize) -> (TtlLruCache<K, V, ManualClock>, ManualClock)
where
    K: std::hash::Hash + Eq + Clone,
    V: Clone,
{
    let clock = ManualClock::new();
    let cache = TtlLruCache::with_clock(capacity, clock.clone()).unwrap();
    (cache, clock)
}

// == Construction ==

#[test]
fn test_zero_capacity_rejected() {
    let result = TtlLruCache::<&str, i32>::new(0);
    assert_eq!(result.unwrap_err(), CacheError::InvalidCapacity(0));
}

#[test]
fn test_new_cache_is_empty() {
    let cache = TtlLruCache::<&str, i32>::new(3).unwrap();
    assert!(cache.is_empty());
    assert_eq!(cache.capacity(), 3);
    assert_eq!(cache.get("anything"), None);
}

// == Recency Scenarios ==

#[test]
fn test_get_marks_most_recently_used() {
    let (cache, _clock) = manual_cache(2);

    cache.put("a", 1, secs(5)).unwrap();
    cache.put("b", 2, secs(10)).unwrap();

    assert_eq!(cache.get("a"), Some(1));
    assert_eq!(cache.keys(), vec!["a", "b"]);
}

#[test]
fn test_put_evicts_least_recently_used_after_touch() {
    let (cache, _clock) = manual_cache(2);

    cache.put("a", 1, secs(5)).unwrap();
    cache.put("b", 2, secs(10)).unwrap();
    assert_eq!(cache.get("a"), Some(1));

    // "b" is now least recently used
    cache.put("c", 3, secs(5)).unwrap();

    assert_eq!(cache.get("b"), None);
    assert_eq!(cache.get("a"), Some(1));
    assert_eq!(cache.get("c"), Some(3));
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.stats().evictions, 1);
}

#[test]
fn test_overwrite_at_capacity_one_does_not_evict() {
    let (cache, _clock) = manual_cache(1);

    cache.put("x", "v1", secs(5)).unwrap();
    cache.put("x", "v2", secs(5)).unwrap();

    assert_eq!(cache.get("x"), Some("v2"));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.stats().evictions, 0);
}

#[test]
fn test_capacity_one_new_key_evicts_sole_entry() {
    let (cache, _clock) = manual_cache(1);

    cache.put("x", 1, secs(5)).unwrap();
    cache.put("y", 2, secs(5)).unwrap();

    assert_eq!(cache.get("x"), None);
    assert_eq!(cache.get("y"), Some(2));
    assert_eq!(cache.stats().evictions, 1);
}

#[test]
fn test_distinct_inserts_evict_in_insertion_order() {
    let (cache, _clock) = manual_cache(3);

    for i in 0..10 {
        cache.put(i, i * 10, secs(60)).unwrap();
        assert!(cache.len() <= 3);
    }

    assert_eq!(cache.keys(), vec![9, 8, 7]);
    assert_eq!(cache.stats().evictions, 7);
}

// == Expiry Scenarios ==

#[test]
fn test_entry_expires_after_ttl() {
    let (cache, clock) = manual_cache(2);

    cache.put(1, 100, Duration::from_millis(5000)).unwrap();
    cache.put(2, 200, Duration::from_millis(10000)).unwrap();
    assert_eq!(cache.get(&1), Some(100));

    clock.advance(Duration::from_millis(6000));

    assert_eq!(cache.get(&1), None);
    assert_eq!(cache.get(&2), Some(200));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_expiry_boundary_is_inclusive() {
    let (cache, clock) = manual_cache(4);

    cache.put("k", 1, Duration::from_millis(1000)).unwrap();

    // Just before the deadline the entry is live
    clock.advance(Duration::from_millis(999));
    assert_eq!(cache.lookup("k"), Lookup::Hit(1));

    // At exactly the deadline it is expired
    clock.advance(Duration::from_millis(1));
    assert_eq!(cache.lookup("k"), Lookup::Expired);
    assert_eq!(cache.lookup("k"), Lookup::Absent);
}

#[test]
fn test_expired_entry_is_invisible_before_it_is_read() {
    let (cache, clock) = manual_cache(4);

    cache.put("gone", 1, secs(1)).unwrap();
    cache.put("live", 2, secs(60)).unwrap();
    clock.advance(secs(5));

    // Not read yet, but no accessor reports it
    assert_eq!(cache.keys(), vec!["live"]);
    assert_eq!(cache.len(), 1);
    assert!(!cache.is_empty());
    assert_eq!(cache.stats().total_entries, 1);
    assert_eq!(cache.stats().expirations, 0);

    // Reading it removes it lazily
    assert_eq!(cache.get("gone"), None);
    assert_eq!(cache.stats().expirations, 1);
    assert_eq!(cache.keys(), vec!["live"]);
}

#[test]
fn test_cache_reports_empty_once_everything_expired() {
    let (cache, clock) = manual_cache(4);

    cache.put("a", 1, secs(1)).unwrap();
    cache.put("b", 2, secs(2)).unwrap();
    clock.advance(secs(2));

    assert!(cache.is_empty());
    assert_eq!(cache.len(), 0);
    assert!(cache.keys().is_empty());
}

#[test]
fn test_overwrite_resets_ttl() {
    let (cache, clock) = manual_cache(4);

    cache.put("k", 1, secs(5)).unwrap();
    clock.advance(secs(4));
    cache.put("k", 2, secs(5)).unwrap();
    clock.advance(secs(4));

    assert_eq!(cache.get("k"), Some(2));
}

#[test]
fn test_zero_ttl_rejected_without_side_effects() {
    let (cache, _clock) = manual_cache(1);

    cache.put("keep", 1, secs(5)).unwrap();
    let result = cache.put("new", 2, Duration::ZERO);

    assert!(matches!(result, Err(CacheError::InvalidTtl(_))));
    assert_eq!(cache.keys(), vec!["keep"]);
    assert_eq!(cache.get("keep"), Some(1));
}

#[test]
fn test_expired_tail_is_evicted_by_capacity() {
    let (cache, clock) = manual_cache(2);

    cache.put("old", 1, secs(1)).unwrap();
    cache.put("live", 2, secs(60)).unwrap();
    clock.advance(secs(2));

    cache.put("new", 3, secs(60)).unwrap();

    assert_eq!(cache.keys(), vec!["new", "live"]);
    let stats = cache.stats();
    assert_eq!(stats.evictions, 1);
    assert_eq!(stats.expirations, 0);
}

// == Concurrency ==

#[test]
fn test_concurrent_distinct_puts_fill_to_capacity() {
    const THREADS: usize = 16;
    let cache = Arc::new(TtlLruCache::new(THREADS / 2).unwrap());

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                cache.put(i, i * 2, secs(60)).unwrap();
                // May already be evicted by another thread
                if let Some(value) = cache.get(&i) {
                    assert_eq!(value, i * 2);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let keys = cache.keys();
    assert_eq!(cache.len(), THREADS / 2);
    assert_eq!(keys.len(), THREADS / 2);
    assert_eq!(keys.iter().collect::<HashSet<_>>().len(), THREADS / 2);
    assert_eq!(cache.stats().evictions, (THREADS / 2) as u64);
}

#[test]
fn test_concurrent_mixed_operations_keep_invariants() {
    const THREADS: u64 = 8;
    const OPS: u64 = 500;
    let clock = ManualClock::new();
    let cache = Arc::new(TtlLruCache::with_clock(16, clock.clone()).unwrap());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            let clock = clock.clone();
            thread::spawn(move || {
                for i in 0..OPS {
                    let key = (t * 7 + i) % 32;
                    match i % 4 {
                        0 | 1 => cache.put(key, key * 100, secs(1 + key % 3)).unwrap(),
                        2 => {
                            if let Some(value) = cache.get(&key) {
                                assert_eq!(value, key * 100);
                            }
                        }
                        _ => {
                            let _ = cache.remove(&key);
                            if i % 50 == 3 {
                                clock.advance(Duration::from_millis(250));
                            }
                        }
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let keys = cache.keys();
    assert!(cache.len() <= 16);
    assert_eq!(keys.len(), cache.len());
    assert_eq!(keys.iter().collect::<HashSet<_>>().len(), keys.len());
    assert_eq!(cache.stats().total_entries, cache.len());
}

// == Background Sweep ==

#[tokio::test]
async fn test_sweep_reclaims_unread_expired_entries() {
    let clock = ManualClock::new();
    let cache = Arc::new(TtlLruCache::with_clock(8, clock.clone()).unwrap());

    cache.put("short", 1, secs(1)).unwrap();
    cache.put("long", 2, secs(60)).unwrap();
    clock.advance(secs(5));

    let handle = spawn_sweep_task(cache.clone(), Duration::from_millis(10));
    tokio::time::sleep(Duration::from_millis(200)).await;
    handle.abort();

    assert_eq!(cache.keys(), vec!["long"]);
    assert_eq!(cache.get("long"), Some(2));
}
