//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant from which the entry is considered absent
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring at `expires_at`.
    pub fn new(value: V, expires_at: Instant) -> Self {
        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is expired when `now >= expires_at`, so
    /// once the TTL has fully elapsed the entry is gone.
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn entry_with_ttl(ttl: Duration) -> (CacheEntry<&'static str>, Instant) {
        let now = Instant::now();
        (CacheEntry::new("test_value", now + ttl), now)
    }

    #[test]
    fn test_entry_creation() {
        let (entry, now) = entry_with_ttl(Duration::from_secs(60));

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.expires_at, now + Duration::from_secs(60));
        assert!(!entry.is_expired(now));
    }

    #[test]
    fn test_entry_expiration() {
        let (entry, now) = entry_with_ttl(Duration::from_secs(1));

        assert!(!entry.is_expired(now + Duration::from_millis(999)));
        assert!(entry.is_expired(now + Duration::from_millis(1100)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let (entry, now) = entry_with_ttl(Duration::from_secs(5));

        // One nanosecond before the deadline the entry is still live
        assert!(!entry.is_expired(entry.expires_at - Duration::from_nanos(1)));
        // Exactly at the deadline it is expired
        assert!(entry.is_expired(entry.expires_at));
        assert!(entry.is_expired(now + Duration::from_secs(5)));
    }
}
