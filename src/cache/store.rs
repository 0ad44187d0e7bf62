//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::stats::datetime_from_ms;
use crate::cache::{
    CacheCounters, CacheEntry, CacheStats, Clock, EntryStats, LruTracker, SystemClock,
};

// == Cache Store ==
/// Bounded cache with TTL expiry and LRU eviction.
///
/// The store is a plain single-owner structure; wrap it in
/// [`SharedCache`](crate::cache::SharedCache) to share it between tasks.
///
/// Invariants held between operations:
/// - at most `capacity` entries are stored
/// - every key in `entries` has exactly one record in `lru`, and vice versa
/// - an expired entry is never returned, even while still stored
#[derive(Debug)]
pub struct CacheStore<V, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker,
    counters: CacheCounters,
    /// Maximum number of entries allowed
    capacity: usize,
    /// TTL applied when `set` is called without an override
    default_ttl: Duration,
    clock: C,
}

impl<V: Clone> CacheStore<V, SystemClock> {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    ///
    /// A capacity of 0 is raised to 1.
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        Self::with_clock(capacity, default_ttl, SystemClock)
    }
}

impl<V: Clone, C: Clock> CacheStore<V, C> {
    /// Creates a store that reads time from `clock`.
    pub fn with_clock(capacity: usize, default_ttl: Duration, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            counters: CacheCounters::new(),
            capacity: capacity.max(1),
            default_ttl,
            clock,
        }
    }

    // == Set ==
    /// Stores a value, replacing any previous entry for the key.
    ///
    /// Expired entries are purged first. If the key is new and the store is
    /// full, the least recently accessed entry is evicted to make room.
    /// Overwriting an existing key never evicts, even at capacity.
    ///
    /// # Arguments
    /// * `key` - Non-empty cache key
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL (uses the default TTL if None)
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let key = key.into();
        debug_assert!(!key.is_empty(), "cache keys must not be empty");

        let now = self.clock.now_ms();
        self.purge_expired_at(now);

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_lru();
        }

        let entry = CacheEntry::new(value, now, ttl.unwrap_or(self.default_ttl));
        self.entries.insert(key.clone(), entry);
        self.lru.touch(&key);
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns None if the key is absent or expired. An expired entry is
    /// removed on the spot; a live one becomes the most recently used.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                self.counters.record_miss();
                return None;
            }
        };

        if expired {
            self.remove_entry(key);
            self.counters.record_expirations(1);
            self.counters.record_miss();
            debug!(key, "cache entry expired on read");
            return None;
        }

        self.lru.touch(key);
        self.counters.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Has ==
    /// Returns true if `get` would return a value.
    ///
    /// Goes through `get`, so it refreshes recency and drops expired entries
    /// exactly the same way.
    pub fn has(&mut self, key: &str) -> bool {
        self.get(key).is_some()
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key)
    }

    // == Clear ==
    /// Removes every entry. Returns how many live entries were dropped.
    pub fn clear(&mut self) -> usize {
        self.purge_expired();
        let removed = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        removed
    }

    // == Keys ==
    /// Returns the keys of all live entries.
    pub fn keys(&mut self) -> Vec<String> {
        self.purge_expired();
        self.entries.keys().cloned().collect()
    }

    // == Stats ==
    /// Purges expired entries and returns a diagnostic snapshot.
    pub fn stats(&mut self) -> CacheStats {
        let now = self.clock.now_ms();
        self.purge_expired_at(now);

        let mut entries: Vec<EntryStats> = self
            .entries
            .iter()
            .map(|(key, entry)| EntryStats {
                key: key.clone(),
                created_at: datetime_from_ms(entry.created_at),
                expires_at: datetime_from_ms(entry.expires_at),
                age: entry.age_ms(now),
                ttl: entry.ttl_ms(),
            })
            .collect();
        entries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.key.cmp(&b.key)));

        CacheStats {
            size: self.entries.len(),
            capacity: self.capacity,
            ttl: u64::try_from(self.default_ttl.as_millis()).unwrap_or(u64::MAX),
            hit_rate: self.counters.hit_rate(),
            counters: self.counters,
            entries,
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        self.purge_expired_at(now)
    }

    /// Running counters.
    pub fn counters(&self) -> CacheCounters {
        self.counters
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn purge_expired_at(&mut self, now: u64) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.remove_entry(&key);
        }

        self.counters.record_expirations(count);
        count
    }

    fn evict_lru(&mut self) {
        if let Some(evicted) = self.lru.evict_oldest() {
            self.entries.remove(&evicted);
            self.counters.record_eviction();
            debug!(key = %evicted, capacity = self.capacity, "evicted least recently used entry");
        }
    }

    /// Removes `key` from both the entry map and the access index.
    fn remove_entry(&mut self, key: &str) -> bool {
        self.lru.remove(key);
        self.entries.remove(key).is_some()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MockClock;

    const TTL: Duration = Duration::from_secs(300);

    fn store_with_clock(capacity: usize) -> (CacheStore<String, MockClock>, MockClock) {
        let clock = MockClock::new(0);
        (CacheStore::with_clock(capacity, TTL, clock.clone()), clock)
    }

    #[test]
    fn test_store_new() {
        let store: CacheStore<String> = CacheStore::new(100, TTL);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
        assert_eq!(store.default_ttl(), TTL);
    }

    #[test]
    fn test_store_zero_capacity_is_raised() {
        let (mut store, _) = store_with_clock(0);
        store.set("a", "1".to_string(), None);
        store.set("b", "2".to_string(), None);

        assert_eq!(store.capacity(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("b"), Some("2".to_string()));
    }

    #[test]
    fn test_store_set_and_get() {
        let (mut store, _) = store_with_clock(100);

        store.set("key1", "value1".to_string(), None);

        assert_eq!(store.get("key1"), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let (mut store, _) = store_with_clock(100);
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_delete() {
        let (mut store, _) = store_with_clock(100);

        store.set("key1", "value1".to_string(), None);

        assert!(store.delete("key1"));
        assert!(!store.delete("key1"));
        assert!(store.is_empty());
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_delete_nonexistent_changes_nothing() {
        let (mut store, _) = store_with_clock(100);
        store.set("key1", "value1".to_string(), None);

        assert!(!store.delete("nonexistent"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("key1"), Some("value1".to_string()));
    }

    #[test]
    fn test_store_overwrite() {
        let (mut store, clock) = store_with_clock(100);

        store.set("key1", "value1".to_string(), Some(Duration::from_millis(10)));
        clock.advance(Duration::from_millis(5));
        store.set("key1", "value2".to_string(), None);
        clock.advance(Duration::from_millis(100));

        assert_eq!(store.get("key1"), Some("value2".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite_at_capacity_keeps_other_entries() {
        let (mut store, _) = store_with_clock(2);

        store.set("a", "1".to_string(), None);
        store.set("b", "2".to_string(), None);
        store.set("a", "3".to_string(), None);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a"), Some("3".to_string()));
        assert_eq!(store.get("b"), Some("2".to_string()));
    }

    #[test]
    fn test_store_ttl_boundary() {
        let (mut store, clock) = store_with_clock(100);

        store.set("key1", "value1".to_string(), Some(Duration::from_millis(1_000)));

        clock.set_ms(1_000);
        assert_eq!(store.get("key1"), Some("value1".to_string()));

        clock.set_ms(1_001);
        assert_eq!(store.get("key1"), None);
        assert!(store.is_empty(), "expired entry removed on read");
    }

    #[test]
    fn test_store_default_ttl_applies() {
        let (mut store, clock) = store_with_clock(100);

        store.set("key1", "value1".to_string(), None);

        clock.advance(TTL);
        assert!(store.has("key1"));
        clock.advance(Duration::from_millis(1));
        assert!(!store.has("key1"));
    }

    #[test]
    fn test_store_lru_eviction() {
        let (mut store, _) = store_with_clock(3);

        store.set("key1", "value1".to_string(), None);
        store.set("key2", "value2".to_string(), None);
        store.set("key3", "value3".to_string(), None);
        store.set("key4", "value4".to_string(), None);

        assert_eq!(store.len(), 3);
        assert_eq!(store.get("key1"), None);
        assert!(store.get("key2").is_some());
        assert!(store.get("key3").is_some());
        assert!(store.get("key4").is_some());
        assert_eq!(store.counters().evictions, 1);
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let (mut store, _) = store_with_clock(2);

        store.set("x", "1".to_string(), None);
        store.set("y", "2".to_string(), None);
        store.get("x");
        store.set("z", "3".to_string(), None);

        assert_eq!(store.get("y"), None);
        assert!(store.get("x").is_some());
        assert!(store.get("z").is_some());
    }

    #[test]
    fn test_store_has_refreshes_recency() {
        let (mut store, _) = store_with_clock(2);

        store.set("x", "1".to_string(), None);
        store.set("y", "2".to_string(), None);
        assert!(store.has("x"));
        store.set("z", "3".to_string(), None);

        assert!(!store.has("y"));
        assert!(store.has("x"));
    }

    #[test]
    fn test_store_set_purges_expired_before_evicting() {
        let (mut store, clock) = store_with_clock(2);

        store.set("short", "1".to_string(), Some(Duration::from_millis(10)));
        store.set("long", "2".to_string(), None);
        clock.advance(Duration::from_millis(11));
        store.set("new", "3".to_string(), None);

        assert_eq!(store.len(), 2);
        assert_eq!(store.counters().evictions, 0);
        assert!(store.has("long"));
        assert!(store.has("new"));
    }

    #[test]
    fn test_store_clear() {
        let (mut store, _) = store_with_clock(10);
        store.set("a", "1".to_string(), None);
        store.set("b", "2".to_string(), None);

        assert_eq!(store.clear(), 2);

        assert!(store.is_empty());
        assert_eq!(store.get("a"), None);
        // The access index was cleared too, so refilling never evicts phantom keys
        store.set("c", "3".to_string(), None);
        assert_eq!(store.counters().evictions, 0);
    }

    #[test]
    fn test_store_clear_counts_only_live_entries() {
        let (mut store, clock) = store_with_clock(10);
        store.set("short", "1".to_string(), Some(Duration::from_millis(5)));
        store.set("long", "2".to_string(), None);
        clock.advance(Duration::from_millis(6));

        assert_eq!(store.clear(), 1);
        assert!(store.is_empty());
        assert_eq!(store.counters().expirations, 1);
        assert_eq!(store.clear(), 0);
    }

    #[test]
    fn test_store_keys_skip_expired() {
        let (mut store, clock) = store_with_clock(10);
        store.set("a", "1".to_string(), Some(Duration::from_millis(5)));
        store.set("b", "2".to_string(), None);
        clock.advance(Duration::from_millis(6));

        assert_eq!(store.keys(), vec!["b".to_string()]);
    }

    #[test]
    fn test_store_counters() {
        let (mut store, _) = store_with_clock(100);

        store.set("key1", "value1".to_string(), None);
        store.get("key1");
        store.get("nonexistent");

        let counters = store.counters();
        assert_eq!(counters.hits, 1);
        assert_eq!(counters.misses, 1);
    }

    #[test]
    fn test_store_stats_snapshot() {
        let (mut store, clock) = store_with_clock(10);

        store.set("a", "1".to_string(), None);
        clock.advance(Duration::from_millis(40));
        store.set("b", "2".to_string(), Some(Duration::from_millis(20)));
        clock.advance(Duration::from_millis(10));

        let stats = store.stats();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.capacity, 10);
        assert_eq!(stats.ttl, 300_000);
        assert_eq!(stats.entries[0].key, "a");
        assert_eq!(stats.entries[0].age, 50);
        assert_eq!(stats.entries[0].ttl, 300_000);
        assert_eq!(stats.entries[1].key, "b");
        assert_eq!(stats.entries[1].age, 10);
        assert_eq!(stats.entries[1].ttl, 20);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let (mut store, clock) = store_with_clock(100);

        store.set("key1", "value1".to_string(), Some(Duration::from_secs(1)));
        store.set("key2", "value2".to_string(), Some(Duration::from_secs(10)));
        clock.advance(Duration::from_millis(1_100));

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.counters().expirations, 1);
        assert!(store.get("key2").is_some());
    }
}
