//! LRU Tracker Module
//!
//! Access-order index used to pick eviction victims.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Tracks last access per key for LRU eviction.
///
/// Every touch stamps the key with a strictly increasing sequence number.
/// Eviction order follows the sequence, so two accesses in the same
/// millisecond are still ordered correctly.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Key to its position in `order`
    records: HashMap<String, u64>,
    /// Oldest access first
    order: BTreeMap<u64, String>,
    next_seq: u64,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as accessed, making it the most recent.
    pub fn touch(&mut self, key: &str) {
        let seq = self.next_seq;
        self.next_seq += 1;

        if let Some(previous) = self.records.insert(key.to_string(), seq) {
            self.order.remove(&previous);
        }
        self.order.insert(seq, key.to_string());
    }

    // == Remove ==
    /// Removes a key from the tracker. Returns whether it was tracked.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.records.remove(key) {
            Some(seq) => {
                self.order.remove(&seq);
                true
            }
            None => false,
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.records.remove(&key);
        Some(key)
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.order.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
