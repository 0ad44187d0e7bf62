//! Cache Statistics Module
//!
//! Diagnostic snapshot of a cache instance plus its running counters.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

// == Cache Counters ==
/// Running counters for one cache instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheCounters {
    /// Reads that returned a live entry
    pub hits: u64,
    /// Reads that found nothing or an expired entry
    pub misses: u64,
    /// Entries removed by the LRU policy
    pub evictions: u64,
    /// Entries removed because their TTL elapsed
    pub expirations: u64,
}

impl CacheCounters {
    // == Constructor ==
    /// Creates a new set of counters, all at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }
}

// == Entry Stats ==
/// Per-entry diagnostics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryStats {
    pub key: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Milliseconds since insertion
    pub age: u64,
    /// Lifetime the entry was stored with, in milliseconds
    pub ttl: u64,
}

// == Cache Stats ==
/// Snapshot of one cache instance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Live entries at snapshot time
    pub size: usize,
    pub capacity: usize,
    /// Default TTL in milliseconds
    pub ttl: u64,
    pub hit_rate: f64,
    #[serde(flatten)]
    pub counters: CacheCounters,
    pub entries: Vec<EntryStats>,
}

/// Converts Unix milliseconds to a UTC timestamp, saturating out-of-range values.
pub(crate) fn datetime_from_ms(ms: u64) -> DateTime<Utc> {
    i64::try_from(ms)
        .ok()
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_new() {
        let counters = CacheCounters::new();
        assert_eq!(counters.hits, 0);
        assert_eq!(counters.misses, 0);
        assert_eq!(counters.evictions, 0);
        assert_eq!(counters.expirations, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        assert_eq!(CacheCounters::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut counters = CacheCounters::new();
        counters.record_hit();
        counters.record_hit();
        counters.record_hit();
        counters.record_miss();
        assert_eq!(counters.hit_rate(), 0.75);
    }

    #[test]
    fn test_record_eviction_and_expirations() {
        let mut counters = CacheCounters::new();
        counters.record_eviction();
        counters.record_expirations(3);
        assert_eq!(counters.evictions, 1);
        assert_eq!(counters.expirations, 3);
    }

    #[test]
    fn test_datetime_from_ms() {
        let dt = datetime_from_ms(1_700_000_000_123);
        assert_eq!(dt.timestamp_millis(), 1_700_000_000_123);
        assert_eq!(datetime_from_ms(u64::MAX), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_stats_serialize_shape() {
        let stats = CacheStats {
            size: 1,
            capacity: 10,
            ttl: 60_000,
            hit_rate: 0.5,
            counters: CacheCounters {
                hits: 1,
                misses: 1,
                evictions: 0,
                expirations: 0,
            },
            entries: vec![EntryStats {
                key: "fixtures".to_string(),
                created_at: datetime_from_ms(0),
                expires_at: datetime_from_ms(60_000),
                age: 5,
                ttl: 60_000,
            }],
        };

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["size"], 1);
        assert_eq!(json["capacity"], 10);
        assert_eq!(json["hits"], 1);
        assert_eq!(json["hitRate"], 0.5);
        assert_eq!(json["entries"][0]["key"], "fixtures");
        assert!(json["entries"][0]["createdAt"].is_string());
        assert_eq!(json["entries"][0]["ttl"], 60_000);
    }
}
