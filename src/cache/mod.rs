//! Cache Module
//!
//! Bounded in-memory caches with TTL expiration and LRU eviction, plus the
//! registry of per-category instances used by the upstream service.

mod clock;
mod entry;
pub mod keys;
mod lru;
mod registry;
mod shared;
mod stats;
mod store;
mod with_cache;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, MockClock, SystemClock};
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use registry::{
    CacheProfile, CacheRegistry, JsonCache, RegistryStats, BOOTSTRAP_PROFILE,
    ELEMENT_SUMMARY_PROFILE, ENTRY_PROFILE, FIXTURES_PROFILE, LIVE_PROFILE, STANDINGS_PROFILE,
};
pub use shared::SharedCache;
pub use stats::{CacheCounters, CacheStats, EntryStats};
pub use store::CacheStore;
pub use with_cache::with_cache;
