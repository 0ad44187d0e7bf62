//! Cache Registry Module
//!
//! The pre-configured cache instances, one per upstream data category.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::cache::{CacheStats, Clock, SharedCache, SystemClock};

// == Cache Profile ==
/// Capacity and default TTL for one data category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheProfile {
    pub name: &'static str,
    pub capacity: usize,
    pub default_ttl: Duration,
}

const MINUTE: Duration = Duration::from_secs(60);

/// Season-wide reference data; changes a few times a day.
pub const BOOTSTRAP_PROFILE: CacheProfile = CacheProfile {
    name: "bootstrap",
    capacity: 10,
    default_ttl: Duration::from_secs(60 * 60),
};

pub const FIXTURES_PROFILE: CacheProfile = CacheProfile {
    name: "fixtures",
    capacity: 10,
    default_ttl: Duration::from_secs(60 * 60),
};

/// In-progress gameweek scores.
pub const LIVE_PROFILE: CacheProfile = CacheProfile {
    name: "live",
    capacity: 50,
    default_ttl: MINUTE,
};

pub const STANDINGS_PROFILE: CacheProfile = CacheProfile {
    name: "standings",
    capacity: 100,
    default_ttl: Duration::from_secs(10 * 60),
};

/// Per-manager lookups; many distinct ids.
pub const ENTRY_PROFILE: CacheProfile = CacheProfile {
    name: "entry",
    capacity: 500,
    default_ttl: MINUTE,
};

pub const ELEMENT_SUMMARY_PROFILE: CacheProfile = CacheProfile {
    name: "element_summary",
    capacity: 200,
    default_ttl: Duration::from_secs(30 * 60),
};

pub type JsonCache<C = SystemClock> = SharedCache<Value, C>;

// == Cache Registry ==
/// Owns every cache instance. Built once at start-up and passed to whatever
/// issues upstream fetches.
pub struct CacheRegistry<C = SystemClock> {
    pub bootstrap: JsonCache<C>,
    pub fixtures: JsonCache<C>,
    pub live: JsonCache<C>,
    pub standings: JsonCache<C>,
    pub entry: JsonCache<C>,
    pub element_summary: JsonCache<C>,
}

impl<C> Clone for CacheRegistry<C> {
    fn clone(&self) -> Self {
        Self {
            bootstrap: self.bootstrap.clone(),
            fixtures: self.fixtures.clone(),
            live: self.live.clone(),
            standings: self.standings.clone(),
            entry: self.entry.clone(),
            element_summary: self.element_summary.clone(),
        }
    }
}

/// Stats for every instance, keyed by category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStats {
    pub bootstrap: CacheStats,
    pub fixtures: CacheStats,
    pub live: CacheStats,
    pub standings: CacheStats,
    pub entry: CacheStats,
    pub element_summary: CacheStats,
}

impl CacheRegistry<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for CacheRegistry<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock + Clone> CacheRegistry<C> {
    /// Builds all instances with the standard profiles, sharing one clock.
    pub fn with_clock(clock: C) -> Self {
        let build = |profile: CacheProfile| -> JsonCache<C> {
            SharedCache::with_clock(profile.capacity, profile.default_ttl, clock.clone())
        };

        Self {
            bootstrap: build(BOOTSTRAP_PROFILE),
            fixtures: build(FIXTURES_PROFILE),
            live: build(LIVE_PROFILE),
            standings: build(STANDINGS_PROFILE),
            entry: build(ENTRY_PROFILE),
            element_summary: build(ELEMENT_SUMMARY_PROFILE),
        }
    }
}

impl<C: Clock> CacheRegistry<C> {
    /// Every instance paired with its profile name.
    fn all(&self) -> [(&'static str, &JsonCache<C>); 6] {
        [
            (BOOTSTRAP_PROFILE.name, &self.bootstrap),
            (FIXTURES_PROFILE.name, &self.fixtures),
            (LIVE_PROFILE.name, &self.live),
            (STANDINGS_PROFILE.name, &self.standings),
            (ENTRY_PROFILE.name, &self.entry),
            (ELEMENT_SUMMARY_PROFILE.name, &self.element_summary),
        ]
    }

    pub async fn stats(&self) -> RegistryStats {
        RegistryStats {
            bootstrap: self.bootstrap.stats().await,
            fixtures: self.fixtures.stats().await,
            live: self.live.stats().await,
            standings: self.standings.stats().await,
            entry: self.entry.stats().await,
            element_summary: self.element_summary.stats().await,
        }
    }

    /// Removes expired entries from every instance. Returns the total removed.
    pub async fn purge_expired(&self) -> usize {
        let mut removed = 0;
        for (name, cache) in self.all() {
            let purged = cache.purge_expired().await;
            if purged > 0 {
                debug!(cache = name, purged, "purged expired entries");
            }
            removed += purged;
        }
        removed
    }

    /// Deletes every key containing `pattern` from every instance.
    pub async fn clear_matching(&self, pattern: &str) -> usize {
        let mut removed = 0;
        for (name, cache) in self.all() {
            let deleted = cache.delete_matching(pattern).await;
            if deleted > 0 {
                debug!(cache = name, deleted, pattern, "deleted matching entries");
            }
            removed += deleted;
        }
        info!(pattern, removed, "cleared cache entries by pattern");
        removed
    }

    /// Empties every instance. Returns how many live entries were dropped.
    pub async fn clear_all(&self) -> usize {
        let mut removed = 0;
        for (_, cache) in self.all() {
            removed += cache.clear().await;
        }
        info!(removed, "cleared all caches");
        removed
    }
}
