//! Shared Cache Module
//!
//! Thread-safe handle around a [`CacheStore`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::cache::{CacheCounters, CacheStats, CacheStore, Clock, SystemClock};

// == Shared Cache ==
/// Cloneable handle to one cache instance.
///
/// Each method takes the instance lock once, so individual operations never
/// interleave. Reads take the write lock because they update recency.
pub struct SharedCache<V, C = SystemClock> {
    inner: Arc<RwLock<CacheStore<V, C>>>,
}

impl<V, C> Clone for SharedCache<V, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> SharedCache<V, SystemClock> {
    /// Creates a new shared cache with the given capacity and default TTL.
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        Self::from_store(CacheStore::new(capacity, default_ttl))
    }
}

impl<V: Clone, C: Clock> SharedCache<V, C> {
    /// Creates a shared cache that reads time from `clock`.
    pub fn with_clock(capacity: usize, default_ttl: Duration, clock: C) -> Self {
        Self::from_store(CacheStore::with_clock(capacity, default_ttl, clock))
    }

    pub fn from_store(store: CacheStore<V, C>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        self.inner.write().await.set(key, value, ttl);
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.write().await.get(key)
    }

    pub async fn has(&self, key: &str) -> bool {
        self.inner.write().await.has(key)
    }

    pub async fn delete(&self, key: &str) -> bool {
        self.inner.write().await.delete(key)
    }

    /// Empties the instance. Returns how many live entries were dropped.
    pub async fn clear(&self) -> usize {
        self.inner.write().await.clear()
    }

    pub async fn keys(&self) -> Vec<String> {
        self.inner.write().await.keys()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.write().await.stats()
    }

    pub async fn purge_expired(&self) -> usize {
        self.inner.write().await.purge_expired()
    }

    /// Deletes every live key containing `pattern`. Returns how many were removed.
    pub async fn delete_matching(&self, pattern: &str) -> usize {
        let mut store = self.inner.write().await;
        let doomed: Vec<String> = store
            .keys()
            .into_iter()
            .filter(|key| key.contains(pattern))
            .collect();
        let mut removed = 0;
        for key in &doomed {
            if store.delete(key) {
                removed += 1;
            }
        }
        removed
    }

    pub async fn counters(&self) -> CacheCounters {
        self.inner.read().await.counters()
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
