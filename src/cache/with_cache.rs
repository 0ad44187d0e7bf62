//! Read-through helper used by every cached fetch.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::cache::{Clock, SharedCache};

/// Returns the cached value for `key`, or runs `fetch` and caches its result.
///
/// - A hit returns immediately without calling `fetch`.
/// - On a miss the lock is released while `fetch` runs, so other operations
///   on the instance proceed in the meantime.
/// - A failed fetch is returned unchanged and nothing is stored; the next
///   call fetches again.
///
/// There is no per-key deduplication: two tasks missing the same key
/// concurrently both fetch, and the later `set` wins. Callers needing
/// single-flight behaviour must deduplicate in front of this function.
/// Likewise there is no timeout here; wrap `fetch` if one is needed.
pub async fn with_cache<V, C, E, F, Fut>(
    cache: &SharedCache<V, C>,
    key: &str,
    fetch: F,
    ttl: Option<Duration>,
) -> Result<V, E>
where
    V: Clone,
    C: Clock,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, E>>,
{
    if let Some(value) = cache.get(key).await {
        debug!(key, "cache hit");
        return Ok(value);
    }

    debug!(key, "cache miss, fetching");
    let value = fetch().await?;
    cache.set(key, value.clone(), ttl).await;

    Ok(value)
}
