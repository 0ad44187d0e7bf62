//! Expired Entry Sweep
//!
//! Background task that periodically removes expired entries from every
//! cache instance. Only reclaims memory for keys that are never read again;
//! reads already ignore expired entries on their own.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheRegistry, Clock};

// == Sweep Task ==
/// Handle to the running sweep.
///
/// Dropping the handle leaves the task running; call [`SweepTask::stop`] to
/// cancel it.
#[derive(Debug)]
pub struct SweepTask {
    handle: JoinHandle<()>,
}

impl SweepTask {
    /// Cancels the sweep and waits for the task to wind down.
    pub async fn stop(self) {
        self.handle.abort();
        let _ = self.handle.await;
        info!("Cache sweep stopped");
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawns a background task that purges expired entries every `interval`.
///
/// # Example
/// ```ignore
/// let caches = CacheRegistry::new();
/// let sweep = spawn_sweep_task(caches.clone(), Duration::from_secs(300));
/// // Later, during shutdown:
/// sweep.stop().await;
/// ```
pub fn spawn_sweep_task<C: Clock>(caches: CacheRegistry<C>, interval: Duration) -> SweepTask {
    let handle = tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "Starting cache sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = caches.purge_expired().await;
            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    });

    SweepTask { handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{keys, MockClock};
    use serde_json::json;

    const INTERVAL: Duration = Duration::from_secs(300);

    async fn run_one_interval() {
        tokio::time::sleep(INTERVAL + Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_removes_expired_entries() {
        let clock = MockClock::new(0);
        let caches = CacheRegistry::with_clock(clock.clone());
        caches.live.set(keys::live_gameweek(1), json!(1), None).await;

        let sweep = spawn_sweep_task(caches.clone(), INTERVAL);
        clock.advance(Duration::from_secs(61));
        run_one_interval().await;

        assert_eq!(caches.live.len().await, 0, "expired entry should have been swept");
        assert_eq!(caches.live.counters().await.expirations, 1);

        sweep.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_preserves_valid_entries() {
        let clock = MockClock::new(0);
        let caches = CacheRegistry::with_clock(clock.clone());
        caches.bootstrap.set(keys::bootstrap(), json!({"events": []}), None).await;

        let sweep = spawn_sweep_task(caches.clone(), INTERVAL);
        clock.advance(Duration::from_secs(120));
        run_one_interval().await;

        assert_eq!(caches.bootstrap.len().await, 1);
        assert_eq!(
            caches.bootstrap.get(&keys::bootstrap()).await,
            Some(json!({"events": []}))
        );

        sweep.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_sweep_no_longer_runs() {
        let clock = MockClock::new(0);
        let caches = CacheRegistry::with_clock(clock.clone());
        caches.live.set(keys::live_gameweek(2), json!(2), None).await;

        let sweep = spawn_sweep_task(caches.clone(), INTERVAL);
        sweep.stop().await;

        clock.advance(Duration::from_secs(61));
        run_one_interval().await;

        // Still physically present; only a read or an explicit purge removes it now
        assert_eq!(caches.live.len().await, 1);
        assert_eq!(caches.live.get(&keys::live_gameweek(2)).await, None);
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let sweep = spawn_sweep_task(CacheRegistry::new(), Duration::from_secs(1));
        assert!(!sweep.is_finished());
        sweep.stop().await;
    }
}
