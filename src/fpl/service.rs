//! Cached access to the upstream FPL API.
//!
//! Every public method goes through [`with_cache`] on the registry instance
//! for its data category, with a per-call TTL.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tokio::time::Instant;
use tracing::warn;

use crate::cache::{keys, with_cache, CacheRegistry, Clock, JsonCache, SystemClock};
use crate::error::{FplError, Result};
use crate::fpl::endpoints::{self, paths};
use crate::fpl::FplClient;

const MINUTE: Duration = Duration::from_secs(60);

// == Per-call TTLs ==
pub const BOOTSTRAP_TTL: Duration = Duration::from_secs(60 * 60);
pub const FIXTURES_TTL: Duration = Duration::from_secs(60 * 60);
pub const LIVE_TTL: Duration = MINUTE;
pub const STANDINGS_TTL: Duration = Duration::from_secs(10 * 60);
pub const ELEMENT_SUMMARY_TTL: Duration = Duration::from_secs(30 * 60);
pub const ENTRY_TTL: Duration = Duration::from_secs(10 * 60);
pub const ENTRY_HISTORY_TTL: Duration = Duration::from_secs(30 * 60);
pub const ENTRY_EVENT_TTL: Duration = Duration::from_secs(10 * 60);
pub const ENTRY_TRANSFERS_TTL: Duration = Duration::from_secs(10 * 60);

// == Upstream Health ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Error,
}

/// Reachability of the upstream endpoints the dashboard depends on.
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamHealth {
    pub status: HealthStatus,
    pub endpoints: BTreeMap<&'static str, bool>,
    /// Milliseconds per endpoint check, failed checks included
    pub latency: BTreeMap<&'static str, u64>,
}

impl UpstreamHealth {
    fn new() -> Self {
        Self {
            status: HealthStatus::Ok,
            endpoints: BTreeMap::new(),
            latency: BTreeMap::new(),
        }
    }

    fn record(&mut self, name: &'static str, result: Result<Value>, started: Instant) {
        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.latency.insert(name, elapsed);
        self.endpoints.insert(name, result.is_ok());

        if let Err(err) = result {
            warn!(endpoint = name, error = %err, "health check failed");
            self.status = HealthStatus::Error;
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == HealthStatus::Ok
    }
}

// == FPL Service ==
pub struct FplService<C = SystemClock> {
    client: FplClient,
    caches: CacheRegistry<C>,
    timeout: Duration,
}

impl<C: Clock> FplService<C> {
    pub fn new(client: FplClient, caches: CacheRegistry<C>, timeout: Duration) -> Self {
        Self {
            client,
            caches,
            timeout,
        }
    }

    pub fn caches(&self) -> &CacheRegistry<C> {
        &self.caches
    }

    pub async fn bootstrap(&self) -> Result<Value> {
        self.cached(&self.caches.bootstrap, keys::bootstrap(), paths::bootstrap(), BOOTSTRAP_TTL)
            .await
    }

    pub async fn fixtures(&self) -> Result<Value> {
        self.cached(&self.caches.fixtures, keys::fixtures(), paths::fixtures(), FIXTURES_TTL)
            .await
    }

    pub async fn live_gameweek(&self, gw: u32) -> Result<Value> {
        let gw = endpoints::gameweek(gw)?;
        self.cached(
            &self.caches.live,
            keys::live_gameweek(gw),
            paths::live_gameweek(gw),
            LIVE_TTL,
        )
        .await
    }

    pub async fn classic_standings(&self, league_id: u64, page: u32) -> Result<Value> {
        let league_id = endpoints::league_id(league_id)?;
        let page = endpoints::page(page)?;
        self.cached(
            &self.caches.standings,
            keys::standings(league_id, page),
            paths::classic_league(league_id, page),
            STANDINGS_TTL,
        )
        .await
    }

    pub async fn element_summary(&self, player_id: u32) -> Result<Value> {
        let player_id = endpoints::player_id(player_id)?;
        self.cached(
            &self.caches.element_summary,
            keys::element_summary(player_id),
            paths::element_summary(player_id),
            ELEMENT_SUMMARY_TTL,
        )
        .await
    }

    pub async fn entry(&self, entry_id: u64) -> Result<Value> {
        let entry_id = endpoints::entry_id(entry_id)?;
        self.cached(&self.caches.entry, keys::entry(entry_id), paths::entry(entry_id), ENTRY_TTL)
            .await
    }

    pub async fn entry_history(&self, entry_id: u64) -> Result<Value> {
        let entry_id = endpoints::entry_id(entry_id)?;
        self.cached(
            &self.caches.entry,
            keys::entry_history(entry_id),
            paths::entry_history(entry_id),
            ENTRY_HISTORY_TTL,
        )
        .await
    }

    pub async fn entry_event(&self, entry_id: u64, gw: u32) -> Result<Value> {
        let entry_id = endpoints::entry_id(entry_id)?;
        let gw = endpoints::gameweek(gw)?;
        self.cached(
            &self.caches.entry,
            keys::entry_event(entry_id, gw),
            paths::entry_event(entry_id, gw),
            ENTRY_EVENT_TTL,
        )
        .await
    }

    pub async fn entry_transfers(&self, entry_id: u64) -> Result<Value> {
        let entry_id = endpoints::entry_id(entry_id)?;
        self.cached(
            &self.caches.entry,
            keys::entry_transfers(entry_id),
            paths::entry_transfers(entry_id),
            ENTRY_TRANSFERS_TTL,
        )
        .await
    }

    /// Id of the gameweek flagged `is_current` in the bootstrap data.
    ///
    /// Falls back to 1 when bootstrap data is unavailable or no gameweek is
    /// current (pre-season).
    pub async fn current_gameweek(&self) -> u32 {
        match self.bootstrap().await {
            Ok(bootstrap) => current_event_id(&bootstrap).unwrap_or(1),
            Err(err) => {
                warn!(error = %err, "failed to get current gameweek, defaulting to 1");
                1
            }
        }
    }

    /// Probes bootstrap and fixtures, going through the cache like any
    /// other request.
    pub async fn health_check(&self) -> UpstreamHealth {
        let mut health = UpstreamHealth::new();

        let started = Instant::now();
        health.record("bootstrap", self.bootstrap().await, started);

        let started = Instant::now();
        health.record("fixtures", self.fixtures().await, started);

        health
    }

    /// Runs the upstream fetch through the cache, bounded by the upstream timeout.
    async fn cached(
        &self,
        cache: &JsonCache<C>,
        key: String,
        path: String,
        ttl: Duration,
    ) -> Result<Value> {
        let client = &self.client;
        let timeout = self.timeout;

        with_cache(
            cache,
            &key,
            || async move {
                match tokio::time::timeout(timeout, client.get_json(&path)).await {
                    Ok(result) => result,
                    Err(_) => Err(FplError::Timeout(timeout.as_secs())),
                }
            },
            Some(ttl),
        )
        .await
    }
}

fn current_event_id(bootstrap: &Value) -> Option<u32> {
    bootstrap
        .get("events")?
        .as_array()?
        .iter()
        .find(|event| event.get("is_current").and_then(Value::as_bool) == Some(true))?
        .get("id")?
        .as_u64()
        .and_then(|id| u32::try_from(id).ok())
}
