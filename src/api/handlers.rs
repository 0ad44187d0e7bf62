//! API Handlers
//!
//! HTTP request handlers for the FPL proxy and cache administration endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::error;

use crate::cache::{CacheRegistry, RegistryStats};
use crate::config::Config;
use crate::error::{FplError, Result};
use crate::fpl::{FplClient, FplService, UpstreamHealth};
use crate::models::{ClearCacheQuery, ClearCacheResponse, HealthResponse, StandingsQuery};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FplService>,
}

impl AppState {
    pub fn new(service: FplService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Builds the upstream client and the cache registry from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = FplClient::new(config.fpl_base_url.clone())?;
        let service = FplService::new(client, CacheRegistry::new(), config.upstream_timeout());
        Ok(Self::new(service))
    }

    pub fn caches(&self) -> &CacheRegistry {
        self.service.caches()
    }
}

/// Wraps upstream JSON with a shared-cache `Cache-Control` header.
fn cached_json(value: Value, s_maxage: u32, stale_while_revalidate: u32) -> Response {
    let directive = format!(
        "public, s-maxage={s_maxage}, stale-while-revalidate={stale_while_revalidate}"
    );
    let mut response = Json(value).into_response();
    if let Ok(header_value) = HeaderValue::from_str(&directive) {
        response.headers_mut().insert(header::CACHE_CONTROL, header_value);
    }
    response
}

/// Logs a failed upstream fetch before it is turned into a response.
fn log_failure(route: &str, err: FplError) -> FplError {
    match &err {
        FplError::InvalidParameter { .. } => {}
        _ => error!(route, error = %err, "upstream fetch failed"),
    }
    err
}

/// Handler for GET /api/fpl/bootstrap
pub async fn bootstrap_handler(State(state): State<AppState>) -> Result<Response> {
    let data = state
        .service
        .bootstrap()
        .await
        .map_err(|e| log_failure("bootstrap", e))?;
    Ok(cached_json(data, 300, 600))
}

/// Handler for GET /api/fpl/fixtures
pub async fn fixtures_handler(State(state): State<AppState>) -> Result<Response> {
    let data = state
        .service
        .fixtures()
        .await
        .map_err(|e| log_failure("fixtures", e))?;
    Ok(cached_json(data, 3600, 7200))
}

/// Handler for GET /api/fpl/live/:gw
pub async fn live_handler(
    State(state): State<AppState>,
    Path(gw): Path<u32>,
) -> Result<Response> {
    let data = state
        .service
        .live_gameweek(gw)
        .await
        .map_err(|e| log_failure("live", e))?;
    Ok(cached_json(data, 60, 300))
}

/// Handler for GET /api/fpl/league/:league_id/standings?page=N
pub async fn standings_handler(
    State(state): State<AppState>,
    Path(league_id): Path<u64>,
    Query(query): Query<StandingsQuery>,
) -> Result<Response> {
    let data = state
        .service
        .classic_standings(league_id, query.page())
        .await
        .map_err(|e| log_failure("standings", e))?;
    Ok(cached_json(data, 600, 1800))
}

/// Handler for GET /api/fpl/element/:player_id/summary
pub async fn element_summary_handler(
    State(state): State<AppState>,
    Path(player_id): Path<u32>,
) -> Result<Response> {
    let data = state
        .service
        .element_summary(player_id)
        .await
        .map_err(|e| log_failure("element_summary", e))?;
    Ok(cached_json(data, 1800, 3600))
}

/// Handler for GET /api/fpl/entry/:entry_id
pub async fn entry_handler(
    State(state): State<AppState>,
    Path(entry_id): Path<u64>,
) -> Result<Response> {
    let data = state
        .service
        .entry(entry_id)
        .await
        .map_err(|e| log_failure("entry", e))?;
    Ok(cached_json(data, 600, 1800))
}

/// Handler for GET /api/fpl/entry/:entry_id/history
pub async fn entry_history_handler(
    State(state): State<AppState>,
    Path(entry_id): Path<u64>,
) -> Result<Response> {
    let data = state
        .service
        .entry_history(entry_id)
        .await
        .map_err(|e| log_failure("entry_history", e))?;
    Ok(cached_json(data, 1800, 3600))
}

/// Handler for GET /api/fpl/entry/:entry_id/event/:gw
pub async fn entry_event_handler(
    State(state): State<AppState>,
    Path((entry_id, gw)): Path<(u64, u32)>,
) -> Result<Response> {
    let data = state
        .service
        .entry_event(entry_id, gw)
        .await
        .map_err(|e| log_failure("entry_event", e))?;
    Ok(cached_json(data, 600, 3000))
}

/// Handler for GET /api/fpl/entry/:entry_id/transfers
pub async fn entry_transfers_handler(
    State(state): State<AppState>,
    Path(entry_id): Path<u64>,
) -> Result<Response> {
    let data = state
        .service
        .entry_transfers(entry_id)
        .await
        .map_err(|e| log_failure("entry_transfers", e))?;
    Ok(cached_json(data, 600, 1800))
}

/// Handler for GET /api/fpl/current-gameweek
pub async fn current_gameweek_handler(State(state): State<AppState>) -> Json<Value> {
    let gw = state.service.current_gameweek().await;
    Json(serde_json::json!({ "gameweek": gw }))
}

/// Handler for GET /api/fpl/health
///
/// 503 when any upstream endpoint check failed.
pub async fn upstream_health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<UpstreamHealth>) {
    let health = state.service.health_check().await;
    let status = if health.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(health))
}

/// Handler for GET /api/cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<RegistryStats> {
    Json(state.caches().stats().await)
}

/// Handler for DELETE /api/cache?pattern=...
pub async fn clear_cache_handler(
    State(state): State<AppState>,
    Query(query): Query<ClearCacheQuery>,
) -> Json<ClearCacheResponse> {
    let pattern = query.pattern();
    let removed = match pattern {
        Some(pattern) => state.caches().clear_matching(pattern).await,
        None => state.caches().clear_all().await,
    };

    Json(ClearCacheResponse::new(removed, pattern))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
