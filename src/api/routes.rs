//! API Routes
//!
//! Configures the Axum router with the FPL proxy and cache endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    bootstrap_handler, cache_stats_handler, clear_cache_handler, current_gameweek_handler,
    element_summary_handler, entry_event_handler, entry_handler, entry_history_handler,
    entry_transfers_handler, fixtures_handler, health_handler, live_handler, standings_handler,
    upstream_health_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin, the dashboard is served from elsewhere
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let fpl = Router::new()
        .route("/bootstrap", get(bootstrap_handler))
        .route("/fixtures", get(fixtures_handler))
        .route("/current-gameweek", get(current_gameweek_handler))
        .route("/health", get(upstream_health_handler))
        .route("/live/:gw", get(live_handler))
        .route("/league/:league_id/standings", get(standings_handler))
        .route("/element/:player_id/summary", get(element_summary_handler))
        .route("/entry/:entry_id", get(entry_handler))
        .route("/entry/:entry_id/history", get(entry_history_handler))
        .route("/entry/:entry_id/event/:gw", get(entry_event_handler))
        .route("/entry/:entry_id/transfers", get(entry_transfers_handler));

    Router::new()
        .nest("/api/fpl", fpl)
        .route("/api/cache/stats", get(cache_stats_handler))
        .route("/api/cache", delete(clear_cache_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
