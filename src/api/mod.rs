//! API Module
//!
//! HTTP handlers and routing for the FPL proxy.
//!
//! # Endpoints
//! - `GET /api/fpl/bootstrap` - Season bootstrap data
//! - `GET /api/fpl/fixtures` - All fixtures
//! - `GET /api/fpl/current-gameweek` - Id of the current gameweek
//! - `GET /api/fpl/health` - Upstream reachability and latency
//! - `GET /api/fpl/live/:gw` - Live gameweek data
//! - `GET /api/fpl/league/:league_id/standings?page=N` - Classic league standings
//! - `GET /api/fpl/element/:player_id/summary` - Player summary
//! - `GET /api/fpl/entry/:entry_id[/history|/event/:gw|/transfers]` - Manager data
//! - `GET /api/cache/stats` - Statistics for every cache instance
//! - `DELETE /api/cache?pattern=...` - Clear matching keys, or everything
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
