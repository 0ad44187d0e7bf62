//! FPL Cache - a caching proxy in front of the Fantasy Premier League API
//!
//! Bounded in-memory caches with TTL expiration and LRU eviction, one per
//! category of upstream data.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fpl;
pub mod models;
pub mod tasks;

pub use api::{create_router, AppState};
pub use cache::{with_cache, CacheRegistry, CacheStore, SharedCache};
pub use config::Config;
pub use error::FplError;
pub use tasks::{spawn_sweep_task, SweepTask};
