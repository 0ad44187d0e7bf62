//! Request DTOs for the proxy server API
//!
//! Defines the query strings accepted by the routes.

use serde::Deserialize;

/// Query for GET /api/fpl/league/:league_id/standings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StandingsQuery {
    /// Standings page, 1-based (defaults to 1)
    #[serde(default)]
    pub page: Option<u32>,
}

impl StandingsQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}

/// Query for DELETE /api/cache
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClearCacheQuery {
    /// Substring to match against cache keys; everything is cleared when absent
    #[serde(default)]
    pub pattern: Option<String>,
}

impl ClearCacheQuery {
    /// The pattern, treating an empty string as absent.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref().filter(|p| !p.is_empty())
    }
}
