//! Upstream endpoint paths and request parameter validation.

use crate::error::{FplError, Result};

pub const MAX_GAMEWEEK: u32 = 38;

// == Upstream Paths ==
/// Paths relative to the API base URL. All end in `/` as the upstream expects.
pub mod paths {
    pub fn bootstrap() -> String {
        "/bootstrap-static/".to_string()
    }

    pub fn fixtures() -> String {
        "/fixtures/".to_string()
    }

    pub fn live_gameweek(gw: u32) -> String {
        format!("/event/{gw}/live/")
    }

    pub fn classic_league(league_id: u64, page: u32) -> String {
        format!("/leagues-classic/{league_id}/standings/?page_standings={page}")
    }

    pub fn element_summary(player_id: u32) -> String {
        format!("/element-summary/{player_id}/")
    }

    pub fn entry(entry_id: u64) -> String {
        format!("/entry/{entry_id}/")
    }

    pub fn entry_history(entry_id: u64) -> String {
        format!("/entry/{entry_id}/history/")
    }

    pub fn entry_event(entry_id: u64, gw: u32) -> String {
        format!("/entry/{entry_id}/event/{gw}/")
    }

    pub fn entry_transfers(entry_id: u64) -> String {
        format!("/entry/{entry_id}/transfers/")
    }
}

// == Validators ==
pub fn gameweek(gw: u32) -> Result<u32> {
    if (1..=MAX_GAMEWEEK).contains(&gw) {
        Ok(gw)
    } else {
        Err(FplError::InvalidParameter {
            name: "gameweek",
            reason: "must be between 1 and 38",
        })
    }
}

pub fn entry_id(id: u64) -> Result<u64> {
    if id > 0 && id < 10_000_000 {
        Ok(id)
    } else {
        Err(FplError::InvalidParameter {
            name: "entry id",
            reason: "must be a valid positive number",
        })
    }
}

pub fn league_id(id: u64) -> Result<u64> {
    if id > 0 {
        Ok(id)
    } else {
        Err(FplError::InvalidParameter {
            name: "league id",
            reason: "must be a positive number",
        })
    }
}

pub fn player_id(id: u32) -> Result<u32> {
    if id > 0 && id < 1_000 {
        Ok(id)
    } else {
        Err(FplError::InvalidParameter {
            name: "player id",
            reason: "must be between 1 and 999",
        })
    }
}

pub fn page(page: u32) -> Result<u32> {
    if page >= 1 {
        Ok(page)
    } else {
        Err(FplError::InvalidParameter {
            name: "page",
            reason: "must be a positive number",
        })
    }
}
