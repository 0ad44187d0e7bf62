//! Cache key builders.
//!
//! Every key is a category tag followed by `:name=value` segments in a fixed
//! order, e.g. `standings:league=12:page=3`. Numeric parameters cannot
//! contain the delimiters; free-text parameters are percent-escaped, so two
//! different requests never share a key.

use std::fmt::Write;

// == Categories ==
pub const BOOTSTRAP: &str = "bootstrap-static";
pub const FIXTURES: &str = "fixtures";
pub const LIVE: &str = "live";
pub const STANDINGS: &str = "standings";
pub const ENTRY: &str = "entry";
pub const ENTRY_HISTORY: &str = "entry-history";
pub const ENTRY_EVENT: &str = "entry-event";
pub const ENTRY_TRANSFERS: &str = "entry-transfers";
pub const ELEMENT_SUMMARY: &str = "element-summary";
pub const CALCULATED: &str = "calc";

/// Key for the season-wide reference data.
pub fn bootstrap() -> String {
    BOOTSTRAP.to_string()
}

pub fn fixtures() -> String {
    FIXTURES.to_string()
}

pub fn live_gameweek(gw: u32) -> String {
    format!("{LIVE}:gw={gw}")
}

/// Key for one page of a classic league table. Pages start at 1.
pub fn standings(league_id: u64, page: u32) -> String {
    format!("{STANDINGS}:league={league_id}:page={page}")
}

pub fn entry(entry_id: u64) -> String {
    format!("{ENTRY}:id={entry_id}")
}

pub fn entry_history(entry_id: u64) -> String {
    format!("{ENTRY_HISTORY}:id={entry_id}")
}

pub fn entry_event(entry_id: u64, gw: u32) -> String {
    format!("{ENTRY_EVENT}:id={entry_id}:gw={gw}")
}

pub fn entry_transfers(entry_id: u64) -> String {
    format!("{ENTRY_TRANSFERS}:id={entry_id}")
}

pub fn element_summary(player_id: u32) -> String {
    format!("{ELEMENT_SUMMARY}:id={player_id}")
}

/// Key for a derived result identified by a calculation name and its
/// serialized parameters.
pub fn calculated(kind: &str, params: &str) -> String {
    format!("{CALCULATED}:type={}:params={}", escape(kind), escape(params))
}

/// Percent-escapes the characters that carry meaning inside a key.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '%' | ':' | '=' => {
                let _ = write!(out, "%{:02X}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fixed_keys() {
        assert_eq!(bootstrap(), "bootstrap-static");
        assert_eq!(fixtures(), "fixtures");
    }

    #[test]
    fn test_parameterised_keys() {
        assert_eq!(live_gameweek(7), "live:gw=7");
        assert_eq!(standings(314, 2), "standings:league=314:page=2");
        assert_eq!(entry_event(99, 12), "entry-event:id=99:gw=12");
        assert_eq!(element_summary(301), "element-summary:id=301");
    }

    #[test]
    fn test_delimiters_prevent_collisions() {
        // Without separators these would both read "standings1223"
        assert_ne!(standings(12, 23), standings(122, 3));
        assert_ne!(entry_event(1, 23), entry_event(12, 3));
        assert_ne!(entry(5), entry_history(5));
        assert_ne!(entry(5), entry_transfers(5));
    }

    #[test]
    fn test_calculated_escapes_free_text() {
        assert_eq!(calculated("luck", "league=1"), "calc:type=luck:params=league%3D1");
        assert_ne!(calculated("a:params=b", "c"), calculated("a", "b:params=c"));
        assert_eq!(calculated("eo", "50%"), "calc:type=eo:params=50%25");
    }

    #[test]
    fn test_same_request_same_key() {
        assert_eq!(standings(10, 1), standings(10, 1));
        assert_eq!(calculated("chips", "x"), calculated("chips", "x"));
    }

    #[test]
    fn test_keys_unique_across_categories() {
        let keys: Vec<String> = vec![
            bootstrap(),
            fixtures(),
            live_gameweek(1),
            standings(1, 1),
            entry(1),
            entry_history(1),
            entry_event(1, 1),
            entry_transfers(1),
            element_summary(1),
            calculated("1", "1"),
        ];
        let unique: HashSet<&String> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
    }
}
