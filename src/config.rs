//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_FPL_BASE_URL: &str = "https://fantasy.premierleague.com/api";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Interval in seconds between expired-entry sweeps
    pub sweep_interval: u64,
    /// Base URL of the upstream FPL API, without trailing slash
    pub fpl_base_url: String,
    /// Seconds to wait for the upstream API before giving up
    pub upstream_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 300)
    /// - `FPL_BASE_URL` - Upstream API base (default: the public FPL API)
    /// - `UPSTREAM_TIMEOUT` - Upstream timeout in seconds (default: 25)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            sweep_interval: parse_var("SWEEP_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.sweep_interval),
            fpl_base_url: env::var("FPL_BASE_URL")
                .ok()
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.fpl_base_url),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.upstream_timeout),
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            sweep_interval: 300,
            fpl_base_url: DEFAULT_FPL_BASE_URL.to_string(),
            upstream_timeout: 25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval(), Duration::from_secs(300));
        assert_eq!(config.fpl_base_url, DEFAULT_FPL_BASE_URL);
        assert_eq!(config.upstream_timeout(), Duration::from_secs(25));
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the environment to avoid races between tests
        env::remove_var("SERVER_PORT");
        env::remove_var("FPL_BASE_URL");
        env::set_var("SWEEP_INTERVAL", "0");
        env::set_var("UPSTREAM_TIMEOUT", "not-a-number");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval, 300);
        assert_eq!(config.upstream_timeout, 25);
        assert_eq!(config.fpl_base_url, DEFAULT_FPL_BASE_URL);

        env::set_var("SERVER_PORT", "8080");
        env::set_var("SWEEP_INTERVAL", "60");
        env::set_var("FPL_BASE_URL", "http://localhost:9000/api/");

        let config = Config::from_env();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.sweep_interval, 60);
        assert_eq!(config.fpl_base_url, "http://localhost:9000/api");

        for name in ["SERVER_PORT", "SWEEP_INTERVAL", "FPL_BASE_URL", "UPSTREAM_TIMEOUT"] {
            env::remove_var(name);
        }
    }
}
