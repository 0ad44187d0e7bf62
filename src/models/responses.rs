//! Response DTOs for the proxy server API
//!
//! Defines the structure of outgoing HTTP response bodies that are not
//! upstream JSON passed through.

use serde::Serialize;

/// Response body for DELETE /api/cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearCacheResponse {
    /// Number of live entries removed
    pub removed: usize,
    /// Pattern that was matched, None when everything was cleared
    pub pattern: Option<String>,
}

impl ClearCacheResponse {
    pub fn new(removed: usize, pattern: Option<&str>) -> Self {
        Self {
            removed,
            pattern: pattern.map(str::to_string),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Short summary of what failed
    pub error: String,
    /// Detailed message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
