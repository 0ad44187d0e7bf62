//! Error types for the proxy server
//!
//! The cache itself never fails; these are the failures of upstream fetches
//! and request validation, mapped onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == FPL Error Enum ==
/// Unified error type for upstream access.
#[derive(Error, Debug)]
pub enum FplError {
    /// A path or query parameter failed validation
    #[error("Invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: &'static str },

    /// The upstream API answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The upstream API did not answer in time
    #[error("Request timeout after {0}s")]
    Timeout(u64),

    /// Connection or protocol failure talking to the upstream API
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream body was not the JSON we expected
    #[error("Invalid upstream payload: {0}")]
    Decode(String),
}

impl FplError {
    /// HTTP status reported to our own clients.
    pub fn status_code(&self) -> StatusCode {
        match self {
            FplError::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            FplError::Upstream { status: 404, .. } => StatusCode::NOT_FOUND,
            FplError::Upstream { status: 403, .. } => StatusCode::FORBIDDEN,
            FplError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            FplError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            FplError::Transport(_) | FplError::Decode(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Whether a retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            FplError::Upstream { status, .. } => *status >= 500,
            FplError::Transport(_) => true,
            _ => false,
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            FplError::InvalidParameter { .. } => "Invalid request",
            FplError::Upstream { status: 403, .. } => "Access denied",
            FplError::Upstream { status: 404, .. } => "Not found",
            FplError::Timeout(_) => {
                "FPL servers are responding slowly. Please try again in a few moments."
            }
            _ => "Failed to fetch FPL data",
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for FplError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::new(self.summary(), self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for upstream access.
pub type Result<T> = std::result::Result<T, FplError>;
