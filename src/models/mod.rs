//! Request and Response models for the proxy server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! query-string parsing and JSON response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{ClearCacheQuery, StandingsQuery};
pub use responses::{ClearCacheResponse, ErrorResponse, HealthResponse};
