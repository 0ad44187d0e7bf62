//! FPL Module
//!
//! Upstream API access: endpoint paths, the HTTP client, and the cached
//! service every proxy route goes through.

mod client;
pub mod endpoints;
mod service;

pub use client::{FplClient, RetryPolicy, USER_AGENT};
pub use service::{FplService, HealthStatus, UpstreamHealth};
