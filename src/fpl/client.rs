//! Upstream HTTP client with retry on server and transport errors.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{FplError, Result};

pub const USER_AGENT: &str = "FPL-WebApp/1.0";

// == Retry Policy ==
/// Exponential backoff: `base_delay * 2^attempt` between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

// == FPL Client ==
#[derive(Debug, Clone)]
pub struct FplClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl FplClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_retry(base_url, RetryPolicy::default())
    }

    pub fn with_retry(base_url: impl Into<String>, retry: RetryPolicy) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs `path` and parses the body as JSON.
    ///
    /// 4xx answers fail immediately; 5xx answers and transport errors are
    /// retried according to the retry policy.
    pub async fn get_json(&self, path: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let attempts = self.retry.max_attempts.max(1);

        let mut attempt = 0;
        loop {
            match self.try_get_json(&url).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt + 1 < attempts => {
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        %url,
                        attempt = attempt + 1,
                        ?delay,
                        error = %err,
                        "upstream request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn try_get_json(&self, url: &str) -> Result<Value> {
        debug!(url, "fetching upstream");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FplError::Upstream {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FplError::Decode(e.to_string()))
    }
}
