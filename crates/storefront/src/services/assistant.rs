//! Client for the remote search-normalization function.
//!
//! The assistant takes free text ("milk, bread and soap") and returns a
//! comma-separated list of canonical category terms. Failures here are
//! transient by definition; callers surface a retry prompt and stop.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Timeout for a single normalization call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the search assistant.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// No assistant endpoint is configured for this deployment.
    #[error("search assistant is not configured")]
    NotConfigured,

    /// The request failed or timed out.
    #[error("assistant request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The assistant answered with a non-success status.
    #[error("assistant returned status {0}")]
    BadStatus(reqwest::StatusCode),
}

#[derive(Serialize)]
struct NormalizeRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct NormalizeResponse {
    result: String,
}

/// HTTP client for the normalization function.
#[derive(Clone)]
pub struct SearchAssistantClient {
    http: reqwest::Client,
    endpoint: Option<String>,
}

impl SearchAssistantClient {
    /// Create a client for the given endpoint, if one is configured.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized (startup-only).
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new(endpoint: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self { http, endpoint }
    }

    /// Normalize free text into comma-separated category terms.
    ///
    /// # Errors
    ///
    /// Returns `AssistantError::NotConfigured` when no endpoint is set,
    /// and `AssistantError::Request`/`BadStatus` on transient failures.
    pub async fn normalize(&self, text: &str) -> Result<String, AssistantError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or(AssistantError::NotConfigured)?;

        let response = self
            .http
            .post(endpoint)
            .json(&NormalizeRequest { text })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AssistantError::BadStatus(response.status()));
        }

        let body: NormalizeResponse = response.json().await?;
        Ok(body.result)
    }
}
