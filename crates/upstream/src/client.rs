use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use cmd_relay_core::{env_parse_with_default, DEFAULT_UPSTREAM_TIMEOUT_SECS};

use crate::error::UpstreamError;

/// Request body sent to the execution API.
#[derive(Serialize)]
struct ExecuteBody<'a> {
    command: &'a str,
    session_id: &'a str,
}

/// Client for the third-party command-execution API.
pub struct UpstreamClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("client", &self.client)
            .field("api_key", &"***")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl UpstreamClient {
    /// Creates a new client with the configured API key and endpoint URL.
    /// The timeout comes from `CMD_RELAY_UPSTREAM_TIMEOUT_SECS` (default 30s).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: String, endpoint: String) -> Result<Self, UpstreamError> {
        let timeout_secs =
            env_parse_with_default("CMD_RELAY_UPSTREAM_TIMEOUT_SECS", DEFAULT_UPSTREAM_TIMEOUT_SECS);
        Self::with_timeout(api_key, endpoint, Duration::from_secs(timeout_secs))
    }

    /// Creates a new client with an explicit timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(
        api_key: String,
        endpoint: String,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let endpoint = endpoint.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::ClientInit(e.to_string()))?;
        Ok(Self { client, api_key, endpoint })
    }

    /// Returns the configured endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute one command upstream and return the response body verbatim.
    ///
    /// Single attempt, bounded by the client timeout. The payload shape is
    /// opaque to this system.
    ///
    /// # Errors
    /// Returns an error on transport failure, timeout, or a non-2xx status;
    /// none of these are retried.
    pub async fn execute(
        &self,
        command: &str,
        session_token: &str,
    ) -> Result<Value, UpstreamError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&ExecuteBody { command, session_id: session_token })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<Value>().await?);
        }

        let body =
            response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
        tracing::warn!(code = status.as_u16(), "upstream returned error status");
        Err(UpstreamError::from_status(status.as_u16(), body))
    }
}
