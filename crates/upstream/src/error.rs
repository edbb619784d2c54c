//! Typed error enum for the upstream executor crate.

use serde_json::Value;
use thiserror::Error;

/// Sentinel shown when the upstream produced no interpretable error body.
const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Errors from the third-party execution API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Network failure or timeout before a response arrived.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx upstream status. `message` is the error body's `message`
    /// field when present, else a generic status message.
    #[error("upstream status {code}: {message}")]
    Status { code: u16, message: String, body: Value },
    /// HTTP client could not be built (TLS backend failure).
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl UpstreamError {
    /// Classify a non-2xx response from its status code and raw body.
    pub(crate) fn from_status(code: u16, body: String) -> Self {
        let parsed: Option<Value> = serde_json::from_str(&body).ok();
        let message = parsed
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| format!("upstream request failed with status {code}"));
        let body = if body.trim().is_empty() {
            Value::String(UNKNOWN_ERROR.to_owned())
        } else {
            parsed.unwrap_or(Value::String(body))
        };
        Self::Status { code, message, body }
    }

    /// Human-readable failure message, persisted in the ledger and shown
    /// to the end user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Raw upstream error body for diagnostic display, or the sentinel
    /// when no body exists.
    #[must_use]
    pub fn details(&self) -> Value {
        match self {
            Self::Status { body, .. } => body.clone(),
            Self::Transport(_) | Self::ClientInit(_) => Value::String(UNKNOWN_ERROR.to_owned()),
        }
    }
}
