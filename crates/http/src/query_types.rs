//! Request/query types (Deserialize)

use cmd_relay_core::DEFAULT_SESSION_TOKEN;
use serde::Deserialize;

/// Body of POST `/api/execute`.
///
/// `command` is optional at the serde level so a missing field reaches the
/// validation path (HTTP 400) instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct ExecuteRequest {
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl ExecuteRequest {
    /// Session token, defaulting to the fixed server-side literal.
    #[must_use]
    pub fn token(&self) -> &str {
        self.session_id.as_deref().unwrap_or(DEFAULT_SESSION_TOKEN)
    }
}

/// Query string for the history/analytics/clear endpoints.
#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub session_id: Option<String>,
}

impl SessionQuery {
    /// Session token, defaulting to the fixed server-side literal.
    #[must_use]
    pub fn token(&self) -> &str {
        self.session_id.as_deref().unwrap_or(DEFAULT_SESSION_TOKEN)
    }
}
