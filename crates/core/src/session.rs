use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One anonymous browser session, keyed by an opaque client-held token.
///
/// Exactly one row exists per distinct token; `last_active` is touched on
/// every read or write scoped to the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

/// Token used when the client does not supply a `session_id`.
pub const DEFAULT_SESSION_TOKEN: &str = "default";
