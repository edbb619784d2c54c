use chrono::Utc;
use cmd_relay_core::Session;
use rusqlite::params;

use super::{get_conn, parse_timestamp, Storage};
use crate::error::StorageError;

impl Storage {
    /// Resolve the session owning `token`, creating it on first sight.
    ///
    /// Single upsert keyed by the UNIQUE token column: a new row gets
    /// `created_at = last_active = now`, an existing row only has
    /// `last_active` touched. Two concurrent first-contact requests cannot
    /// produce duplicate rows.
    ///
    /// # Errors
    /// Returns error if the database statement fails.
    pub fn resolve_or_create_session(&self, token: &str) -> Result<Session, StorageError> {
        let conn = get_conn(&self.pool)?;
        let now = Utc::now().to_rfc3339();
        let session = conn.query_row(
            "INSERT INTO sessions (token, created_at, last_active)
             VALUES (?1, ?2, ?2)
             ON CONFLICT(token) DO UPDATE SET last_active = excluded.last_active
             RETURNING id, token, created_at, last_active",
            params![token, now],
            Self::row_to_session,
        )?;
        Ok(session)
    }

    /// Get session by token without creating or touching it.
    ///
    /// # Errors
    /// Returns error if the database query fails.
    pub fn get_session(&self, token: &str) -> Result<Option<Session>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(
            "SELECT id, token, created_at, last_active FROM sessions WHERE token = ?1",
        )?;
        let mut rows = stmt.query(params![token])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Self::row_to_session(row)?))
        } else {
            Ok(None)
        }
    }

    fn row_to_session(row: &rusqlite::Row<'_>) -> rusqlite::Result<Session> {
        Ok(Session {
            id: row.get(0)?,
            token: row.get(1)?,
            created_at: parse_timestamp(&row.get::<_, String>(2)?)?,
            last_active: parse_timestamp(&row.get::<_, String>(3)?)?,
        })
    }
}
