use rusqlite::params;

use super::{get_conn, Storage};
use crate::error::StorageError;

/// Aggregate reads over one session's ledger.
///
/// Each aggregate is its own method so the service layer can issue the four
/// reads concurrently and combine them only after all complete.
impl Storage {
    /// Total execution attempts recorded for the session.
    ///
    /// # Errors
    /// Returns error if the database query fails.
    pub fn count_commands(&self, session_id: i64) -> Result<u64, StorageError> {
        let conn = get_conn(&self.pool)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM commands WHERE session_id = ?1",
            params![session_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Attempts with the given success flag.
    ///
    /// # Errors
    /// Returns error if the database query fails.
    pub fn count_commands_by_success(
        &self,
        session_id: i64,
        success: bool,
    ) -> Result<u64, StorageError> {
        let conn = get_conn(&self.pool)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM commands WHERE session_id = ?1 AND success = ?2",
            params![session_id, success],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Average execution time over successful attempts, rounded to the
    /// nearest millisecond; 0 when the session has no successful attempts.
    ///
    /// # Errors
    /// Returns error if the database query fails.
    pub fn avg_successful_execution_time(&self, session_id: i64) -> Result<i64, StorageError> {
        let conn = get_conn(&self.pool)?;
        let avg: Option<f64> = conn.query_row(
            "SELECT AVG(execution_time) FROM commands WHERE session_id = ?1 AND success = 1",
            params![session_id],
            |row| row.get(0),
        )?;
        Ok(avg.map_or(0, |v| v.round() as i64))
    }
}
