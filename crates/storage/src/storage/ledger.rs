use chrono::{DateTime, Utc};
use cmd_relay_core::{CommandRecord, HistoryEntry, Outcome, HISTORY_PAGE_LIMIT};
use rusqlite::params;
use serde_json::Value;

use super::{get_conn, log_row_error, parse_json, parse_timestamp, Storage};
use crate::error::StorageError;

impl Storage {
    /// Record one execution attempt and its result in a single transaction.
    ///
    /// Inserts the ledger row (success flag derived from the outcome) and
    /// exactly one results row: payload for `Outcome::Success`, error
    /// message for `Outcome::Failure`. Returns the created ledger record.
    ///
    /// # Errors
    /// Returns error if serialization or either insert fails; the
    /// transaction rolls back and neither row is kept.
    pub fn record_execution(
        &self,
        session_id: i64,
        command: &str,
        executed_at: DateTime<Utc>,
        execution_time_ms: u64,
        outcome: &Outcome,
    ) -> Result<CommandRecord, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO commands (session_id, command, executed_at, execution_time, success)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                session_id,
                command,
                executed_at.to_rfc3339(),
                execution_time_ms as i64,
                outcome.is_success(),
            ],
        )?;
        let command_id = tx.last_insert_rowid();
        match outcome {
            Outcome::Success(payload) => {
                let payload_text = serde_json::to_string(payload)?;
                tx.execute(
                    "INSERT INTO results (command_id, result_data) VALUES (?1, ?2)",
                    params![command_id, payload_text],
                )?;
            },
            Outcome::Failure(message) => {
                tx.execute(
                    "INSERT INTO results (command_id, error_message) VALUES (?1, ?2)",
                    params![command_id, message],
                )?;
            },
        }
        tx.commit()?;
        Ok(CommandRecord {
            id: command_id,
            session_id,
            command: command.to_owned(),
            executed_at,
            execution_time_ms,
            success: outcome.is_success(),
        })
    }

    /// Get the session's history page: ledger entries left-joined with
    /// results, newest first. `limit` is capped at the page bound.
    ///
    /// # Errors
    /// Returns error if the database query fails. Rows that fail to parse
    /// are logged and skipped.
    pub fn list_history(
        &self,
        session_id: i64,
        limit: usize,
    ) -> Result<Vec<HistoryEntry>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let limit = limit.min(HISTORY_PAGE_LIMIT);
        let mut stmt = conn.prepare(
            "SELECT c.id, c.command, c.executed_at, c.execution_time, c.success,
                    r.result_data, r.error_message
               FROM commands c
               LEFT JOIN results r ON r.command_id = c.id
              WHERE c.session_id = ?1
              ORDER BY c.executed_at DESC, c.id DESC
              LIMIT ?2",
        )?;
        let entries = stmt
            .query_map(params![session_id, limit as i64], Self::row_to_history_entry)?
            .filter_map(log_row_error)
            .collect();
        Ok(entries)
    }

    /// Delete the session's results, then its commands, as one transaction.
    /// Children go first so a partial failure can never orphan a result row.
    /// Returns the number of ledger entries removed.
    ///
    /// # Errors
    /// Returns error if either delete fails; the transaction rolls back.
    pub fn clear_history(&self, session_id: i64) -> Result<usize, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction()?;
        tx.execute(
            "DELETE FROM results WHERE command_id IN
                (SELECT id FROM commands WHERE session_id = ?1)",
            params![session_id],
        )?;
        let removed = tx.execute("DELETE FROM commands WHERE session_id = ?1", params![session_id])?;
        tx.commit()?;
        Ok(removed)
    }

    fn row_to_history_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<HistoryEntry> {
        let result_data: Option<String> = row.get(5)?;
        Ok(HistoryEntry {
            id: row.get(0)?,
            command: row.get(1)?,
            executed_at: parse_timestamp(&row.get::<_, String>(2)?)?,
            execution_time: row.get::<_, i64>(3)? as u64,
            success: row.get(4)?,
            result: result_data.as_deref().map(parse_json::<Value>).transpose()?,
            error: row.get(6)?,
        })
    }
}
