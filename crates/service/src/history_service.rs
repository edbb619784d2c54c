use cmd_relay_core::{AnalyticsSummary, HistoryEntry, Session};
use cmd_relay_storage::Storage;

use crate::blocking::run_blocking;
use crate::error::ServiceError;

/// Read side of the ledger: history pages, aggregates, and the clear
/// operation. Every call resolves (and touches) the owning session first.
pub struct HistoryService {
    storage: Storage,
}

impl HistoryService {
    #[must_use]
    pub const fn new(storage: Storage) -> Self {
        Self { storage }
    }

    async fn resolve_session(&self, token: &str) -> Result<Session, ServiceError> {
        let storage = self.storage.clone();
        let token = token.to_owned();
        run_blocking(move || storage.resolve_or_create_session(&token)).await
    }

    /// History page for the session, newest first, capped at the page bound.
    ///
    /// # Errors
    /// Returns error on any storage fault.
    pub async fn list_history(
        &self,
        token: &str,
        limit: usize,
    ) -> Result<Vec<HistoryEntry>, ServiceError> {
        let session = self.resolve_session(token).await?;
        let storage = self.storage.clone();
        run_blocking(move || storage.list_history(session.id, limit)).await
    }

    /// Aggregate counts for the session.
    ///
    /// The four reads are independent: they run concurrently and are
    /// combined only after all complete. A fault in any one fails the whole
    /// call instead of silently corrupting the others.
    ///
    /// # Errors
    /// Returns error on any storage fault.
    pub async fn analytics(&self, token: &str) -> Result<AnalyticsSummary, ServiceError> {
        let session = self.resolve_session(token).await?;
        let sid = session.id;

        let total = {
            let storage = self.storage.clone();
            run_blocking(move || storage.count_commands(sid))
        };
        let successful = {
            let storage = self.storage.clone();
            run_blocking(move || storage.count_commands_by_success(sid, true))
        };
        let failed = {
            let storage = self.storage.clone();
            run_blocking(move || storage.count_commands_by_success(sid, false))
        };
        let avg_time = {
            let storage = self.storage.clone();
            run_blocking(move || storage.avg_successful_execution_time(sid))
        };

        let (total, successful, failed, avg_time) =
            tokio::try_join!(total, successful, failed, avg_time)?;
        Ok(AnalyticsSummary { total, successful, failed, avg_time })
    }

    /// Delete the session's ledger and results. Returns the number of
    /// ledger entries removed.
    ///
    /// # Errors
    /// Returns error on any storage fault.
    pub async fn clear_history(&self, token: &str) -> Result<usize, ServiceError> {
        let session = self.resolve_session(token).await?;
        let storage = self.storage.clone();
        run_blocking(move || storage.clear_history(session.id)).await
    }
}
