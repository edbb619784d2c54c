use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde_json::Value;

use cmd_relay_core::Outcome;
use cmd_relay_storage::Storage;
use cmd_relay_upstream::UpstreamClient;

use crate::blocking::run_blocking;
use crate::error::ServiceError;

/// Result of one successful relay round-trip.
#[derive(Debug, Clone)]
pub struct Execution {
    /// Upstream response body, verbatim.
    pub payload: Value,
    /// Wall-clock duration of the upstream call, in milliseconds.
    pub execution_time_ms: u64,
}

/// Owns the execute flow: validate, resolve session, call upstream, record.
pub struct RelayService {
    storage: Storage,
    upstream: Arc<UpstreamClient>,
}

impl RelayService {
    #[must_use]
    pub const fn new(storage: Storage, upstream: Arc<UpstreamClient>) -> Self {
        Self { storage, upstream }
    }

    /// Relay one command for the session identified by `token`.
    ///
    /// The ledger write happens after the upstream call resolves, success or
    /// failure, and is best-effort: a storage fault at that point is logged
    /// and does not change the outcome the caller sees.
    ///
    /// # Errors
    /// `InvalidInput` for an empty command (nothing persisted, no session
    /// row created), `Storage` if the session cannot be resolved, `Upstream`
    /// when the execution API fails.
    pub async fn execute(&self, token: &str, command: &str) -> Result<Execution, ServiceError> {
        let command = command.trim().to_owned();
        if command.is_empty() {
            return Err(ServiceError::InvalidInput("Command is required".to_owned()));
        }

        let session = {
            let storage = self.storage.clone();
            let token = token.to_owned();
            run_blocking(move || storage.resolve_or_create_session(&token)).await?
        };

        tracing::info!(session = %token, "executing command upstream");
        let started = Instant::now();
        let result = self.upstream.execute(&command, token).await;
        let execution_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let outcome = match &result {
            Ok(payload) => Outcome::Success(payload.clone()),
            Err(e) => Outcome::Failure(e.message()),
        };
        self.record(session.id, command, execution_time_ms, outcome).await;

        match result {
            Ok(payload) => Ok(Execution { payload, execution_time_ms }),
            Err(e) => Err(ServiceError::Upstream(e)),
        }
    }

    /// Best-effort ledger write; failures are logged, never surfaced.
    async fn record(
        &self,
        session_id: i64,
        command: String,
        execution_time_ms: u64,
        outcome: Outcome,
    ) {
        let storage = self.storage.clone();
        let executed_at = Utc::now();
        let recorded = run_blocking(move || {
            storage.record_execution(session_id, &command, executed_at, execution_time_ms, &outcome)
        })
        .await;
        match recorded {
            Ok(record) => {
                tracing::debug!(command_id = record.id, success = record.success, "execution recorded");
            },
            Err(e) => tracing::error!(error = %e, "failed to record execution attempt"),
        }
    }
}
