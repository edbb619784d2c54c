use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One execution attempt in the session's ledger.
///
/// Created exactly once per execute call, after the upstream outcome is
/// known. Never updated afterward; deleted only by the per-session clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRecord {
    pub id: i64,
    pub session_id: i64,
    pub command: String,
    pub executed_at: DateTime<Utc>,
    pub execution_time_ms: u64,
    pub success: bool,
}

/// Tagged outcome of one upstream execution attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Upstream returned 2xx; the response body is carried verbatim.
    Success(Value),
    /// Transport failure, timeout, or non-2xx status.
    Failure(String),
}

impl Outcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// One row of the history read model: ledger entry joined with its result.
///
/// `result` holds the parsed payload, not raw text. Entries with no result
/// row (tolerated, should not occur) show both `result` and `error` as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub command: String,
    pub executed_at: DateTime<Utc>,
    pub execution_time: u64,
    pub success: bool,
    pub result: Option<Value>,
    pub error: Option<String>,
}

/// Aggregate counts over one session's ledger.
///
/// `avg_time` is computed over successful records only, rounded to the
/// nearest integer, and 0 when no successful records exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total: u64,
    pub successful: u64,
    pub failed: u64,
    #[serde(rename = "avgTime")]
    pub avg_time: i64,
}
