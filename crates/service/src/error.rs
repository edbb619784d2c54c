//! Typed error enum for the service layer.
//!
//! Unifies storage and upstream failures into a single error type, enabling
//! callers to match on specific failure modes instead of downcasting opaque
//! `anyhow::Error` boxes.

use cmd_relay_storage::StorageError;
use cmd_relay_upstream::UpstreamError;
use thiserror::Error;

/// Service-layer error unifying storage and upstream failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (pool, SQL, corrupt row).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// The upstream execution API call failed.
    #[error("upstream: {0}")]
    Upstream(#[from] UpstreamError),

    /// Caller provided invalid input (empty command).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A blocking storage task could not be joined.
    #[error("blocking task: {0}")]
    Task(String),
}

impl ServiceError {
    /// Whether this error represents a caller mistake (HTTP 400 class).
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
