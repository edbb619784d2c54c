//! Helper for running synchronous storage operations from async services.

use tokio::task::spawn_blocking;

use cmd_relay_storage::StorageError;

use crate::error::ServiceError;

/// Runs a blocking storage closure on the blocking pool and flattens the
/// join and storage errors into `ServiceError`.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, ServiceError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    spawn_blocking(f)
        .await
        .map_err(|e| ServiceError::Task(e.to_string()))?
        .map_err(ServiceError::from)
}
