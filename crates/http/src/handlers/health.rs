use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use crate::response_types::HealthResponse;
use crate::AppState;

/// Health probe. `database` reflects a live ping so the frontend can flip
/// its status indicator to offline when the store is gone.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let storage = state.storage.clone();
    let database = match tokio::task::spawn_blocking(move || storage.ping()).await {
        Ok(Ok(())) => "connected",
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "health ping failed");
            "unavailable"
        },
        Err(e) => {
            tracing::warn!(error = %e, "health ping task failed");
            "unavailable"
        },
    };
    Json(HealthResponse {
        status: "OK",
        message: "cmd-relay backend is running",
        database,
    })
}
