use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use crate::api_error::ApiError;
use crate::query_types::ExecuteRequest;
use crate::response_types::ExecuteResponse;
use crate::AppState;

pub async fn execute(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExecuteRequest>,
) -> Result<Json<ExecuteResponse>, ApiError> {
    let command = req.command.as_deref().unwrap_or("");
    let execution = state.relay_service.execute(req.token(), command).await?;
    Ok(Json(ExecuteResponse {
        success: true,
        data: execution.payload,
        execution_time: execution.execution_time_ms,
        message: "Command executed successfully",
    }))
}
