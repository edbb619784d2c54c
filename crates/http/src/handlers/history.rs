use axum::extract::{Query, State};
use axum::Json;
use std::sync::Arc;

use cmd_relay_core::HISTORY_PAGE_LIMIT;

use crate::api_error::ApiError;
use crate::query_types::SessionQuery;
use crate::response_types::{AnalyticsResponse, ClearHistoryResponse, HistoryResponse};
use crate::AppState;

pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let history =
        state.history_service.list_history(query.token(), HISTORY_PAGE_LIMIT).await?;
    Ok(Json(HistoryResponse { success: true, history }))
}

pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    let analytics = state.history_service.analytics(query.token()).await?;
    Ok(Json(AnalyticsResponse { success: true, analytics }))
}

pub async fn clear_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<ClearHistoryResponse>, ApiError> {
    let removed = state.history_service.clear_history(query.token()).await?;
    tracing::info!(removed, "session history cleared");
    Ok(Json(ClearHistoryResponse { success: true, message: "History cleared" }))
}
