//! HTTP API server for cmd-relay.

mod api_error;
mod handlers;
mod query_types;
mod response_types;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use cmd_relay_service::{HistoryService, RelayService};
use cmd_relay_storage::Storage;

pub use api_error::ApiError;
pub use query_types::{ExecuteRequest, SessionQuery};
pub use response_types::{
    AnalyticsResponse, ClearHistoryResponse, ExecuteResponse, HealthResponse, HistoryResponse,
};

/// Shared application state for all HTTP handlers.
///
/// Wrapped in `Arc` for thread-safe sharing across handlers. The storage
/// handle is kept alongside the services for the health probe.
pub struct AppState {
    pub storage: Storage,
    pub relay_service: Arc<RelayService>,
    pub history_service: Arc<HistoryService>,
}

/// Build the API router.
///
/// CORS is permissive: the surface is consumed directly from browser pages
/// served on other origins.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health::health))
        .route("/api/execute", post(handlers::execute::execute))
        .route(
            "/api/history",
            get(handlers::history::get_history).delete(handlers::history::clear_history),
        )
        .route("/api/analytics", get(handlers::history::get_analytics))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
