//! Typed API error for HTTP handlers.
//!
//! Converts domain errors into proper HTTP responses with JSON body and
//! status codes. Handlers return `Result<Json<T>, ApiError>` instead of
//! losing error context with bare `StatusCode`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use cmd_relay_service::ServiceError;

/// API error with HTTP status code and human-readable message.
///
/// Every variant renders as `{"success": false, "error": message}`; the
/// upstream variant adds the raw error body under `details`. Messages are
/// surfaced to the caller verbatim so the frontend can display them.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: invalid input from caller (missing/empty command).
    BadRequest(String),
    /// 500: the upstream execution API failed; carries diagnostic details.
    Upstream { error: String, details: Value },
    /// 500: storage or task fault. Logged server-side as well.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({"success": false, "error": message}),
            ),
            Self::Upstream { error, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({"success": false, "error": error, "details": details}),
            ),
            Self::Internal(message) => {
                tracing::error!(error = %message, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({"success": false, "error": message}),
                )
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            ServiceError::Upstream(e) => {
                Self::Upstream { error: e.message(), details: e.details() }
            },
            other => Self::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_bad_request_shape() {
        let response = ApiError::BadRequest("Command is required".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Command is required");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_upstream_error_includes_details() {
        let response = ApiError::Upstream {
            error: "execution failed".to_owned(),
            details: serde_json::json!({"code": "E_BOOM"}),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["details"]["code"], "E_BOOM");
    }
}
