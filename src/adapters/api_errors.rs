use crate::domain::error::PipelineError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Newtype so the domain error can be returned straight from axum handlers.
pub struct ApiError(pub PipelineError);

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self(err)
    }
}

// The provider only reads the status code; bodies stay generic so nothing
// about our configuration or upstreams leaks back to the caller.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            PipelineError::Authentication(reason) => {
                tracing::warn!("webhook rejected: {reason}");
                (StatusCode::BAD_REQUEST, "Verification failed")
            }
            PipelineError::Parse(err) => {
                tracing::warn!("malformed webhook body: {err}");
                (StatusCode::BAD_REQUEST, "Malformed webhook payload")
            }
            PipelineError::Validation(msg) => {
                tracing::warn!("invalid webhook body: {msg}");
                (StatusCode::BAD_REQUEST, "Malformed webhook payload")
            }
            PipelineError::Resolution { message, .. } => {
                tracing::error!("transaction lookup failed: {message}");
                (StatusCode::BAD_GATEWAY, "Transaction lookup failed")
            }
            PipelineError::Dispatch { message, .. } => {
                tracing::error!("queue publish failed: {message}");
                (StatusCode::BAD_GATEWAY, "Event dispatch failed")
            }
            PipelineError::Config(err) => {
                tracing::error!("config error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        };

        let body = serde_json::json!({ "message": message });

        (status, Json(body)).into_response()
    }
}
