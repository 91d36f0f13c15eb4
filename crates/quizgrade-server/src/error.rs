//! API error responses.

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

/// Rejections raised before a submission reaches the grader.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body is not JSON.
    #[error("Invalid JSON payload")]
    InvalidJson(#[source] serde_json::Error),

    /// The body is not an object with an `answers` array.
    #[error("Invalid payload. Expected {{ \"answers\": [...] }}")]
    InvalidPayload,

    /// An answer entry lacks `id` or `value`.
    #[error("Each answer must have \"id\" and \"value\" fields")]
    MissingAnswerFields,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson(_)
            | ApiError::InvalidPayload
            | ApiError::MissingAnswerFields => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::InvalidJson(e) => tracing::warn!(error = %e, "rejected submission"),
            other => tracing::warn!(error = %other, "rejected submission"),
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
