use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use libris_core::error::{MutationError, RetrievalError};

/// Wire-facing handler error. Storage detail goes to the log; the response
/// body carries only a generic `{"message"}`.
#[derive(Debug, PartialEq)]
pub enum ApiError {
    NotFound,
    InvalidId,
    Internal,
}

impl From<RetrievalError> for ApiError {
    fn from(err: RetrievalError) -> Self {
        match err {
            RetrievalError::NotFound(_) => ApiError::NotFound,
            other => {
                error!("storage retrieval failed: {}", other);
                ApiError::Internal
            }
        }
    }
}

impl From<MutationError> for ApiError {
    fn from(err: MutationError) -> Self {
        match err {
            MutationError::NotFound(_) => ApiError::NotFound,
            other => {
                error!("storage mutation failed: {}", other);
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "book not found"),
            ApiError::InvalidId => (StatusCode::BAD_REQUEST, "invalid book id"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Server Error"),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
