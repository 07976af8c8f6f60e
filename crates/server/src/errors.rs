use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::error;

/// Request-level failure reported straight back to the caller.
#[derive(Debug)]
pub enum ApiError {
    /// 400 carrying the full ordered list of messages as a JSON array.
    Validation(Vec<String>),
    /// 404 with a literal message string.
    NotFound(&'static str),
    /// Unexpected store failure; 500, logged.
    Internal(String),
}

impl ApiError {
    pub fn book_not_found() -> Self {
        ApiError::NotFound("Book not found")
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msgs) => ApiError::Validation(msgs),
            ServiceError::Db(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msgs) => (StatusCode::BAD_REQUEST, Json(msgs)).into_response(),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, Json(msg)).into_response(),
            ApiError::Internal(msg) => {
                error!(error = %msg, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": msg })),
                )
                    .into_response()
            }
        }
    }
}
