use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

/// Request-level error taxonomy. Guards and handlers fail fast with one of
/// these; the store and the payment gateway are never retried.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized access")]
    Unauthenticated,
    #[error("forbidden access")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    InvalidArgument(String),
    #[error("upstream failure ({status})")]
    Upstream {
        status: StatusCode,
        body: Option<Value>,
    },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": "unauthorized access" }),
            ),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                json!({ "message": "forbidden access" }),
            ),
            ApiError::NotFound => (StatusCode::NOT_FOUND, json!({ "message": "not found" })),
            ApiError::InvalidArgument(message) => {
                (StatusCode::BAD_REQUEST, json!({ "message": message }))
            }
            ApiError::Upstream { status, body } => (
                status,
                body.unwrap_or_else(|| json!({ "message": "upstream failure" })),
            ),
            ApiError::Database(e) => {
                error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "internal server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
