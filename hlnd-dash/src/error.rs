//! Error types for hlnd-dash
//!
//! Every handler returns `ApiResult<T>`; failures render as
//! `{"error": {"code": ..., "message": ...}}`. Extractor rejections are
//! folded in here too so a malformed body or query string gets the same shape.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hlnd_common::FilterError;
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Requested article is not in the filtered subset (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Malformed request outside the filter itself (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Body is not valid JSON or not a valid request object (400)
    #[error("Invalid request body: {0}")]
    Body(#[from] JsonRejection),

    /// Query string could not be parsed (400)
    #[error("Invalid query string: {0}")]
    Query(#[from] QueryRejection),

    /// Rejected filter specification (400)
    #[error(transparent)]
    Filter(#[from] FilterError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Body(_) => (StatusCode::BAD_REQUEST, "INVALID_BODY"),
            ApiError::Query(_) => (StatusCode::BAD_REQUEST, "INVALID_QUERY"),
            ApiError::Filter(FilterError::EmptySelection(_)) => {
                (StatusCode::BAD_REQUEST, "EMPTY_SELECTION")
            }
            ApiError::Filter(FilterError::InvertedRange { .. })
            | ApiError::Filter(FilterError::NonFiniteBound) => {
                (StatusCode::BAD_REQUEST, "INVALID_RANGE")
            }
            ApiError::Filter(FilterError::UnknownCategory(_)) => {
                (StatusCode::BAD_REQUEST, "UNKNOWN_CATEGORY")
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
