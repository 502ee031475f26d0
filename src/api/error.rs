//! API error responses.
//!
//! Every failure is a 4xx with a plain `{"error": string}` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::task_store::StoreError;
use super::types::ErrorResponse;

pub const TASK_NOT_FOUND_MESSAGE: &str = "Task not found";

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(msg) => ApiError::BadRequest(msg),
            StoreError::NotFound(_) => ApiError::NotFound(TASK_NOT_FOUND_MESSAGE.to_string()),
        }
    }
}
