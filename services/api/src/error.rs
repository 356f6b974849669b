//! Custom error types for the API service

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed request field
    #[error("{0}")]
    Validation(String),

    /// Referenced record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Unique field already taken; `code` tells clients which one
    #[error("{message}")]
    Conflict {
        code: &'static str,
        message: &'static str,
    },

    /// Credentials did not match a stored user
    #[error("Invalid credentials")]
    Unauthorized,

    /// Storage failure; `context` is what the client sees
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: DatabaseError,
    },

    /// Internal server error
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Wrap a storage error with the message shown to the client
    pub fn storage(context: &'static str) -> impl FnOnce(DatabaseError) -> ApiError {
        move |source| ApiError::Storage { context, source }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                json!({"success": false, "message": message}),
            ),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                json!({"success": false, "message": message}),
            ),
            ApiError::Conflict { code, message } => (
                StatusCode::BAD_REQUEST,
                json!({"success": false, "message": message, "error": code}),
            ),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({"success": false, "message": "Invalid credentials"}),
            ),
            ApiError::Storage { context, source } => {
                tracing::error!("{}: {}", context, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"success": false, "message": context}),
                )
            }
            ApiError::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"success": false, "message": "Internal server error"}),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
