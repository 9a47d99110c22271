//! Error types for the person service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Validation Error ==
/// A violated rule of the person validation predicate.
///
/// Only the first failing rule is ever reported.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("email is invalid and empty")]
    EmptyEmail,

    #[error("name is invalid and empty")]
    EmptyName,

    #[error("email is invalid and must end with @gmail.com")]
    WrongEmailDomain,

    #[error("email must contain a local part before @gmail.com")]
    EmptyEmailLocalPart,

    #[error("age must be greater than 0")]
    AgeTooLow,

    #[error("age must be smaller than 100")]
    AgeTooHigh,
}

// == Store Error Enum ==
/// Outcome kinds of the cache-aside person store.
///
/// Validation and not-found stay distinguishable from backend failures so the
/// transport can answer with distinct status codes.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Input rejected before reaching any backend
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The authoritative store returned or affected zero rows
    #[error("person {0} not found")]
    NotFound(i64),

    /// The authoritative store failed or timed out
    #[error("backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Backend(format!("serialization failed: {}", err))
    }
}

// == Cache Error ==
/// Failure of a cache backend call.
///
/// Never leaves the person store; it is logged and the store falls back to
/// the authoritative data.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),

    #[error("cache call timed out")]
    Timeout,
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Backend(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            StoreError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            StoreError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            StoreError::Backend(msg) => {
                tracing::error!("Backend error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
