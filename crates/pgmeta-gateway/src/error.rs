//! Error handling for the gateway.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed request.
    #[error("{0}")]
    BadRequest(String),
    /// No generator is registered under the requested name.
    #[error("unknown backend '{0}'")]
    UnknownBackend(String),
    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error flag.
    pub error: bool,
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::UnknownBackend(_) => (StatusCode::NOT_FOUND, "UNKNOWN_BACKEND"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = ErrorResponse {
            error: true,
            code: code.to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<pgmeta_typegen::Error> for AppError {
    fn from(err: pgmeta_typegen::Error) -> Self {
        match err {
            pgmeta_typegen::Error::UnknownBackend(name) => AppError::UnknownBackend(name),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(format!("JSON error: {}", err))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("generation task failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let unknown: AppError = pgmeta_typegen::Error::UnknownBackend("cobol".into()).into();
        assert_eq!(
            unknown.status_and_code(),
            (StatusCode::NOT_FOUND, "UNKNOWN_BACKEND")
        );
        assert_eq!(unknown.to_string(), "unknown backend 'cobol'");

        let bad: AppError = serde_json::from_str::<u32>("x").unwrap_err().into();
        assert_eq!(bad.status_and_code().0, StatusCode::BAD_REQUEST);
        assert!(bad.to_string().starts_with("JSON error:"));
    }
}
