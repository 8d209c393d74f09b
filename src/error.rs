//! Stable error codes and the HTTP error envelope.
//!
//! Every service error implements [`ErrorCode`]. Route handlers wrap them in
//! [`ApiError`], which renders `{ "code", "message", "retryable" }`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::services::store::StoreError;
use crate::services::suggestion::SuggestionError;

pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// API ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Suggestion(#[from] SuggestionError),
    #[error("status text exceeds {max} characters")]
    StatusTooLong { max: usize },
    #[error("name must not be empty")]
    EmptyName,
    #[error("not logged in")]
    NotLoggedIn,
}

impl ErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Store(e) => e.error_code(),
            Self::Suggestion(e) => e.error_code(),
            Self::StatusTooLong { .. } => "E_STATUS_TOO_LONG",
            Self::EmptyName => "E_EMPTY_NAME",
            Self::NotLoggedIn => "E_NOT_LOGGED_IN",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Store(e) => e.retryable(),
            Self::Suggestion(e) => e.retryable(),
            _ => false,
        }
    }
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(e) => match e {
                StoreError::UnknownSlot(_) => StatusCode::NOT_FOUND,
                StoreError::EmptyText => StatusCode::UNPROCESSABLE_ENTITY,
                StoreError::CorruptData(_) | StoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Suggestion(e) => match e {
                SuggestionError::Unavailable(_) => StatusCode::BAD_GATEWAY,
                SuggestionError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
                SuggestionError::InFlight(_) => StatusCode::CONFLICT,
            },
            Self::StatusTooLong { .. } | Self::EmptyName => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotLoggedIn => StatusCode::UNAUTHORIZED,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    pub retryable: bool,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = ErrorBody { code: self.error_code(), message: self.to_string(), retryable: self.retryable() };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
