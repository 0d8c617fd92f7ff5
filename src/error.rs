// SPDX-License-Identifier: MIT

//! Service error type and its JSON rendering.
//!
//! Every handler returns [`Result`]; the error half renders as
//! `{"error": code, "details"?: message}` with a matching status.

use crate::models::preferences::PreferenceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Marathon backend unreachable or misbehaving.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Backend answered but the body did not decode. Resending won't help.
    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Body the backend returns while its host is still waking up.
    pub const BACKEND_STARTING: &'static str = "Backend is still starting up";

    /// True for failures a GET may be retried on.
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::Backend(_))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Backend(_) | AppError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the `error` field.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "unauthorized",
            AppError::InvalidToken => "invalid_token",
            AppError::NotFound(_) => "not_found",
            AppError::BadRequest(_) => "bad_request",
            AppError::Validation(_) => "validation_error",
            AppError::Backend(_) | AppError::MalformedResponse(_) => "backend_error",
            AppError::Database(_) => "database_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Client-facing detail. Server-side failures stay in the logs.
    fn details(&self) -> Option<String> {
        match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Backend(msg)
            | AppError::MalformedResponse(msg) => Some(msg.clone()),
            AppError::Validation(errors) => Some(errors.to_string()),
            _ => None,
        }
    }
}

impl From<PreferenceError> for AppError {
    fn from(err: PreferenceError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Backend(msg) => tracing::warn!(error = %msg, "Backend request failed"),
            AppError::MalformedResponse(msg) => {
                tracing::warn!(error = %msg, "Backend response did not decode")
            }
            AppError::Database(msg) => tracing::error!(error = %msg, "Database error"),
            AppError::Internal(err) => tracing::error!(error = %err, "Internal server error"),
            _ => {}
        }

        let body = ErrorResponse {
            error: self.code(),
            details: self.details(),
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
