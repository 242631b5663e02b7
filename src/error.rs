//! Application error type and its HTTP representation.
//!
//! Every error is rendered as a JSON body of the form
//! `{ "error": { "code", "message", "details" } }`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Errors surfaced to HTTP clients.
///
/// Only conditions that stop a request are modelled here. Missing optional
/// columns and malformed rows are absorbed where they occur and never become
/// an `AppError`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The partner table is missing or unreadable. Rendering must halt.
    #[error("{message}")]
    DataUnavailable { message: String, details: Value },

    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn data_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::DataUnavailable {
            message: message.into(),
            details,
        }
    }
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status associated with this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DataUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message, details) = match self {
            AppError::DataUnavailable { message, details } => {
                ("data_unavailable", message, details)
            }
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}
