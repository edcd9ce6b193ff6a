//! HTTP error type for the admin API.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::settings::SettingsError;

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

/// Errors returned by HTTP handlers, rendered as
/// `{"error": {"code", "message", "details"}}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
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
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::Unauthorized { message, details } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", message, details)
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], Json(body)).into_response();
        }

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request("Validation failed", json!(e))
    }
}

impl From<SettingsError> for AppError {
    fn from(e: SettingsError) -> Self {
        match e {
            SettingsError::InvalidCharacters { field, value } => AppError::bad_request(
                "Path contains disallowed characters",
                json!({ "field": field, "value": value, "allowed": "A-Z a-z 0-9 . _ ~ / -" }),
            ),
            SettingsError::LegacyLoginPath { field, value } => AppError::bad_request(
                "Path points at the legacy login endpoint",
                json!({ "field": field, "value": value }),
            ),
            SettingsError::RevealsLoginPath => AppError::bad_request(
                "Redirect path must differ from the login path",
                json!({ "field": "block_redirect_path" }),
            ),
            SettingsError::ExemptLoginPath { value, prefix } => AppError::bad_request(
                "Login path is under a prefix the gate does not inspect",
                json!({ "field": "hidden_login_path", "value": value, "prefix": prefix }),
            ),
            SettingsError::Io(e) => {
                tracing::error!("Settings storage error: {}", e);
                AppError::internal("Settings storage error", json!({}))
            }
            SettingsError::Serialization(e) => {
                tracing::error!("Settings serialization error: {}", e);
                AppError::internal("Settings storage error", json!({}))
            }
        }
    }
}
