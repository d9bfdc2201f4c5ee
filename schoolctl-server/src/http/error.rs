//! API error types with IntoResponse
//!
//! Every failure renders as `{"success": false, "error": "<message>"}`.
//! Storage and I/O details are logged, never returned.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use schoolctl_core::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Server rules rejected the payload (400)
    Validation(ValidationError),

    /// Malformed request (400)
    BadRequest { message: String },

    /// Upload exceeded the body limit (413)
    PayloadTooLarge,

    /// Database failure (500, logged); `message` is what the client sees
    Database {
        message: &'static str,
        source: DbError,
    },

    /// Internal failure (500, logged)
    Internal {
        message: &'static str,
        detail: String,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Adapter for `map_err` that tags a database error with a client message.
    pub fn database(message: &'static str) -> impl FnOnce(DbError) -> Self {
        move |source| Self::Database { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Database { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Validation(e) => e.to_string(),
            Self::BadRequest { message } => message,
            Self::PayloadTooLarge => "File is too large".to_string(),
            Self::Database { message, source } => {
                tracing::error!(error = %source, "{}", message);
                message.to_string()
            }
            Self::Internal { message, detail } => {
                tracing::error!(detail = %detail, "{}", message);
                message.to_string()
            }
        };

        let body = json!({
            "success": false,
            "error": message,
        });

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::bad_request(e.body_text())
        }
    }
}
