//! API error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use glasline_domain::GlaslineError;
use serde_json::json;
use thiserror::Error;

/// Error type returned by route handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or invalid request data (400).
    #[error("{0}")]
    BadRequest(String),

    /// Missing or rejected session token, or wrong gate password (401).
    #[error("{0}")]
    Unauthorized(String),

    /// The requested entity does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// The rate-limit gate refused the action (429).
    #[error("too many attempts")]
    RateLimited {
        /// Seconds until the window resets, where the collaborator reported it
        retry_after_seconds: Option<u64>,
    },

    /// Everything else; logged server-side, not leaked to the caller (500).
    #[error("internal error")]
    Internal(String),
}

impl From<GlaslineError> for ApiError {
    fn from(err: GlaslineError) -> Self {
        match err {
            GlaslineError::InvalidInput(msg) => Self::BadRequest(msg),
            GlaslineError::NotFound(msg) => Self::NotFound(msg),
            GlaslineError::Auth(msg) => Self::Unauthorized(msg),
            GlaslineError::RateLimited(_) => Self::RateLimited { retry_after_seconds: None },
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, json!({ "error": msg })),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            Self::RateLimited { retry_after_seconds } => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({
                    "error": "too many attempts",
                    "retry_after_seconds": retry_after_seconds,
                }),
            ),
            Self::Internal(msg) => {
                // Internals are logged, not leaked to the caller
                tracing::error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "internal error" }))
            }
        };

        (status, Json(body)).into_response()
    }
}
