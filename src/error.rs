//! Error types for the watcher dashboard API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

use crate::token::TokenError;

/// Main error type for the service
///
/// Token and authorization failures are deliberately indistinguishable at
/// the HTTP boundary: every one of them surfaces as an empty 404, so callers
/// cannot probe which stage rejected them. The variants exist for internal
/// diagnostics only.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token failed decoding or checksum validation
    #[error("Invalid capability token: {0}")]
    InvalidToken(#[from] TokenError),

    /// Watcher link missing, wrong scope, expired, or revoked
    #[error("Watcher link is not usable")]
    LinkDenied,

    /// Token exhausted its request budget for the current window
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Data-layer fault
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration fault at startup
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal server error
    #[error("Internal server error: {message}")]
    Internal { message: String },

    /// Other errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Config(_) => "HASHWATCH_CONFIG_ERROR",
            Error::InvalidToken(_) => "HASHWATCH_TOKEN_INVALID",
            Error::LinkDenied => "HASHWATCH_LINK_DENIED",
            Error::RateLimited => "HASHWATCH_RATE_LIMIT",
            Error::Database(_) => "HASHWATCH_DATABASE_ERROR",
            Error::Migrate(_) => "HASHWATCH_MIGRATE_ERROR",
            Error::Serialization(_) => "HASHWATCH_SERIALIZATION_ERROR",
            Error::Internal { .. } => "HASHWATCH_INTERNAL_ERROR",
            Error::Other(_) => "HASHWATCH_OTHER_ERROR",
        }
    }

    /// Check if error is a client error
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidToken(_) | Error::LinkDenied | Error::RateLimited
        )
    }

    fn status(&self) -> StatusCode {
        match self {
            Error::InvalidToken(_) | Error::LinkDenied => StatusCode::NOT_FOUND,
            Error::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            // Invalid token and unusable link share one undistinguished 404
            Error::InvalidToken(_) | Error::LinkDenied => {
                debug!(code = self.error_code(), "request rejected");
                status.into_response()
            }
            Error::RateLimited => (
                status,
                Json(json!({
                    "error": "rate_limited",
                    "message": "Too many requests for this token",
                })),
            )
                .into_response(),
            // Full detail goes to the log; the caller sees a bare 500
            _ => {
                error!(code = self.error_code(), error = %self, "request failed");
                status.into_response()
            }
        }
    }
}
