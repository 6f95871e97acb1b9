//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::BEARER_SCHEME;

/// Authentication and authorization failures.
///
/// Every variant is scoped to a single request and is never retried.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    Missing,

    #[error("Malformed credential")]
    Malformed,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token subject does not exist")]
    UnknownSubject,
}

impl AuthError {
    /// Whether the failure comes from a presented bearer token.
    pub fn is_token_failure(&self) -> bool {
        matches!(
            self,
            AuthError::Malformed
                | AuthError::InvalidSignature
                | AuthError::Expired
                | AuthError::UnknownSubject
        )
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error(transparent)]
    Auth(#[from] AuthError),

    // Resource errors
    #[error("Todo not found")]
    NotFound,

    // Validation
    #[error("{0}")]
    Validation(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::Auth(AuthError::DuplicateEmail) => "DUPLICATE_EMAIL",
            AppError::Auth(AuthError::InvalidCredentials) => "INVALID_CREDENTIALS",
            AppError::Auth(AuthError::Missing) => "NOT_AUTHENTICATED",
            AppError::Auth(_) => "INVALID_TOKEN",
            AppError::NotFound => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    fn status(&self) -> StatusCode {
        match self {
            AppError::Auth(AuthError::DuplicateEmail) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),

            // Token failures share one generic message; the cause stays in the logs
            AppError::Auth(e) if e.is_token_failure() => {
                tracing::debug!("Token rejected: {}", e);
                "Could not validate credentials".to_string()
            }

            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static(BEARER_SCHEME));
        }
        response
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
