//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx_error, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::token::{TokenError, TokenIssueError};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No `Authorization` header on a protected route
    #[error("Authentication required")]
    Unauthenticated,

    /// Bearer token rejected
    #[error("Bearer token rejected: {0}")]
    Token(#[from] TokenError),

    /// Wrong password at login
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// User not found (by id, or by email at login)
    #[error("User not found")]
    UserNotFound,

    /// Email already registered
    #[error("Email is already registered")]
    EmailTaken,

    /// Request field failed validation
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Password digest could not be produced
    #[error(transparent)]
    PasswordHash(#[from] PasswordHashError),

    /// Token could not be signed
    #[error(transparent)]
    TokenIssue(#[from] TokenIssueError),

    /// Database error
    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl AuthError {
    pub fn validation(field: &'static str, reason: impl ToString) -> Self {
        AuthError::Validation {
            field,
            reason: reason.to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Unauthenticated | AuthError::Token(_) | AuthError::InvalidCredentials => {
                ErrorKind::Unauthorized
            }
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::Validation { .. } => ErrorKind::BadRequest,
            AuthError::PasswordHash(_) | AuthError::TokenIssue(_) => {
                ErrorKind::InternalServerError
            }
            AuthError::Storage(e) => classify_sqlx_error(e).0,
        }
    }

    /// Rejected by the bearer-token gate
    pub fn is_gate_rejection(&self) -> bool {
        matches!(self, AuthError::Unauthenticated | AuthError::Token(_))
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            // One answer for every token problem; the reason only goes to the log
            AuthError::Unauthenticated | AuthError::Token(_) => {
                AppError::unauthorized("Missing or invalid bearer token")
            }
            AuthError::Storage(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Storage(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::PasswordHash(e) => {
                tracing::error!(error = %e, "Password hashing failed");
            }
            AuthError::TokenIssue(e) => {
                tracing::error!(error = %e, "Token signing failed");
            }
            AuthError::Token(reason) => {
                tracing::warn!(reason = reason.as_str(), "Bearer token rejected");
            }
            AuthError::Unauthenticated => {
                tracing::warn!(reason = "missing", "Bearer token rejected");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let challenge = self.is_gate_rejection();
        let mut response = self.into_app_error().into_response();
        if challenge {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
