//! Directory Error Types
//!
//! Directory-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx_error, kind::ErrorKind};
use thiserror::Error;

/// Directory-specific result type alias
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Directory-specific error variants
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Required field missing or malformed
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Referenced parent missing, or belonging to another company
    #[error("{0}")]
    Referential(String),

    /// No row with this id
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// Delete refused while dependents exist
    #[error("{0}")]
    Conflict(String),

    /// Database error
    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl DirectoryError {
    pub fn validation(field: &'static str, reason: impl ToString) -> Self {
        DirectoryError::Validation {
            field,
            reason: reason.to_string(),
        }
    }

    pub fn not_found(entity: &'static str) -> Self {
        DirectoryError::NotFound { entity }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DirectoryError::Validation { .. } => ErrorKind::BadRequest,
            DirectoryError::Referential(_) => ErrorKind::UnprocessableEntity,
            DirectoryError::NotFound { .. } => ErrorKind::NotFound,
            DirectoryError::Conflict(_) => ErrorKind::Conflict,
            DirectoryError::Storage(e) => classify_sqlx_error(e).0,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            DirectoryError::Storage(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            DirectoryError::Storage(e) => {
                tracing::error!(error = %e, "Directory database error");
            }
            DirectoryError::Referential(msg) => {
                tracing::info!(reason = %msg, "Referential check failed");
            }
            DirectoryError::Conflict(msg) => {
                tracing::info!(reason = %msg, "Delete refused");
            }
            _ => {
                tracing::debug!(error = %self, "Directory error");
            }
        }
    }
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
