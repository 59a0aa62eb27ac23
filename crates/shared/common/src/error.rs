//! Unified error handling for repository operations.
//!
//! Provides a single error type that host applications can either match on
//! or hand straight back to Axum as an HTTP response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Repository error types.
#[derive(Error, Debug)]
pub enum RepositoryError {
    // Wiring problems: bad column names, malformed macro arguments, ...
    #[error("Repository configuration error: {0}")]
    Configuration(String),

    // Resource errors
    #[error("No query results for {0}")]
    NotFound(String),

    // Extension dispatch
    #[error("Method {0} does not exist")]
    UnknownOperation(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl RepositoryError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            RepositoryError::Configuration(_) => "CONFIGURATION_ERROR",
            RepositoryError::NotFound(_) => "NOT_FOUND",
            RepositoryError::UnknownOperation(_) => "UNKNOWN_OPERATION",
            #[cfg(feature = "database")]
            RepositoryError::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
            RepositoryError::UnknownOperation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            RepositoryError::NotFound(_) | RepositoryError::UnknownOperation(_) => self.to_string(),

            // Hide details for internal errors
            RepositoryError::Configuration(msg) => {
                tracing::error!("Repository configuration error: {}", msg);
                "An internal error occurred".to_string()
            }
            #[cfg(feature = "database")]
            RepositoryError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
        }
    }

    /// True for errors caused by how the repository was wired up rather
    /// than by the data it was asked about.
    pub fn is_configuration(&self) -> bool {
        matches!(self, RepositoryError::Configuration(_))
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for RepositoryError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Extension trait for Option -> RepositoryError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &str) -> RepositoryResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &str) -> RepositoryResult<T> {
        self.ok_or_else(|| RepositoryError::not_found(entity))
    }
}

/// Convenience constructors
impl RepositoryError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        RepositoryError::Configuration(msg.into())
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        RepositoryError::NotFound(entity.into())
    }

    pub fn unknown_operation(name: impl Into<String>) -> Self {
        RepositoryError::UnknownOperation(name.into())
    }

    pub fn unknown_column(table: &str, column: &str) -> Self {
        RepositoryError::Configuration(format!("column {} does not exist on {}", column, table))
    }
}
