//! Custom error types for the Taskboard service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;
use tracing::error;

/// Where unauthenticated and unauthorized requests are sent
pub const LOGIN_PATH: &str = "/login";

/// Custom error type for the Taskboard service
#[derive(Error, Debug)]
pub enum AppError {
    /// Registration hit the unique constraint on `users.username`
    #[error("Username already exists")]
    UsernameTaken,

    /// Unknown username or wrong password
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// No valid session on a protected route
    #[error("Authentication required")]
    Unauthenticated,

    /// Session lacks the role a route requires
    #[error("Insufficient role")]
    Unauthorized,

    /// Bad request with message
    #[error("{0}")]
    Validation(String),

    /// Missing row
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Anything else, including unexpected store failures
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // Both auth failures look the same from the outside.
            AppError::Unauthenticated | AppError::Unauthorized => {
                return Redirect::to(LOGIN_PATH).into_response();
            }
            AppError::UsernameTaken => (StatusCode::CONFLICT, self.to_string()),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Internal(ref e) => {
                error!("Internal error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}

/// Type alias for handler results
pub type AppResult<T> = Result<T, AppError>;

/// Whether an error came from a unique-constraint violation in the store
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|e| e.is_unique_violation())
}
