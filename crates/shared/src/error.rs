//! Application-wide error types.
//!
//! Every failure a user can run into falls into one of three classes
//! (see [`FailureKind`]): the session is no longer valid, the submitted
//! data was rejected, or something transient went wrong. None of them is
//! fatal; callers surface a message and keep their previous state.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// How a failure should be recovered from at the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Stored tokens are invalid; the user has to log in again.
    Auth,
    /// Input was rejected; the form stays open for correction.
    Validation,
    /// Network or server trouble; reload to resynchronise.
    Transient,
}

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Access denied.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict (e.g., duplicate entry).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Backend could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// Backend failed to process the request.
    #[error("Server error: {0}")]
    Server(String),

    /// Internal client error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Builds an error from an HTTP status returned by the backend.
    #[must_use]
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            400 | 422 => Self::Validation(message),
            409 => Self::Conflict(message),
            500..=599 => Self::Server(message),
            _ => Self::Internal(message),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Network(_) => 503,
            Self::Server(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Server(_) => "SERVER_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the recovery class of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Unauthorized(_) => FailureKind::Auth,
            Self::Validation(_) | Self::Conflict(_) | Self::Forbidden(_) => {
                FailureKind::Validation
            }
            Self::NotFound(_) | Self::Network(_) | Self::Server(_) | Self::Internal(_) => {
                FailureKind::Transient
            }
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
