//! Error types for the contact book
//!
//! This module defines all error types used throughout the workspace.

use thiserror::Error;

/// Result type alias for contact book operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the contact book
#[derive(Error, Debug)]
pub enum Error {
    /// A write was rejected by a store constraint (UNIQUE, CHECK, NOT NULL)
    ///
    /// The message is the store's own wording and is surfaced verbatim to
    /// API clients.
    #[error("{0}")]
    ConstraintViolation(String),

    /// Request payload could not be turned into a contact draft
    #[error("{0}")]
    InvalidInput(String),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Store-related errors that are not constraint violations
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport-level HTTP client errors (connection refused, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(String),

    /// The API answered with a non-success status
    ///
    /// Displays as the server-provided message only, so it can be shown to
    /// the user as-is.
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message taken from the `error` field of the response body
        message: String,
    },

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::ConstraintViolation(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP transport error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an API error from a status code and server message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether this error was caused by a rejected write
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

/// Constraint failures keep the database wording; everything else is a store error
impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation
                | sqlx::error::ErrorKind::CheckViolation
                | sqlx::error::ErrorKind::NotNullViolation => {
                    return Self::ConstraintViolation(db_err.message().to_string());
                }
                _ => {}
            }
        }
        Self::Store(err.to_string())
    }
}
