//! Error types for postboard.

use thiserror::Error;

/// Common error type for postboard.
#[derive(Error, Debug)]
pub enum BoardError {
    /// Database error.
    ///
    /// Any sqlx error that is not a connectivity problem ends up here.
    #[error("database error: {0}")]
    Database(String),

    /// The backing store could not be reached (pool exhausted or closed,
    /// socket or TLS failure). Never retried internally.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for caller input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors
impl From<sqlx::Error> for BoardError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => BoardError::StoreUnavailable(e.to_string()),
            other => BoardError::Database(other.to_string()),
        }
    }
}

/// Result type alias for postboard operations.
pub type Result<T> = std::result::Result<T, BoardError>;
