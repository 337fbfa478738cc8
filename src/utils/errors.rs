//! Error handling for Aidtrack
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the Aidtrack application
#[derive(Error, Debug)]
pub enum AidtrackError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Export failed: {0}")]
    ExportFailure(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Aidtrack operations
pub type Result<T> = std::result::Result<T, AidtrackError>;

impl AidtrackError {
    /// Message safe to show to a client. Store and export internals are
    /// logged server-side and replaced with a generic message here.
    pub fn client_message(&self) -> String {
        match self {
            AidtrackError::Database(_) | AidtrackError::Migration(_) => {
                "Database error".to_string()
            }
            AidtrackError::ExportFailure(_) => "Export failed".to_string(),
            AidtrackError::Config(_)
            | AidtrackError::PasswordHash(_)
            | AidtrackError::Session(_)
            | AidtrackError::Io(_) => "Internal server error".to_string(),
            AidtrackError::Unauthorized(msg)
            | AidtrackError::NotFound(msg)
            | AidtrackError::Validation(msg) => msg.clone(),
        }
    }

    /// Whether the error is caused by the client request rather than the
    /// server or the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AidtrackError::Unauthorized(_)
                | AidtrackError::NotFound(_)
                | AidtrackError::Validation(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_errors_are_redacted_for_clients() {
        let err = AidtrackError::Database(sqlx::Error::PoolClosed);
        assert_eq!(err.client_message(), "Database error");
        assert!(!err.is_client_error());
    }

    #[test]
    fn validation_errors_keep_their_message() {
        let err = AidtrackError::Validation("Username already exists".to_string());
        assert_eq!(err.client_message(), "Username already exists");
        assert!(err.is_client_error());
    }
}
