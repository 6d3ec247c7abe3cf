//! Error types for the returnly ecosystem.

use thiserror::Error;

/// Errors that can occur in returnly operations.
///
/// `NotAuthenticated` and `NoWritableCalendar` abort a whole batch;
/// the other domain errors are isolated to a single transaction.
#[derive(Error, Debug)]
pub enum ReturnlyError {
    #[error("Not signed in")]
    NotAuthenticated,

    #[error("No calendar allows modifications")]
    NoWritableCalendar,

    #[error("Calendar access not granted")]
    PermissionDenied,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Event creation failed: {0}")]
    CreationFailed(String),

    #[error("Failed to persist reminder record: {0}")]
    Persistence(String),

    #[error("Operation timed out after {0}s")]
    Timeout(u64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("{0}")]
    ProviderNotInstalled(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for returnly operations.
pub type ReturnlyResult<T> = Result<T, ReturnlyError>;
