//! Error types for the application

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::FieldError;

/// Result type alias using our AnalysisError
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Message carried by payload-level errors
pub const EMPTY_PAYLOAD_MESSAGE: &str = "No data was provided.";

/// Main error type for analysis operations
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The submitted batch was missing or empty
    #[error("No data was provided.")]
    PayloadEmpty,

    /// One or more items failed validation; nothing was admitted
    #[error("Validation failed with {} error(s)", .0.len())]
    ValidationFailed(Vec<FieldError>),

    /// No job is registered under the given id
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// None of the classifier's rules matched the trade
    #[error("No risk category matched trade (value {value}, sector {sector})")]
    NoCategoryMatched { value: Decimal, sector: String },

    /// The work queue has no consumers left
    #[error("Work queue is closed")]
    QueueClosed,

    /// The operation was cancelled before it finished
    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors (listener binding, serving)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AnalysisError {
    /// Returns true for errors caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::PayloadEmpty
                | AnalysisError::ValidationFailed(_)
                | AnalysisError::JobNotFound(_)
        )
    }
}
