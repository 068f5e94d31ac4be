//! Core error types for studyflow-core.
//!
//! Validation failures are the only recoverable fault the engine can
//! report: the input was wrong, not the system. Unknown timer ids are
//! deliberately not an error -- cancellation is idempotent instead.

use thiserror::Error;

/// Core error type for studyflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field was empty or blank
    #[error("'{field}' must not be empty")]
    EmptyField { field: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Check a user-supplied minute count against `1..=max`.
    pub(crate) fn check_minutes(field: &str, minutes: i64, max: i64) -> Result<(), Self> {
        if minutes <= 0 || minutes > max {
            return Err(ValidationError::InvalidValue {
                field: field.into(),
                message: format!("must be between 1 and {max}, got {minutes}"),
            });
        }
        Ok(())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
