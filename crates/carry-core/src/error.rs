//! Error types for carry-trade analytics.
//!
//! Two kinds of failure exist. `InvalidInput` is a bad parameter supplied by
//! the caller (non-positive rate, inverted band, too few samples).
//! `MissingData` is an absent or unusable market value. The break-even engine
//! reports missing quotes as data instead of raising; other callers that
//! cannot proceed without a value (the spot estimator, table lookups) raise it.

use thiserror::Error;

/// A specialized Result type for carry operations.
pub type CarryResult<T> = Result<T, CarryError>;

/// The main error type for carry operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CarryError {
    /// A parameter failed validation.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of what is wrong with the input.
        reason: String,
    },

    /// A required market or reference value is absent or unusable.
    #[error("Missing data: {reason}")]
    MissingData {
        /// Description of the missing value.
        reason: String,
    },

    /// Error in date parsing or an invalid calendar date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },
}

impl CarryError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates a missing data error.
    #[must_use]
    pub fn missing_data(reason: impl Into<String>) -> Self {
        Self::MissingData {
            reason: reason.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Returns true for caller-side parameter errors.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Returns true when the failure is an absent market or reference value.
    pub fn is_missing_data(&self) -> bool {
        matches!(self, Self::MissingData { .. })
    }
}
