//! Error types for the core library.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in date and day-count operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Reversed date range passed to a day-count function.
    #[error("Invalid date range: {end} precedes {start}")]
    InvalidDateRange {
        /// The range start (expected earlier date).
        start: String,
        /// The range end (expected later date).
        end: String,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid date range error.
    #[must_use]
    pub fn invalid_date_range(start: impl ToString, end: impl ToString) -> Self {
        Self::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));

        let err = CoreError::invalid_date_range("2025-06-01", "2025-01-01");
        assert!(err.to_string().contains("precedes"));
    }
}
