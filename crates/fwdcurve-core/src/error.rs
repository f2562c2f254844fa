//! Error types for the core crate.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The error type for core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Error in date construction or parsing.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A configuration value that does not name any known variant.
    #[error("Unknown {kind}: '{value}'")]
    UnknownConfiguration {
        /// What was being configured (e.g. "day count convention").
        kind: &'static str,
        /// The rejected value.
        value: String,
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

    /// Creates an unknown configuration error.
    #[must_use]
    pub fn unknown_configuration(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownConfiguration {
            kind,
            value: value.into(),
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
    }

    #[test]
    fn test_unknown_configuration_display() {
        let err = CoreError::unknown_configuration("day count convention", "30/360");
        assert_eq!(err.to_string(), "Unknown day count convention: '30/360'");
    }
}
