//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date: {0}. Use YYYY-MM-DD or YYYYMMDD.")]
    InvalidDate(String),

    /// No curve for the requested key.
    #[error("No curve for {0}")]
    CurveNotFound(String),

    /// The curve exists in the inputs but could not be built.
    #[error("Curve {key} could not be built: {reason}")]
    CurveFailed {
        /// The requested curve.
        key: String,
        /// The build error.
        reason: String,
    },
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
