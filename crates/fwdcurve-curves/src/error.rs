//! Error types for curve construction and analytics.
//!
//! The taxonomy follows what a caller needs to decide on:
//!
//! - [`CurveError::MalformedObservation`]: bad input record, with the row when known
//! - [`CurveError::InsufficientCurveData`]: not enough distinct maturities for one key
//! - [`CurveError::OutOfDomainQuery`]: a price requested outside the observed maturities
//! - [`CurveError::UnknownConfiguration`]: an unrecognized convention or policy value

use fwdcurve_core::{CoreError, Date};
use fwdcurve_math::MathError;
use thiserror::Error;

use crate::key::CurveKey;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// An observation violates the forward point invariants.
    #[error("Malformed observation{}: {reason}", .row.map(|r| format!(" at row {r}")).unwrap_or_default())]
    MalformedObservation {
        /// 1-based data row, when the observation came from a file.
        row: Option<usize>,
        /// What is wrong with the observation.
        reason: String,
    },

    /// Not enough distinct maturities to build the curve.
    #[error("Insufficient data for curve {key}: need at least {required} maturities, got {got}")]
    InsufficientCurveData {
        /// The curve that could not be built.
        key: CurveKey,
        /// Minimum number of distinct maturities for the policy.
        required: usize,
        /// Distinct maturities available.
        got: usize,
    },

    /// Query outside the curve's observed time-to-maturity range.
    #[error("Time to maturity {requested:.6} outside curve {key} domain [{min:.6}, {max:.6}]")]
    OutOfDomainQuery {
        /// The queried curve.
        key: CurveKey,
        /// Requested time to maturity in years.
        requested: f64,
        /// Shortest sampled time to maturity.
        min: f64,
        /// Longest sampled time to maturity.
        max: f64,
    },

    /// A configuration value that does not name any known variant.
    #[error("Unknown {kind}: '{value}'")]
    UnknownConfiguration {
        /// What was being configured.
        kind: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A return was requested over a zero base price under the reject policy.
    #[error("Zero base price for return on {date}")]
    ZeroBasePrice {
        /// Settlement date of the return that could not be computed.
        date: Date,
    },

    /// The interpolator rejected the sample set.
    #[error("Interpolation error: {reason}")]
    Interpolation {
        /// Description of the interpolation error.
        reason: String,
    },
}

impl CurveError {
    /// Creates a malformed observation error without row context.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedObservation {
            row: None,
            reason: reason.into(),
        }
    }

    /// Attaches a 1-based row number to a malformed observation error.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn at_row(self, row: usize) -> Self {
        match self {
            Self::MalformedObservation { reason, .. } => Self::MalformedObservation {
                row: Some(row),
                reason,
            },
            other => other,
        }
    }

    /// Creates an insufficient curve data error.
    #[must_use]
    pub fn insufficient_data(key: CurveKey, required: usize, got: usize) -> Self {
        Self::InsufficientCurveData { key, required, got }
    }

    /// Creates an unknown configuration error.
    #[must_use]
    pub fn unknown_configuration(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownConfiguration {
            kind,
            value: value.into(),
        }
    }

    /// Returns true for per-query failures that analytics may skip over.
    #[must_use]
    pub fn is_query_error(&self) -> bool {
        matches!(self, Self::OutOfDomainQuery { .. })
    }
}

impl From<CoreError> for CurveError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidDate { message } => Self::malformed(message),
            CoreError::UnknownConfiguration { kind, value } => {
                Self::UnknownConfiguration { kind, value }
            }
        }
    }
}

impl From<MathError> for CurveError {
    fn from(err: MathError) -> Self {
        Self::Interpolation {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> CurveKey {
        CurveKey::new(Date::from_ymd(2025, 1, 1).unwrap(), "CL")
    }

    #[test]
    fn test_malformed_display_with_row() {
        let err = CurveError::malformed("negative price -1").at_row(7);
        assert_eq!(
            err.to_string(),
            "Malformed observation at row 7: negative price -1"
        );
    }

    #[test]
    fn test_malformed_display_without_row() {
        let err = CurveError::malformed("empty product");
        assert_eq!(err.to_string(), "Malformed observation: empty product");
    }

    #[test]
    fn test_insufficient_data_names_key() {
        let err = CurveError::insufficient_data(key(), 2, 1);
        let msg = err.to_string();
        assert!(msg.contains("2025-01-01 CL"));
        assert!(msg.contains("got 1"));
    }

    #[test]
    fn test_out_of_domain_is_query_error() {
        let err = CurveError::OutOfDomainQuery {
            key: key(),
            requested: 0.55,
            min: 0.25,
            max: 0.5,
        };
        assert!(err.is_query_error());
        assert!(err.to_string().contains("outside curve"));
        assert!(!CurveError::malformed("x").is_query_error());
    }

    #[test]
    fn test_from_core_error() {
        let err: CurveError =
            CoreError::unknown_configuration("day count convention", "30/360").into();
        assert!(matches!(err, CurveError::UnknownConfiguration { .. }));

        let err: CurveError = CoreError::invalid_date("Cannot parse: x").into();
        assert!(matches!(err, CurveError::MalformedObservation { row: None, .. }));
    }
}
