//! Interpolation policies for forward curves.

use std::sync::Arc;

use fwdcurve_math::interpolation::{CubicSpline, Interpolator, LinearInterpolator};
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// How a forward curve fills the gaps between observed maturities.
///
/// The policy is resolved into a concrete interpolator once, when the curve
/// is built; queries never branch on it. Serialized as `LINEAR` /
/// `CUBIC_SPLINE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InterpolationPolicy {
    /// Piecewise-linear interpolation between adjacent samples.
    #[default]
    #[serde(rename = "LINEAR", alias = "linear")]
    Linear,

    /// Natural cubic spline through all samples.
    #[serde(rename = "CUBIC_SPLINE", alias = "cubic-spline", alias = "cubic")]
    CubicSpline,
}

impl InterpolationPolicy {
    /// Minimum number of distinct maturities the policy needs.
    #[must_use]
    pub const fn min_points(&self) -> usize {
        match self {
            Self::Linear | Self::CubicSpline => 2,
        }
    }

    /// Returns the canonical configuration key.
    #[must_use]
    pub fn config_key(&self) -> &'static str {
        match self {
            Self::Linear => "LINEAR",
            Self::CubicSpline => "CUBIC_SPLINE",
        }
    }

    /// Fits the interpolator for this policy.
    pub(crate) fn fit(&self, xs: Vec<f64>, ys: Vec<f64>) -> CurveResult<Arc<dyn Interpolator>> {
        let interpolator: Arc<dyn Interpolator> = match self {
            Self::Linear => Arc::new(LinearInterpolator::new(xs, ys)?),
            Self::CubicSpline => Arc::new(CubicSpline::new(xs, ys)?),
        };
        Ok(interpolator)
    }
}

impl std::fmt::Display for InterpolationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Linear => "Linear",
            Self::CubicSpline => "Cubic Spline",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for InterpolationPolicy {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "LINEAR" => Ok(Self::Linear),
            "CUBIC_SPLINE" | "CUBIC" | "SPLINE" => Ok(Self::CubicSpline),
            _ => Err(CurveError::unknown_configuration(
                "interpolation policy",
                s.to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(
            "LINEAR".parse::<InterpolationPolicy>().unwrap(),
            InterpolationPolicy::Linear
        );
        assert_eq!(
            "cubic-spline".parse::<InterpolationPolicy>().unwrap(),
            InterpolationPolicy::CubicSpline
        );
        assert_eq!(
            "CUBIC_SPLINE".parse::<InterpolationPolicy>().unwrap(),
            InterpolationPolicy::CubicSpline
        );
    }

    #[test]
    fn test_unknown_policy_is_config_error() {
        let err = "BLUE".parse::<InterpolationPolicy>().unwrap_err();
        assert_eq!(
            err,
            CurveError::unknown_configuration("interpolation policy", "BLUE")
        );
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&InterpolationPolicy::CubicSpline).unwrap();
        assert_eq!(json, "\"CUBIC_SPLINE\"");
        assert!(serde_json::from_str::<InterpolationPolicy>("\"MONOTONE\"").is_err());
    }

    #[test]
    fn test_fit_rejects_single_point() {
        for policy in [InterpolationPolicy::Linear, InterpolationPolicy::CubicSpline] {
            assert!(policy.fit(vec![0.25], vec![70.0]).is_err());
            assert!(policy.fit(vec![0.25, 0.5], vec![70.0, 72.0]).is_ok());
        }
    }
}
