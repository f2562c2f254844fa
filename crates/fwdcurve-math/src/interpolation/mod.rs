//! Interpolation methods for forward curve construction.
//!
//! # Available Methods
//!
//! - [`LinearInterpolator`]: piecewise-linear interpolation between knots
//! - [`CubicSpline`]: natural cubic spline (C2, zero curvature at both ends)
//!
//! | Method | Smoothness | Minimum points |
//! |--------|------------|----------------|
//! | Linear | C0 | 2 |
//! | Cubic Spline | C2 | 2 |
//!
//! Both interpolators reproduce their knots exactly and refuse queries
//! outside `[min_x, max_x]`.

mod cubic_spline;
mod linear;

pub use cubic_spline::CubicSpline;
pub use linear::LinearInterpolator;

use crate::error::{MathError, MathResult};

/// Trait for interpolation methods.
///
/// Implementations are immutable once built and must be thread-safe so a
/// curve can be shared across readers.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the first derivative at x.
    fn derivative(&self, x: f64) -> MathResult<f64>;

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    ///
    /// NaN is never in range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

/// Validates knot vectors shared by all interpolators.
fn validate_knots(xs: &[f64], ys: &[f64], required: usize) -> MathResult<()> {
    if xs.len() < required {
        return Err(MathError::insufficient_data(required, xs.len()));
    }
    if xs.len() != ys.len() {
        return Err(MathError::invalid_input(format!(
            "xs and ys must have same length: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
        return Err(MathError::invalid_input("knots must be finite"));
    }
    for i in 1..xs.len() {
        if xs[i] <= xs[i - 1] {
            return Err(MathError::invalid_input(
                "x values must be strictly increasing",
            ));
        }
    }
    Ok(())
}

/// Finds the index i such that xs[i] <= x <= xs[i+1].
fn find_segment(xs: &[f64], x: f64) -> usize {
    match xs.binary_search_by(|probe| probe.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal)) {
        Ok(i) => i.min(xs.len() - 2),
        Err(i) => (i.saturating_sub(1)).min(xs.len() - 2),
    }
}

fn out_of_range(x: f64, xs: &[f64]) -> MathError {
    MathError::ExtrapolationNotAllowed {
        x,
        min: xs[0],
        max: xs[xs.len() - 1],
    }
}
