//! Natural cubic spline interpolation.

use crate::error::MathResult;
use crate::interpolation::{find_segment, out_of_range, validate_knots, Interpolator};

/// Natural cubic spline interpolation.
///
/// Constructs a smooth curve through data points using piecewise cubic
/// polynomials with continuous first and second derivatives.
///
/// "Natural" means the second derivative is zero at the endpoints. With
/// exactly two knots the spline is the straight line through them.
///
/// # Example
///
/// ```rust
/// use fwdcurve_math::interpolation::{CubicSpline, Interpolator};
///
/// let xs = vec![0.0, 1.0, 2.0, 3.0];
/// let ys = vec![0.0, 1.0, 4.0, 9.0];
///
/// let spline = CubicSpline::new(xs, ys).unwrap();
/// let y = spline.interpolate(1.5).unwrap();
/// assert!(y > 1.0 && y < 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivatives at each knot
    y2s: Vec<f64>,
}

impl CubicSpline {
    /// Creates a natural cubic spline interpolator.
    ///
    /// # Arguments
    ///
    /// * `xs` - X coordinates (strictly increasing)
    /// * `ys` - Y coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, if lengths differ,
    /// or if the xs are not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_knots(&xs, &ys, 2)?;
        let y2s = compute_second_derivatives(&xs, &ys);
        Ok(Self { xs, ys, y2s })
    }

    /// Segment coefficients `(h, a, b, i)` for the standard spline form.
    fn weights(&self, x: f64) -> (f64, f64, f64, usize) {
        let i = find_segment(&self.xs, x);
        let h = self.xs[i + 1] - self.xs[i];
        let a = (self.xs[i + 1] - x) / h;
        let b = (x - self.xs[i]) / h;
        (h, a, b, i)
    }
}

impl Interpolator for CubicSpline {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        if !self.in_range(x) {
            return Err(out_of_range(x, &self.xs));
        }

        let (h, a, b, i) = self.weights(x);
        let y = a * self.ys[i]
            + b * self.ys[i + 1]
            + ((a * a * a - a) * self.y2s[i] + (b * b * b - b) * self.y2s[i + 1]) * (h * h) / 6.0;

        Ok(y)
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        if !self.in_range(x) {
            return Err(out_of_range(x, &self.xs));
        }

        let (h, a, b, i) = self.weights(x);
        let slope = (self.ys[i + 1] - self.ys[i]) / h;
        Ok(slope - (3.0 * a * a - 1.0) / 6.0 * h * self.y2s[i]
            + (3.0 * b * b - 1.0) / 6.0 * h * self.y2s[i + 1])
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

/// Computes the second derivatives for a natural cubic spline.
///
/// Tridiagonal solve with `y2[0] = y2[n-1] = 0`.
fn compute_second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut y2s = vec![0.0; n];
    let mut u = vec![0.0; n - 1];

    // Decomposition loop
    for i in 1..n - 1 {
        let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
        let p = sig * y2s[i - 1] + 2.0;
        y2s[i] = (sig - 1.0) / p;
        let d = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i]) - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
        u[i] = (6.0 * d / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
    }

    // Back-substitution loop
    for i in (0..n - 1).rev() {
        y2s[i] = y2s[i] * y2s[i + 1] + u[i];
    }

    y2s
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cubic_spline_through_points() {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys = vec![0.0, 1.0, 4.0, 9.0];

        let spline = CubicSpline::new(xs.clone(), ys.clone()).unwrap();

        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(spline.interpolate(*x).unwrap(), *y, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_natural_end_conditions() {
        let spline = CubicSpline::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 0.0, 1.0]).unwrap();
        let y2s = &spline.y2s;
        assert_eq!(y2s[0], 0.0);
        assert_eq!(y2s[3], 0.0);
        assert!(y2s[1] != 0.0);
    }

    #[test]
    fn test_two_points_is_a_line() {
        let spline = CubicSpline::new(vec![1.0, 3.0], vec![10.0, 14.0]).unwrap();
        assert_relative_eq!(spline.interpolate(2.0).unwrap(), 12.0, epsilon = 1e-12);
        assert_relative_eq!(spline.derivative(2.5).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reproduces_straight_line() {
        let xs = vec![0.0, 0.5, 1.5, 2.0, 4.0];
        let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x + 1.0).collect();
        let spline = CubicSpline::new(xs, ys).unwrap();

        for x in [0.25, 1.0, 3.0, 3.9] {
            assert_relative_eq!(spline.interpolate(x).unwrap(), 3.0 * x + 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_cubic_spline_extrapolation_error() {
        let spline = CubicSpline::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 4.0, 9.0]).unwrap();

        assert!(spline.interpolate(-0.5).is_err());
        assert!(spline.interpolate(3.5).is_err());
        assert!(spline.derivative(3.5).is_err());
    }

    #[test]
    fn test_insufficient_points() {
        assert!(CubicSpline::new(vec![0.0], vec![1.0]).is_err());
    }
}
