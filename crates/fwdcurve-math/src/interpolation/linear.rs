//! Linear interpolation.

use crate::error::MathResult;
use crate::interpolation::{find_segment, out_of_range, validate_knots, Interpolator};

/// Linear interpolation between data points.
///
/// Consecutive knots are connected with straight lines. Each segment is
/// evaluated as `y0 * (1 - w) + y1 * w`, so the knots themselves come back
/// bit-for-bit.
///
/// # Example
///
/// ```rust
/// use fwdcurve_math::interpolation::{LinearInterpolator, Interpolator};
///
/// let xs = vec![0.0, 1.0, 2.0, 3.0];
/// let ys = vec![0.0, 1.0, 4.0, 9.0];
///
/// let interp = LinearInterpolator::new(xs, ys).unwrap();
/// assert_eq!(interp.interpolate(1.5).unwrap(), 2.5);
/// assert!(interp.interpolate(3.5).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
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
        Ok(Self { xs, ys })
    }

    fn segment(&self, x: f64) -> (f64, f64, f64, f64) {
        let i = find_segment(&self.xs, x);
        (self.xs[i], self.xs[i + 1], self.ys[i], self.ys[i + 1])
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        if !self.in_range(x) {
            return Err(out_of_range(x, &self.xs));
        }

        let (x0, x1, y0, y1) = self.segment(x);
        let w = (x - x0) / (x1 - x0);
        Ok(y0 * (1.0 - w) + y1 * w)
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        if !self.in_range(x) {
            return Err(out_of_range(x, &self.xs));
        }

        let (x0, x1, y0, y1) = self.segment(x);
        Ok((y1 - y0) / (x1 - x0))
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}
