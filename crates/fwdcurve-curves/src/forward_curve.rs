//! Forward curve built from one day's settlement prices.

use std::sync::Arc;

use fwdcurve_core::daycounts::DayCountConvention;
use fwdcurve_core::Date;
use fwdcurve_math::interpolation::Interpolator;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CurveError, CurveResult};
use crate::interpolation::InterpolationPolicy;
use crate::key::CurveKey;
use crate::observation::Observation;

/// One observed point of a forward curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Contract maturity.
    pub maturity_date: Date,
    /// Year fraction from settlement to maturity.
    pub time_to_maturity: f64,
    /// Settlement price.
    pub price: f64,
}

/// An interpolated time-to-maturity / price curve for one [`CurveKey`].
///
/// Built once from the observations sharing a key and never mutated
/// afterwards; rebuild it when the inputs change. Cloning is cheap, the
/// fitted interpolator is shared.
///
/// # Example
///
/// ```rust
/// use fwdcurve_core::Date;
/// use fwdcurve_curves::prelude::*;
///
/// let settle = Date::parse("2025-01-01").unwrap();
/// let observations = vec![
///     Observation::new(settle, Date::parse("2025-07-01").unwrap(), "CL", 72.0).unwrap(),
///     Observation::new(settle, Date::parse("2025-04-01").unwrap(), "CL", 70.0).unwrap(),
/// ];
///
/// let curve = ForwardCurve::build(
///     CurveKey::new(settle, "CL"),
///     &observations,
///     DayCountConvention::Act365Fixed,
///     InterpolationPolicy::Linear,
/// )
/// .unwrap();
///
/// assert_eq!(curve.samples()[0].price, 70.0);
/// assert_eq!(curve.price_on_settlement(Date::parse("2025-04-01").unwrap()).unwrap(), 70.0);
/// ```
#[derive(Clone)]
pub struct ForwardCurve {
    key: CurveKey,
    convention: DayCountConvention,
    policy: InterpolationPolicy,
    samples: Vec<CurvePoint>,
    interpolator: Arc<dyn Interpolator>,
}

impl std::fmt::Debug for ForwardCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForwardCurve")
            .field("key", &self.key)
            .field("convention", &self.convention)
            .field("policy", &self.policy)
            .field("samples", &self.samples)
            .finish()
    }
}

impl ForwardCurve {
    /// Builds a curve from the observations of one key.
    ///
    /// Observations may arrive in any order. They are sorted by maturity
    /// (then instrument id, then price) and samples sharing a maturity
    /// collapse to the last one in that order, so the result does not depend
    /// on input order.
    ///
    /// # Errors
    ///
    /// - `MalformedObservation` if an observation does not belong to `key`
    /// - `InsufficientCurveData` if fewer distinct maturities than the policy
    ///   needs remain
    pub fn build(
        key: CurveKey,
        observations: &[Observation],
        convention: DayCountConvention,
        policy: InterpolationPolicy,
    ) -> CurveResult<Self> {
        for obs in observations {
            check_membership(&key, obs)?;
        }

        let mut sorted: Vec<(&Observation, String)> = observations
            .iter()
            .map(|obs| (obs, obs.instrument_id()))
            .collect();
        sorted.sort_by(|(a, a_id), (b, b_id)| {
            a.maturity_date()
                .cmp(&b.maturity_date())
                .then_with(|| a_id.cmp(b_id))
                .then_with(|| a.settlement_price().total_cmp(&b.settlement_price()))
        });

        let mut samples: Vec<CurvePoint> = Vec::with_capacity(sorted.len());
        let mut collapsed = 0usize;
        for (obs, _) in sorted {
            let point = CurvePoint {
                maturity_date: obs.maturity_date(),
                time_to_maturity: convention.year_fraction(key.settlement_date, obs.maturity_date()),
                price: obs.settlement_price(),
            };
            match samples.last_mut() {
                Some(last) if last.maturity_date == point.maturity_date => {
                    *last = point;
                    collapsed += 1;
                }
                _ => samples.push(point),
            }
        }

        if samples.len() < policy.min_points() {
            return Err(CurveError::insufficient_data(
                key,
                policy.min_points(),
                samples.len(),
            ));
        }

        let xs = samples.iter().map(|p| p.time_to_maturity).collect();
        let ys = samples.iter().map(|p| p.price).collect();
        let interpolator = policy.fit(xs, ys)?;

        debug!(
            curve = %key,
            points = samples.len(),
            collapsed,
            policy = %policy,
            "built forward curve"
        );

        Ok(Self {
            key,
            convention,
            policy,
            samples,
            interpolator,
        })
    }

    /// Returns the curve key.
    pub fn key(&self) -> &CurveKey {
        &self.key
    }

    /// Returns the settlement date of the curve.
    pub fn settlement_date(&self) -> Date {
        self.key.settlement_date
    }

    /// Returns the day count convention used for time to maturity.
    pub fn convention(&self) -> DayCountConvention {
        self.convention
    }

    /// Returns the interpolation policy.
    pub fn policy(&self) -> InterpolationPolicy {
        self.policy
    }

    /// Returns the observed samples, sorted by time to maturity.
    pub fn samples(&self) -> &[CurvePoint] {
        &self.samples
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: a built curve has at least two samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the sampled time-to-maturity range `(min, max)`.
    pub fn domain(&self) -> (f64, f64) {
        (self.interpolator.min_x(), self.interpolator.max_x())
    }

    /// Returns true if `time_to_maturity` can be priced without extrapolating.
    pub fn contains(&self, time_to_maturity: f64) -> bool {
        self.interpolator.in_range(time_to_maturity)
    }

    /// Price at a time to maturity in years.
    ///
    /// # Errors
    ///
    /// Returns `OutOfDomainQuery` outside the sampled range; the curve never
    /// extrapolates.
    pub fn price_at(&self, time_to_maturity: f64) -> CurveResult<f64> {
        self.check_domain(time_to_maturity)?;
        Ok(self.interpolator.interpolate(time_to_maturity)?)
    }

    /// Slope of the curve, in price per year of maturity, at a time to maturity.
    ///
    /// Positive in contango, negative in backwardation. A linear curve takes
    /// the slope of the segment to the right of an interior knot.
    ///
    /// # Errors
    ///
    /// Returns `OutOfDomainQuery` outside the sampled range.
    pub fn slope_at(&self, time_to_maturity: f64) -> CurveResult<f64> {
        self.check_domain(time_to_maturity)?;
        Ok(self.interpolator.derivative(time_to_maturity)?)
    }

    fn check_domain(&self, time_to_maturity: f64) -> CurveResult<()> {
        if self.contains(time_to_maturity) {
            return Ok(());
        }
        let (min, max) = self.domain();
        Err(CurveError::OutOfDomainQuery {
            key: self.key.clone(),
            requested: time_to_maturity,
            min,
            max,
        })
    }

    /// Year fraction from `valuation_date` to `maturity_date` under the curve's convention.
    pub fn time_to_maturity(&self, maturity_date: Date, valuation_date: Date) -> f64 {
        self.convention.year_fraction(valuation_date, maturity_date)
    }

    /// Price of a contract maturing on `maturity_date`, valued on `valuation_date`.
    pub fn price_at_date(&self, maturity_date: Date, valuation_date: Date) -> CurveResult<f64> {
        self.price_at(self.time_to_maturity(maturity_date, valuation_date))
    }

    /// Price of a contract maturing on `maturity_date`, valued on the curve's settlement date.
    pub fn price_on_settlement(&self, maturity_date: Date) -> CurveResult<f64> {
        self.price_at_date(maturity_date, self.key.settlement_date)
    }

    /// Evenly spaced `(time_to_maturity, price)` pairs across the domain.
    ///
    /// Both ends are included; `points` below 2 is raised to 2.
    pub fn fitted(&self, points: usize) -> Vec<(f64, f64)> {
        let points = points.max(2);
        let (min, max) = self.domain();
        let step = (max - min) / (points - 1) as f64;

        (0..points)
            .map(|i| if i == points - 1 { max } else { min + step * i as f64 })
            .filter_map(|t| self.interpolator.interpolate(t).ok().map(|p| (t, p)))
            .collect()
    }
}

fn check_membership(key: &CurveKey, obs: &Observation) -> CurveResult<()> {
    if obs.settlement_date() != key.settlement_date {
        return Err(CurveError::malformed(format!(
            "{} settles on {}, curve {} settles on {}",
            obs.instrument_id(),
            obs.settlement_date(),
            key,
            key.settlement_date
        )));
    }
    if obs.product() != key.product {
        return Err(CurveError::malformed(format!(
            "{} does not belong to product {}",
            obs.instrument_id(),
            key.product
        )));
    }
    if let Some(exchange) = &key.exchange {
        if obs.exchange() != Some(exchange.as_str()) {
            return Err(CurveError::malformed(format!(
                "{} does not trade on {}",
                obs.instrument_id(),
                exchange
            )));
        }
    }
    Ok(())
}
