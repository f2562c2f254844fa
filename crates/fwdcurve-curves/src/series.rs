//! Price and return series of one contract across settlement dates.

use std::fmt;

use fwdcurve_core::Date;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CurveError, CurveResult};
use crate::forward_curve::ForwardCurve;
use crate::key::CurveKey;

/// The contract a series tracks: fixed product, exchange and maturity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetInstrument {
    /// Product identifier.
    pub product: String,
    /// Exchange identifier; `None` only matches curves keyed without exchange.
    pub exchange: Option<String>,
    /// Maturity of the contract.
    pub maturity_date: Date,
}

impl TargetInstrument {
    /// Creates a target without exchange.
    #[must_use]
    pub fn new(product: impl Into<String>, maturity_date: Date) -> Self {
        Self {
            product: product.into(),
            exchange: None,
            maturity_date,
        }
    }

    /// Sets the exchange.
    #[must_use]
    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = Some(exchange.into());
        self
    }

    /// True when the curve belongs to this target's product and exchange.
    pub fn matches(&self, key: &CurveKey) -> bool {
        key.matches(&self.product, self.exchange.as_deref())
    }
}

impl fmt::Display for TargetInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.exchange {
            Some(exchange) => write!(f, "{}@{} {}", self.product, exchange, self.maturity_date),
            None => write!(f, "{} {}", self.product, self.maturity_date),
        }
    }
}

/// Where time to maturity is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValuationAnchor {
    /// Each curve's own settlement date, so the target rolls down the curve.
    #[default]
    SettlementDate,
    /// One valuation date for every curve.
    Fixed(Date),
}

impl ValuationAnchor {
    /// Valuation date for a curve settling on `settlement_date`.
    #[must_use]
    pub fn valuation_date(&self, settlement_date: Date) -> Date {
        match self {
            Self::SettlementDate => settlement_date,
            Self::Fixed(date) => *date,
        }
    }
}

/// Price of the target on one curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    /// Curve the price was read from.
    pub key: CurveKey,
    /// Maturity of the target.
    pub maturity_date: Date,
    /// Time to maturity the curve was queried at.
    pub time_to_maturity: f64,
    /// Interpolated price.
    pub price: f64,
}

impl PricePoint {
    /// Settlement date of the curve.
    pub fn settlement_date(&self) -> Date {
        self.key.settlement_date
    }
}

/// A curve on which the target could not be priced.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedQuote {
    /// The curve that was skipped.
    pub key: CurveKey,
    /// Why it was skipped.
    pub error: CurveError,
}

/// Prices of one target contract, one per matching curve.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    instrument: TargetInstrument,
    anchor: ValuationAnchor,
    points: Vec<PricePoint>,
    skipped: Vec<SkippedQuote>,
}

impl PriceSeries {
    /// Prices `target` on every matching curve, keeping the curves' order.
    ///
    /// A curve whose domain does not cover the target's time to maturity is
    /// recorded in [`PriceSeries::skipped`] and the series continues.
    pub fn from_curves<'a, I>(curves: I, target: &TargetInstrument, anchor: ValuationAnchor) -> Self
    where
        I: IntoIterator<Item = &'a ForwardCurve>,
    {
        let mut points = Vec::new();
        let mut skipped = Vec::new();

        for curve in curves.into_iter().filter(|c| target.matches(c.key())) {
            let valuation = anchor.valuation_date(curve.settlement_date());
            let time_to_maturity = curve.time_to_maturity(target.maturity_date, valuation);

            match curve.price_at(time_to_maturity) {
                Ok(price) => points.push(PricePoint {
                    key: curve.key().clone(),
                    maturity_date: target.maturity_date,
                    time_to_maturity,
                    price,
                }),
                Err(error) => {
                    warn!(curve = %curve.key(), target = %target, error = %error, "skipping quote");
                    skipped.push(SkippedQuote {
                        key: curve.key().clone(),
                        error,
                    });
                }
            }
        }

        debug!(
            target = %target,
            points = points.len(),
            skipped = skipped.len(),
            "built price series"
        );

        Self {
            instrument: target.clone(),
            anchor,
            points,
            skipped,
        }
    }

    /// The tracked contract.
    pub fn instrument(&self) -> &TargetInstrument {
        &self.instrument
    }

    /// Anchor used for time to maturity.
    pub fn anchor(&self) -> ValuationAnchor {
        self.anchor
    }

    /// Priced points in curve order.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Curves that could not price the target.
    pub fn skipped(&self) -> &[SkippedQuote] {
        &self.skipped
    }

    /// Number of priced points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if no curve priced the target.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Simple returns between consecutive points.
    pub fn returns(&self, policy: ZeroBasePolicy) -> CurveResult<ReturnSeries> {
        ReturnSeries::from_prices(self, policy)
    }
}

/// What to report for a return whose base price is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZeroBasePolicy {
    /// Report 0.0, flagged as [`ReturnKind::ZeroBase`].
    #[default]
    EmitZero,
    /// Report NaN, flagged as [`ReturnKind::ZeroBase`].
    EmitNan,
    /// Fail with [`CurveError::ZeroBasePrice`].
    Reject,
}

impl std::str::FromStr for ZeroBasePolicy {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "emit-zero" | "zero" => Ok(Self::EmitZero),
            "emit-nan" | "nan" => Ok(Self::EmitNan),
            "reject" => Ok(Self::Reject),
            _ => Err(CurveError::unknown_configuration(
                "zero base policy",
                s.to_string(),
            )),
        }
    }
}

/// How a return value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReturnKind {
    /// `(p1 - p0) / p0` with a non-zero base.
    Computed,
    /// The base price was zero; the value comes from the [`ZeroBasePolicy`].
    ZeroBase,
}

/// Return between two consecutive price points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReturnPoint {
    /// Settlement date of the later point.
    pub date: Date,
    /// Simple return.
    pub daily_return: f64,
    /// How the value was obtained.
    pub kind: ReturnKind,
}

/// Simple returns of one target contract.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    instrument: TargetInstrument,
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    /// Computes returns between consecutive points of a price series.
    ///
    /// A series with fewer than two points yields no returns.
    ///
    /// # Errors
    ///
    /// Returns `ZeroBasePrice` for a zero base price under
    /// [`ZeroBasePolicy::Reject`].
    pub fn from_prices(series: &PriceSeries, policy: ZeroBasePolicy) -> CurveResult<Self> {
        let points = series
            .points()
            .windows(2)
            .map(|pair| {
                let (base, next) = (&pair[0], &pair[1]);
                let date = next.settlement_date();
                if base.price == 0.0 {
                    let daily_return = match policy {
                        ZeroBasePolicy::EmitZero => 0.0,
                        ZeroBasePolicy::EmitNan => f64::NAN,
                        ZeroBasePolicy::Reject => return Err(CurveError::ZeroBasePrice { date }),
                    };
                    Ok(ReturnPoint {
                        date,
                        daily_return,
                        kind: ReturnKind::ZeroBase,
                    })
                } else {
                    Ok(ReturnPoint {
                        date,
                        daily_return: (next.price - base.price) / base.price,
                        kind: ReturnKind::Computed,
                    })
                }
            })
            .collect::<CurveResult<Vec<_>>>()?;

        Ok(Self {
            instrument: series.instrument().clone(),
            points,
        })
    }

    /// The tracked contract.
    pub fn instrument(&self) -> &TargetInstrument {
        &self.instrument
    }

    /// Returns in settlement date order.
    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    /// Number of returns.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if there are no returns.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
