//! # fwdcurve Curves
//!
//! Forward curve engine for exchange-traded futures.
//!
//! This crate provides:
//!
//! - **Observations**: validated settlement-price records ([`Observation`])
//! - **Curve identity**: [`CurveKey`] = (settlement date, product\[, exchange\])
//! - **Forward curves**: [`ForwardCurve`], an immutable time-to-maturity / price
//!   curve with linear or natural cubic spline interpolation
//! - **Repository**: [`CurveRepository`], which partitions observations by key,
//!   builds one curve per key and keeps them ordered by settlement date
//! - **Analytics**: [`PriceSeries`] and [`ReturnSeries`] for a fixed target
//!   maturity sampled across many settlement dates
//!
//! The crate performs no I/O. Curves are never mutated after construction and
//! can be shared freely between threads.
//!
//! ## Quick Start
//!
//! ```rust
//! use fwdcurve_core::Date;
//! use fwdcurve_curves::prelude::*;
//!
//! let d = |s: &str| Date::parse(s).unwrap();
//! let observations = vec![
//!     Observation::new(d("2025-01-01"), d("2025-04-01"), "CL", 70.0).unwrap(),
//!     Observation::new(d("2025-01-01"), d("2025-07-01"), "CL", 72.0).unwrap(),
//!     Observation::new(d("2025-01-02"), d("2025-04-01"), "CL", 71.0).unwrap(),
//!     Observation::new(d("2025-01-02"), d("2025-07-01"), "CL", 73.0).unwrap(),
//! ];
//!
//! let repository = CurveRepository::build(&observations, &BuildSettings::default());
//! assert_eq!(repository.len(), 2);
//!
//! let target = TargetInstrument::new("CL", d("2025-04-01"));
//! let prices = repository.price_series(&target, ValuationAnchor::SettlementDate);
//! let returns = prices.returns(ZeroBasePolicy::EmitZero).unwrap();
//! assert_eq!(returns.len(), 1);
//! assert!((returns.points()[0].daily_return - 1.0 / 70.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod forward_curve;
pub mod interpolation;
pub mod key;
pub mod observation;
pub mod repository;
pub mod series;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::forward_curve::{CurvePoint, ForwardCurve};
    pub use crate::interpolation::InterpolationPolicy;
    pub use crate::key::{CurveKey, KeyScheme};
    pub use crate::observation::Observation;
    pub use crate::repository::{
        group_observations, BuildSettings, CurveBuildFailure, CurveRepository,
    };
    pub use crate::series::{
        PricePoint, PriceSeries, ReturnKind, ReturnPoint, ReturnSeries, SkippedQuote,
        TargetInstrument, ValuationAnchor, ZeroBasePolicy,
    };
    pub use fwdcurve_core::daycounts::DayCountConvention;
}

pub use error::{CurveError, CurveResult};
pub use forward_curve::{CurvePoint, ForwardCurve};
pub use interpolation::InterpolationPolicy;
pub use key::{CurveKey, KeyScheme};
pub use observation::Observation;
pub use repository::{group_observations, BuildSettings, CurveBuildFailure, CurveRepository};
pub use series::{
    PricePoint, PriceSeries, ReturnKind, ReturnPoint, ReturnSeries, SkippedQuote, TargetInstrument,
    ValuationAnchor, ZeroBasePolicy,
};
