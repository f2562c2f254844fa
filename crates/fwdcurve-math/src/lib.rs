//! # fwdcurve Math
//!
//! Numerical interpolation for the fwdcurve forward curve engine.
//!
//! This crate provides:
//!
//! - **Interpolation**: piecewise linear and natural cubic spline
//!   interpolators behind the [`Interpolator`](interpolation::Interpolator) trait
//!
//! Interpolators never extrapolate: a query outside the sampled range is an
//! error, not a guess.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]

pub mod error;
pub mod interpolation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{CubicSpline, Interpolator, LinearInterpolator};
}

pub use error::{MathError, MathResult};
