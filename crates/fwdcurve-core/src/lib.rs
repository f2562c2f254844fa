//! # fwdcurve Core
//!
//! Core types for the fwdcurve futures forward curve engine.
//!
//! This crate provides the foundational building blocks used by the other
//! workspace crates:
//!
//! - **Types**: the [`Date`] newtype used for settlement and maturity dates
//! - **Day Count Conventions**: ACT/365 Fixed and ACT/360 year fractions
//! - **Errors**: [`CoreError`] for invalid dates and unknown configuration values
//!
//! ## Example
//!
//! ```rust
//! use fwdcurve_core::prelude::*;
//!
//! let settlement = Date::from_ymd(2025, 1, 1).unwrap();
//! let maturity = Date::from_ymd(2025, 4, 1).unwrap();
//!
//! let t = DayCountConvention::Act360.year_fraction(settlement, maturity);
//! assert_eq!(t, 0.25);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]

pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{Act360, Act365Fixed, DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::Date;
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::Date;
