//! Day count conventions for time-to-maturity calculations.
//!
//! A day count convention turns a pair of dates into a year fraction:
//! the actual number of calendar days divided by a fixed denominator.
//!
//! # Supported Conventions
//!
//! - [`Act365Fixed`]: Actual/365 Fixed
//! - [`Act360`]: Actual/360
//!
//! # Usage
//!
//! ```rust
//! use fwdcurve_core::daycounts::{DayCount, DayCountConvention};
//! use fwdcurve_core::types::Date;
//!
//! let convention: DayCountConvention = "ACT_365".parse().unwrap();
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2026, 1, 1).unwrap();
//!
//! assert_eq!(convention.year_fraction(start, end), 1.0);
//! assert_eq!(convention.to_day_count().day_count(start, end), 365);
//! ```

mod act360;
mod act365;

pub use act360::Act360;
pub use act365::Act365Fixed;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations must be thread-safe (`Send + Sync`) so curves can be
/// built concurrently.
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention (e.g. "ACT/360").
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// Can be negative if `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> f64;

    /// Calculates the number of days between two dates.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Runtime selection of a day count convention.
///
/// This is the configuration knob recognized by the engine. Serialized as
/// `ACT_365` / `ACT_360`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual/365 Fixed.
    #[default]
    #[serde(rename = "ACT_365", alias = "ACT/365", alias = "ACT/365F")]
    Act365Fixed,

    /// Actual/360.
    #[serde(rename = "ACT_360", alias = "ACT/360")]
    Act360,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
            DayCountConvention::Act360 => Box::new(Act360),
        }
    }

    /// Returns the display name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act365Fixed => "ACT/365F",
            DayCountConvention::Act360 => "ACT/360",
        }
    }

    /// Returns the canonical configuration key (`ACT_365`, `ACT_360`).
    #[must_use]
    pub fn config_key(&self) -> &'static str {
        match self {
            DayCountConvention::Act365Fixed => "ACT_365",
            DayCountConvention::Act360 => "ACT_360",
        }
    }

    /// Returns the year basis (denominator).
    #[must_use]
    pub const fn denominator(&self) -> u32 {
        match self {
            DayCountConvention::Act365Fixed => 365,
            DayCountConvention::Act360 => 360,
        }
    }

    /// Year fraction under this convention, through its [`DayCount`].
    ///
    /// Pure; negative when `end < start`.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.to_day_count().year_fraction(start, end)
    }

    /// Returns all available conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[DayCountConvention::Act365Fixed, DayCountConvention::Act360]
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = CoreError;

    /// Parses a day count convention.
    ///
    /// Accepts configuration keys (`ACT_365`, `ACT_360`) and the usual
    /// market spellings (`ACT/365`, `ACT/365F`, `ACTUAL/360`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "ACT_365" | "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACTUAL/365" | "ACT365"
            | "ACT365FIXED" => Ok(DayCountConvention::Act365Fixed),

            "ACT_360" | "ACT/360" | "ACTUAL/360" | "ACT360" => Ok(DayCountConvention::Act360),

            _ => Err(CoreError::unknown_configuration(
                "day count convention",
                s.to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_convention_denominators() {
        assert_eq!(DayCountConvention::Act365Fixed.denominator(), 365);
        assert_eq!(DayCountConvention::Act360.denominator(), 360);
    }

    #[test]
    fn test_enum_dispatches_to_day_count() {
        let start = date(2025, 1, 1);
        let end = date(2025, 7, 1);

        for convention in DayCountConvention::all() {
            let dc = convention.to_day_count();
            assert_eq!(dc.name(), convention.name());
            assert_eq!(dc.day_count(start, end), 181);
            assert_eq!(
                convention.year_fraction(start, end),
                181.0 / f64::from(convention.denominator())
            );
            assert_eq!(convention.year_fraction(start, end), dc.year_fraction(start, end));
        }
    }

    #[test]
    fn test_curve_scenario_fractions() {
        let settlement = date(2025, 1, 1);
        let t = DayCountConvention::Act365Fixed.year_fraction(settlement, date(2025, 4, 1));
        assert_relative_eq!(t, 90.0 / 365.0, epsilon = 1e-15);
    }

    #[test]
    fn test_negative_fraction_permitted() {
        let yf = DayCountConvention::Act360.year_fraction(date(2025, 4, 1), date(2025, 1, 1));
        assert_relative_eq!(yf, -0.25, epsilon = 1e-15);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "ACT_365".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act365Fixed
        );
        assert_eq!(
            "act/365f".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act365Fixed
        );
        assert_eq!(
            "ACT_360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act360
        );
        assert_eq!(
            "Actual/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act360
        );
    }

    #[test]
    fn test_from_str_unknown_is_config_error() {
        let err = "30/360".parse::<DayCountConvention>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownConfiguration { .. }));
    }

    #[test]
    fn test_config_key_roundtrip() {
        for convention in DayCountConvention::all() {
            let parsed: DayCountConvention = convention.config_key().parse().unwrap();
            assert_eq!(*convention, parsed);
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&DayCountConvention::Act360).unwrap();
        assert_eq!(json, "\"ACT_360\"");
        let parsed: DayCountConvention = serde_json::from_str("\"ACT/365\"").unwrap();
        assert_eq!(parsed, DayCountConvention::Act365Fixed);
        assert!(serde_json::from_str::<DayCountConvention>("\"ACT_ACT\"").is_err());
    }

    proptest! {
        #[test]
        fn prop_year_fraction_is_days_over_denominator(offset in -4000i64..4000) {
            let start = date(2025, 1, 1);
            let end = start.add_days(offset);
            for convention in DayCountConvention::all() {
                let expected = offset as f64 / f64::from(convention.denominator());
                prop_assert_eq!(convention.year_fraction(start, end), expected);
            }
        }
    }
}
