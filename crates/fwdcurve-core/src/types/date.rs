//! Date type for settlement and maturity dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// A calendar date.
///
/// Newtype wrapper around `chrono::NaiveDate`. Settlement files carry dates
/// either as ISO `YYYY-MM-DD` or as compact `YYYYMMDD`; both are accepted by
/// [`Date::parse_any`].
///
/// # Example
///
/// ```rust
/// use fwdcurve_core::types::Date;
///
/// let a = Date::parse("2025-01-01").unwrap();
/// let b = Date::parse_compact("20250401").unwrap();
/// assert_eq!(a.days_between(&b), 90);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Creates a date from a compact string (YYYYMMDD).
    pub fn parse_compact(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::invalid_date(format!("Cannot parse: {s}")));
        }
        NaiveDate::parse_from_str(s, "%Y%m%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Parses either an ISO or a compact date.
    pub fn parse_any(s: &str) -> CoreResult<Self> {
        Self::parse(s).or_else(|_| Self::parse_compact(s))
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Calculates the signed number of calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Formats the date as compact `YYYYMMDD`.
    #[must_use]
    pub fn to_compact_string(&self) -> String {
        self.0.format("%Y%m%d").to_string()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl std::str::FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_any(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ymd() {
        let date = Date::from_ymd(2025, 6, 15).unwrap();
        assert_eq!(date, Date::from(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()));
        assert_eq!(date.to_string(), "2025-06-15");
    }

    #[test]
    fn test_invalid_date() {
        assert!(Date::from_ymd(2025, 2, 30).is_err());
    }

    #[test]
    fn test_parse_formats() {
        let iso = Date::parse("2025-07-01").unwrap();
        let compact = Date::parse_compact("20250701").unwrap();
        assert_eq!(iso, compact);
        assert_eq!(Date::parse_any("20250701").unwrap(), iso);
        assert_eq!("2025-07-01".parse::<Date>().unwrap(), iso);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Date::parse("01/07/2025").is_err());
        assert!(Date::parse_compact("2025071").is_err());
        assert!(Date::parse_compact("20251301").is_err());
        assert!(Date::parse_any("not a date").is_err());
    }

    #[test]
    fn test_days_between_signed() {
        let a = Date::from_ymd(2025, 1, 1).unwrap();
        let b = Date::from_ymd(2025, 7, 1).unwrap();
        assert_eq!(a.days_between(&b), 181);
        assert_eq!(b.days_between(&a), -181);
        assert_eq!(a.add_days(181), b);
    }

    #[test]
    fn test_display_and_compact() {
        let date = Date::from_ymd(2025, 4, 1).unwrap();
        assert_eq!(date.to_string(), "2025-04-01");
        assert_eq!(date.to_compact_string(), "20250401");
    }

    #[test]
    fn test_serde_transparent() {
        let date = Date::from_ymd(2025, 4, 1).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2025-04-01\"");
        let back: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
    }
}
