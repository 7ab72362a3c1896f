//! Date type for carry calculations.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::{CarryError, CarryResult};

/// A calendar date.
///
/// Newtype over `chrono::NaiveDate`. Serializes as an ISO 8601 string.
///
/// # Example
///
/// ```rust
/// use carry_core::types::Date;
///
/// let start = Date::from_ymd(2025, 4, 14).unwrap();
/// let maturity = Date::parse("2025-06-30").unwrap();
/// assert_eq!(start.days_between(&maturity), 77);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CarryResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CarryError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date in a `const` item.
    ///
    /// Returns `None` for an invalid date, so a bad constant is caught where it
    /// is defined rather than when it is used.
    #[must_use]
    pub const fn from_ymd_opt(year: i32, month: u32, day: u32) -> Option<Self> {
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => Some(Date(date)),
            None => None,
        }
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `CarryError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> CarryResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CarryError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns today's date.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Calculates the number of calendar days from `self` to `other`.
    ///
    /// Negative when `other` is earlier.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = CarryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Add<i64> for Date {
    type Output = Self;

    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_creation() {
        let date = Date::from_ymd(2025, 10, 26).unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 10);
        assert_eq!(date.day(), 26);
    }

    #[test]
    fn test_const_construction() {
        const REFERENCE: Option<Date> = Date::from_ymd_opt(2025, 4, 14);
        assert_eq!(REFERENCE, Some(Date::from_ymd(2025, 4, 14).unwrap()));
        assert_eq!(Date::from_ymd_opt(2025, 2, 30), None);
    }

    #[test]
    fn test_invalid_date() {
        assert!(Date::from_ymd(2025, 2, 30).is_err());
        assert!(Date::from_ymd(2025, 13, 1).is_err());
        assert!(Date::parse("2025/06/30").is_err());
    }

    #[test]
    fn test_parse_and_display() {
        let date: Date = "2026-01-30".parse().unwrap();
        assert_eq!(date.to_string(), "2026-01-30");
        assert_eq!(Date::parse(" 2026-01-30 ").unwrap(), date);
    }

    #[test]
    fn test_day_arithmetic() {
        let start = Date::from_ymd(2025, 4, 14).unwrap();
        let later = start + 30;
        assert_eq!(later, Date::from_ymd(2025, 5, 14).unwrap());
        assert_eq!(later - start, 30);
        assert_eq!(later.days_between(&start), -30);
        assert_eq!(later - 30, start);
    }

    #[test]
    fn test_serde_transparent() {
        let date = Date::from_ymd(2027, 1, 15).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2027-01-15\"");
        let back: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
    }
}
