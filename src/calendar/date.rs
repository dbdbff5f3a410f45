//! Canonical calendar date and Gregorian month-length rules

use crate::error::{DobError, DobResult};
use chrono::{Datelike, NaiveDate};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// Month lengths for a common year, indexed by month - 1
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Leap-year rule (Gregorian):
///   - divisible by 4 → leap year
///   - except divisible by 100 → not leap year
///   - except divisible by 400 → leap year
pub fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given year/month (1-based month, handles leap years)
///
/// Returns 0 for a month outside 1..=12.
pub fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        1..=12 => DAYS_IN_MONTH[(month - 1) as usize],
        _ => 0,
    }
}

/// A valid proleptic-Gregorian date
///
/// Can only be built through validating constructors, so a value in hand is
/// always a real day. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build from year/month/day, or `None` if no such day exists
    pub fn from_ymd_opt(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Build from year/month/day, failing as an invalid reference date
    pub fn from_ymd(year: i32, month: u32, day: u32) -> DobResult<Self> {
        Self::from_ymd_opt(year, month, day).ok_or_else(|| {
            DobError::InvalidReferenceDate(format!(
                "{:04}-{:02}-{:02} is not a calendar date",
                year, month, day
            ))
        })
    }

    /// Build from the wide intermediate values used during arithmetic
    pub(crate) fn from_wide(year: i64, month: u32, day: u32) -> DobResult<Self> {
        i32::try_from(year)
            .ok()
            .and_then(|y| Self::from_ymd_opt(y, month, day))
            .ok_or_else(|| {
                DobError::DateOutOfRange(format!(
                    "year {} month {} day {} cannot be represented",
                    year, month, day
                ))
            })
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Length of this date's month
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year() as i64, self.month())
    }

    /// Underlying chrono date
    pub fn to_naive(&self) -> NaiveDate {
        self.0
    }

    /// Signed number of days from `earlier` to `self`
    pub fn days_since(&self, earlier: &CalendarDate) -> i64 {
        self.0.signed_duration_since(earlier.0).num_days()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

/// ISO 8601 (`YYYY-MM-DD`)
impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serialized as a structured object so callers can render it any way they like
impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CalendarDate", 4)?;
        state.serialize_field("year", &self.year())?;
        state.serialize_field("month", &self.month())?;
        state.serialize_field("day", &self.day())?;
        state.serialize_field("iso", &self.to_string())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_year_rule() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2020));
        assert!(is_leap_year(1976));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2021));
        assert!(!is_leap_year(2100));
        assert!(is_leap_year(-4));
        assert!(is_leap_year(0));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2021, 1), 31);
        assert_eq!(days_in_month(2021, 2), 28);
        assert_eq!(days_in_month(2020, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2021, 4), 30);
        assert_eq!(days_in_month(2021, 12), 31);
        assert_eq!(days_in_month(2021, 13), 0);

        let total: u32 = (1..=12).map(|m| days_in_month(2024, m)).sum();
        assert_eq!(total, 366);
    }

    #[test]
    fn test_construction_validates() {
        assert!(CalendarDate::from_ymd_opt(2021, 2, 29).is_none());
        assert!(CalendarDate::from_ymd_opt(2020, 2, 29).is_some());
        assert!(CalendarDate::from_ymd_opt(2021, 4, 31).is_none());
        assert!(CalendarDate::from_ymd_opt(2021, 0, 1).is_none());

        let err = CalendarDate::from_ymd(2021, 2, 29).unwrap_err();
        assert!(matches!(err, DobError::InvalidReferenceDate(_)));

        let err = CalendarDate::from_wide(i64::from(i32::MAX) + 1, 1, 1).unwrap_err();
        assert!(matches!(err, DobError::DateOutOfRange(_)));
    }

    #[test]
    fn test_ordering_and_distance() {
        let a = CalendarDate::from_ymd(2000, 2, 28).unwrap();
        let b = CalendarDate::from_ymd(2000, 3, 1).unwrap();
        assert!(a < b);
        assert_eq!(b.days_since(&a), 2);
        assert_eq!(a.days_since(&b), -2);
        assert_eq!(a.days_in_month(), 29);
    }

    #[test]
    fn test_serializes_structured() {
        let date = CalendarDate::from_ymd(1977, 2, 27).unwrap();
        let json = serde_json::to_value(date).unwrap();
        assert_eq!(json["year"], 1977);
        assert_eq!(json["month"], 2);
        assert_eq!(json["day"], 27);
        assert_eq!(json["iso"], "1977-02-27");
    }
}
