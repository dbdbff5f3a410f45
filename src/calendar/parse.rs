//! Boundary parsers feeding the canonical `CalendarDate`
//!
//! Callers collect a reference date in several shapes (ISO text field, numeric
//! day-month-year, split day/month/year inputs). All of them collapse here.

use super::CalendarDate;
use crate::error::{DobError, DobResult};
use chrono::NaiveDate;
use std::str::FromStr;

/// Parse an ISO 8601 `YYYY-MM-DD` date
pub fn parse_iso(input: &str) -> DobResult<CalendarDate> {
    parse_with(input, &["%Y-%m-%d"])
}

/// Parse a numeric `DD-MM-YYYY` (or `DD/MM/YYYY`) date
pub fn parse_numeric(input: &str) -> DobResult<CalendarDate> {
    parse_with(input, &["%d-%m-%Y", "%d/%m/%Y"])
}

/// Build a date from separately entered day, month and year fields
pub fn from_fields(day: &str, month: &str, year: &str) -> DobResult<CalendarDate> {
    let day: u32 = parse_field("day", day)?;
    let month: u32 = parse_field("month", month)?;
    let year: i32 = parse_field("year", year)?;
    CalendarDate::from_ymd(year, month, day)
}

fn parse_field<T: FromStr>(name: &str, value: &str) -> DobResult<T> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DobError::InvalidReferenceDate(format!("{} is required", name)));
    }
    value.parse().map_err(|_| {
        DobError::InvalidReferenceDate(format!("{} '{}' is not a number", name, value))
    })
}

fn parse_with(input: &str, formats: &[&str]) -> DobResult<CalendarDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DobError::InvalidReferenceDate("reference date is required".to_string()));
    }

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .map(CalendarDate::from)
        .ok_or_else(|| DobError::InvalidReferenceDate(format!("'{}' is not a valid date", input)))
}

/// Accepts ISO first, then numeric day-first
impl FromStr for CalendarDate {
    type Err = DobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_iso(s).or_else(|_| parse_numeric(s))
    }
}
