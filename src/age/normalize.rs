//! Display normalization: carry excess days into months and months into years
//!
//! Uses an average month length, so it is lossy compared with true calendar
//! subtraction. The resolver never calls this; callers may apply it to tidy an
//! entered age before showing it back.

use super::AgeDuration;

/// Average Gregorian month length in days (365.25 / 12, rounded)
pub const AVERAGE_DAYS_PER_MONTH: f64 = 30.44;

/// Carry days ≥ one average month into months, then months ≥ 12 into years
///
/// Negative components are left as entered.
pub fn normalize(age: AgeDuration) -> AgeDuration {
    let mut years = age.years;
    let mut months = age.months;
    let mut days = age.days;

    if days as f64 >= AVERAGE_DAYS_PER_MONTH {
        let additional_months = (days as f64 / AVERAGE_DAYS_PER_MONTH).floor() as i64;
        months = months.saturating_add(additional_months);
        days = (days as f64 % AVERAGE_DAYS_PER_MONTH).round() as i64;
    }

    if months >= 12 {
        years = years.saturating_add(months / 12);
        months %= 12;
    }

    AgeDuration { years, months, days }
}
