//! Calendar-aware age between a birth date and a reference date
//!
//! Chrono does not provide a built-in year/month/day diff, so the whole-month
//! part is found by stepping back from the reference date with
//! `checked_sub_months` (which clamps the day the same way the resolver does)
//! and the rest is an exact day count. This makes the result the exact inverse
//! of `resolve`.

use super::AgeDuration;
use crate::calendar::CalendarDate;
use crate::error::{DobError, DobResult};
use chrono::{Datelike, Months, NaiveDate};

/// Age at `reference` of someone born on `birth`
pub fn elapsed(birth: CalendarDate, reference: CalendarDate) -> DobResult<AgeDuration> {
    if birth > reference {
        return Err(DobError::FutureBirthDate { dob: birth, reference });
    }

    let birth = birth.to_naive();
    let reference = reference.to_naive();

    // Month distance ignoring days; the true count is this or one less
    let mut total_months = i64::from(reference.year() - birth.year()) * 12
        + i64::from(reference.month())
        - i64::from(birth.month());

    let anchor = loop {
        match months_before(reference, total_months) {
            Some(date) if date >= birth => break date,
            _ if total_months > 0 => total_months -= 1,
            _ => {
                return Err(DobError::ArithmeticInconsistency(format!(
                    "no whole-month anchor between {} and {}",
                    birth, reference
                )))
            }
        }
    };

    let days = anchor.signed_duration_since(birth).num_days();

    Ok(AgeDuration {
        years: total_months / 12,
        months: total_months % 12,
        days,
    })
}

fn months_before(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let months = u32::try_from(months).ok()?;
    date.checked_sub_months(Months::new(months))
}
