//! Working date tracked while an age is subtracted

use crate::calendar::{days_in_month, CalendarDate};
use crate::error::{DobError, DobResult};

/// Days in one full Gregorian cycle; the calendar repeats every 400 years
pub const DAYS_PER_400_YEARS: i64 = 146_097;

/// Intermediate (year, month, day) during resolution
///
/// Year is kept wide so large ages fail with a range error instead of
/// overflowing. `anchor_day` is the reference day-of-month; year and month
/// steps clamp from it rather than from the already-clamped day, so the
/// outcome only depends on the total number of months subtracted.
#[derive(Debug, Clone)]
pub(crate) struct ResolutionState {
    pub year: i64,
    pub month: u32,
    pub day: u32,
    anchor_day: u32,
}

impl ResolutionState {
    /// Initialize state from the reference date
    pub fn from_reference(reference: CalendarDate) -> Self {
        Self {
            year: i64::from(reference.year()),
            month: reference.month(),
            day: reference.day(),
            anchor_day: reference.day(),
        }
    }

    /// Move back whole years. Returns the unclamped day if it had to shrink.
    pub fn subtract_years(&mut self, years: i64) -> DobResult<Option<u32>> {
        self.year = self
            .year
            .checked_sub(years)
            .ok_or_else(|| DobError::DateOutOfRange(format!("cannot subtract {} years", years)))?;
        Ok(self.settle_day())
    }

    /// Move back whole months, borrowing years as needed.
    /// Returns `(years_borrowed, unclamped_day)`.
    pub fn subtract_months(&mut self, months: i64) -> DobResult<(i64, Option<u32>)> {
        let zero_based = i64::from(self.month) - 1 - months;
        let borrowed = -zero_based.div_euclid(12);

        self.year = self
            .year
            .checked_sub(borrowed)
            .ok_or_else(|| DobError::DateOutOfRange(format!("cannot subtract {} months", months)))?;
        self.month = (zero_based.rem_euclid(12) + 1) as u32;

        Ok((borrowed, self.settle_day()))
    }

    /// Move back a number of days, borrowing whole months while the day is not
    /// positive. Returns how many months were borrowed after the cycle skip.
    pub fn subtract_days(&mut self, days: i64) -> DobResult<u32> {
        let cycles = days / DAYS_PER_400_YEARS;
        self.year = cycles
            .checked_mul(400)
            .and_then(|years| self.year.checked_sub(years))
            .ok_or_else(|| DobError::DateOutOfRange(format!("cannot subtract {} days", days)))?;

        let mut day = i64::from(self.day) - days % DAYS_PER_400_YEARS;
        let mut borrowed = 0;

        while day <= 0 {
            if self.month == 1 {
                self.month = 12;
                self.year -= 1;
            } else {
                self.month -= 1;
            }
            // Length of the month being borrowed from, in its own year
            let length = days_in_month(self.year, self.month);
            day += i64::from(length);
            borrowed += 1;
            log::trace!(
                "borrowed {:04}-{:02} ({} days), day now {}",
                self.year,
                self.month,
                length,
                day
            );
        }

        self.day = u32::try_from(day).map_err(|_| {
            DobError::ArithmeticInconsistency(format!("day {} out of range after borrowing", day))
        })?;
        self.anchor_day = self.day;
        Ok(borrowed)
    }

    /// Snapshot as a validated date
    pub fn to_date(&self) -> DobResult<CalendarDate> {
        CalendarDate::from_wide(self.year, self.month, self.day)
    }

    fn settle_day(&mut self) -> Option<u32> {
        let length = days_in_month(self.year, self.month);
        if self.anchor_day > length {
            self.day = length;
            Some(self.anchor_day)
        } else {
            self.day = self.anchor_day;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(y: i32, m: u32, d: u32) -> ResolutionState {
        ResolutionState::from_reference(CalendarDate::from_ymd(y, m, d).unwrap())
    }

    #[test]
    fn test_subtract_years_clamps_leap_day() {
        let mut s = state(2020, 2, 29);
        assert_eq!(s.subtract_years(1).unwrap(), Some(29));
        assert_eq!((s.year, s.month, s.day), (2019, 2, 28));

        let mut s = state(2020, 2, 29);
        assert_eq!(s.subtract_years(4).unwrap(), None);
        assert_eq!((s.year, s.month, s.day), (2016, 2, 29));
    }

    #[test]
    fn test_subtract_months_borrows_years() {
        let mut s = state(2000, 1, 15);
        assert_eq!(s.subtract_months(2).unwrap(), (1, None));
        assert_eq!((s.year, s.month, s.day), (1999, 11, 15));

        let mut s = state(2000, 5, 10);
        assert_eq!(s.subtract_months(29).unwrap(), (3, None));
        assert_eq!((s.year, s.month, s.day), (1997, 12, 10));

        let mut s = state(2000, 12, 1);
        assert_eq!(s.subtract_months(11).unwrap(), (0, None));
        assert_eq!((s.year, s.month), (2000, 1));
    }

    #[test]
    fn test_months_clamp_from_anchor_day() {
        let mut s = state(2020, 2, 29);
        s.subtract_years(1).unwrap();
        assert_eq!(s.day, 28);
        // Anchor day survives the year clamp
        assert_eq!(s.subtract_months(1).unwrap(), (0, None));
        assert_eq!((s.year, s.month, s.day), (2019, 1, 29));

        let mut s = state(2021, 5, 31);
        assert_eq!(s.subtract_months(1).unwrap(), (0, Some(31)));
        assert_eq!((s.month, s.day), (4, 30));
    }

    #[test]
    fn test_subtract_days_crosses_year_boundary() {
        let mut s = state(2000, 1, 1);
        assert_eq!(s.subtract_days(1).unwrap(), 1);
        assert_eq!((s.year, s.month, s.day), (1999, 12, 31));

        let mut s = state(2000, 3, 1);
        s.subtract_days(1).unwrap();
        assert_eq!((s.year, s.month, s.day), (2000, 2, 29));
    }

    #[test]
    fn test_subtract_days_skips_whole_cycles() {
        let mut s = state(2000, 3, 1);
        assert_eq!(s.subtract_days(DAYS_PER_400_YEARS).unwrap(), 0);
        assert_eq!((s.year, s.month, s.day), (1600, 3, 1));
    }

    #[test]
    fn test_overflow_is_range_error() {
        let mut s = state(2000, 1, 1);
        s.subtract_years(i64::MAX).unwrap();
        assert!(matches!(s.to_date(), Err(DobError::DateOutOfRange(_))));
        assert!(matches!(s.subtract_years(i64::MAX), Err(DobError::DateOutOfRange(_))));
    }
}
