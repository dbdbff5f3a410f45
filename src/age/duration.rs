//! Age expressed as years, months and days elapsed since birth

use serde::{Deserialize, Serialize};
use std::fmt;

/// An age as entered by the caller
///
/// Components are signed so that negative input can be reported instead of
/// silently wrapped. Months and days may exceed their natural range; the
/// resolver carries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgeDuration {
    #[serde(default)]
    pub years: i64,
    #[serde(default)]
    pub months: i64,
    #[serde(default)]
    pub days: i64,
}

impl AgeDuration {
    pub fn new(years: i64, months: i64, days: i64) -> Self {
        Self { years, months, days }
    }

    pub fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    /// First component below zero, in years → months → days order
    pub fn first_negative(&self) -> Option<(&'static str, i64)> {
        [("years", self.years), ("months", self.months), ("days", self.days)]
            .into_iter()
            .find(|&(_, value)| value < 0)
    }
}

/// "X years, Y months, Z days"
impl fmt::Display for AgeDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} year{}, {} month{}, {} day{}",
            self.years,
            plural(self.years),
            self.months,
            plural(self.months),
            self.days,
            plural(self.days)
        )
    }
}

pub(crate) fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}
