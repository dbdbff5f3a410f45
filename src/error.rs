//! Error taxonomy for date-of-birth resolution

use crate::calendar::CalendarDate;
use thiserror::Error;

/// Result type for resolver operations
pub type DobResult<T> = Result<T, DobError>;

/// Every way a resolution can fail. No variant carries a partial trail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DobError {
    // Input validation
    #[error("Invalid reference date: {0}")]
    InvalidReferenceDate(String),

    #[error("Age {component} cannot be negative (got {value})")]
    NegativeAge { component: &'static str, value: i64 },

    #[error("Months must be less than 12 (got {0})")]
    MonthsOutOfRange(i64),

    #[error("Days must be less than 31 (got {0})")]
    DaysOutOfRange(i64),

    // Postcondition
    #[error("The calculated date of birth {dob} would be after the reference date {reference}")]
    FutureBirthDate {
        dob: CalendarDate,
        reference: CalendarDate,
    },

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    // Internal
    #[error("Arithmetic inconsistency: {0}")]
    ArithmeticInconsistency(String),
}

impl DobError {
    /// Stable classification used in batch output
    pub fn kind(&self) -> &'static str {
        match self {
            DobError::InvalidReferenceDate(_) => "InvalidReferenceDate",
            DobError::NegativeAge { .. } => "NegativeAge",
            DobError::MonthsOutOfRange(_) => "MonthsOutOfRange",
            DobError::DaysOutOfRange(_) => "DaysOutOfRange",
            DobError::FutureBirthDate { .. } => "FutureBirthDate",
            DobError::DateOutOfRange(_) => "DateOutOfRange",
            DobError::ArithmeticInconsistency(_) => "ArithmeticInconsistency",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DobError::NegativeAge { component: "months", value: -3 };
        assert_eq!(err.to_string(), "Age months cannot be negative (got -3)");
        assert_eq!(err.kind(), "NegativeAge");

        let dob = CalendarDate::from_ymd(2001, 1, 1).unwrap();
        let reference = CalendarDate::from_ymd(2000, 1, 1).unwrap();
        let err = DobError::FutureBirthDate { dob, reference };
        assert_eq!(
            err.to_string(),
            "The calculated date of birth 2001-01-01 would be after the reference date 2000-01-01"
        );
    }
}
