//! Calculation trail output structures

use crate::calendar::CalendarDate;
use serde::Serialize;

/// One entry of the calculation trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculationStep {
    /// 1-based position in the trail
    pub index: usize,

    /// Date after this step was applied
    pub date: CalendarDate,

    /// What was done, e.g. "Subtracted 9 years"
    pub description: String,

    /// Clarification such as leap-year status or a clamp reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Whether this step only adjusted the day to fit a shorter month
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub clamp: bool,
}

/// Successful resolution: the birth date and how it was reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    reference: CalendarDate,
    dob: CalendarDate,
    steps: Vec<CalculationStep>,
}

impl Resolution {
    pub(crate) fn new(
        reference: CalendarDate,
        dob: CalendarDate,
        steps: Vec<CalculationStep>,
    ) -> Self {
        Self { reference, dob, steps }
    }

    pub fn reference(&self) -> CalendarDate {
        self.reference
    }

    /// Resolved date of birth
    pub fn dob(&self) -> CalendarDate {
        self.dob
    }

    /// Ordered trail, starting with the reference date and ending at `dob`
    pub fn steps(&self) -> &[CalculationStep] {
        &self.steps
    }

    /// Get summary statistics
    pub fn summary(&self) -> ResolutionSummary {
        ResolutionSummary {
            reference: self.reference,
            dob: self.dob,
            step_count: self.steps.len(),
            clamp_count: self.steps.iter().filter(|s| s.clamp).count(),
            days_spanned: self.reference.days_since(&self.dob),
        }
    }
}

/// Summary statistics for a resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionSummary {
    pub reference: CalendarDate,
    pub dob: CalendarDate,
    pub step_count: usize,
    pub clamp_count: usize,
    pub days_spanned: i64,
}

/// Accumulates steps with sequential labels
#[derive(Debug, Default)]
pub(crate) struct Trail {
    steps: Vec<CalculationStep>,
}

impl Trail {
    pub fn push(&mut self, date: CalendarDate, description: String, note: Option<String>) {
        self.record(date, description, note, false);
    }

    pub fn push_clamp(&mut self, date: CalendarDate, description: String, note: String) {
        self.record(date, description, Some(note), true);
    }

    fn record(
        &mut self,
        date: CalendarDate,
        description: String,
        note: Option<String>,
        clamp: bool,
    ) {
        let index = self.steps.len() + 1;
        log::debug!("step {}: {} -> {}", index, description, date);
        self.steps.push(CalculationStep { index, date, description, note, clamp });
    }

    pub fn into_steps(self) -> Vec<CalculationStep> {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_numbers_steps_from_one() {
        let date = CalendarDate::from_ymd(2000, 1, 1).unwrap();
        let mut trail = Trail::default();
        trail.push(date, "Starting with reference date".to_string(), None);
        trail.push_clamp(date, "Adjusted day".to_string(), "why".to_string());

        let steps = trail.into_steps();
        assert_eq!(steps[0].index, 1);
        assert_eq!(steps[1].index, 2);
        assert!(!steps[0].clamp);
        assert!(steps[1].clamp);
    }

    #[test]
    fn test_summary() {
        let reference = CalendarDate::from_ymd(2000, 3, 1).unwrap();
        let dob = CalendarDate::from_ymd(2000, 2, 29).unwrap();
        let mut trail = Trail::default();
        trail.push(reference, "start".to_string(), None);
        trail.push(dob, "Subtracted 1 day".to_string(), None);

        let summary = Resolution::new(reference, dob, trail.into_steps()).summary();
        assert_eq!(summary.step_count, 2);
        assert_eq!(summary.clamp_count, 0);
        assert_eq!(summary.days_spanned, 1);
    }

    #[test]
    fn test_step_serialization_omits_empty_fields() {
        let date = CalendarDate::from_ymd(2000, 1, 1).unwrap();
        let mut trail = Trail::default();
        trail.push(date, "start".to_string(), None);
        let json = serde_json::to_value(&trail.into_steps()[0]).unwrap();
        assert!(json.get("note").is_none());
        assert!(json.get("clamp").is_none());
        assert_eq!(json["index"], 1);
    }
}
