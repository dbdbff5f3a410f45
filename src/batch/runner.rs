//! Parallel batch resolution
//!
//! Each query is independent, so rows are resolved with rayon and collected
//! back in input order.

use super::BatchQuery;
use crate::age::AgeDuration;
use crate::error::DobError;
use crate::resolver::{BirthdateResolver, Resolution, ResolverConfig};
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// Why a row failed, in serializable form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    pub kind: &'static str,
    pub message: String,
}

impl From<&DobError> for BatchFailure {
    fn from(err: &DobError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Result for one query: exactly one of `resolution` or `error` is set
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub id: String,
    pub reference_date: String,
    pub age: AgeDuration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<BatchFailure>,
}

impl BatchOutcome {
    fn new(query: &BatchQuery, result: Result<Resolution, DobError>) -> Self {
        let (resolution, error) = match result {
            Ok(resolution) => (Some(resolution), None),
            Err(err) => (None, Some(BatchFailure::from(&err))),
        };
        Self {
            id: query.id.clone(),
            reference_date: query.reference_date.clone(),
            age: query.age,
            resolution,
            error,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }

    /// Flatten for CSV output
    pub fn to_row(&self) -> BatchRow {
        let dob = self.resolution.as_ref().map(Resolution::dob);
        BatchRow {
            id: self.id.clone(),
            reference_date: self.reference_date.clone(),
            years: self.age.years,
            months: self.age.months,
            days: self.age.days,
            dob: dob.map(|d| d.to_string()).unwrap_or_default(),
            dob_long: dob.map(|d| d.long_form()).unwrap_or_default(),
            steps: self.resolution.as_ref().map(|r| r.steps().len()).unwrap_or(0),
            error_kind: self.error.as_ref().map(|e| e.kind).unwrap_or_default().to_string(),
            error: self.error.as_ref().map(|e| e.message.clone()).unwrap_or_default(),
        }
    }
}

/// One line of CSV output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchRow {
    pub id: String,
    pub reference_date: String,
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub dob: String,
    pub dob_long: String,
    pub steps: usize,
    pub error_kind: String,
    pub error: String,
}

/// Aggregate counts over a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub resolved: usize,
    pub failed: usize,
    pub failures_by_kind: BTreeMap<String, usize>,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[BatchOutcome]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Default::default()
        };

        for outcome in outcomes {
            match &outcome.error {
                None => summary.resolved += 1,
                Some(failure) => {
                    summary.failed += 1;
                    *summary.failures_by_kind.entry(failure.kind.to_string()).or_insert(0) += 1;
                }
            }
        }

        summary
    }
}

/// Resolves many queries with one shared configuration
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    resolver: BirthdateResolver,
}

impl BatchRunner {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            resolver: BirthdateResolver::new(config),
        }
    }

    /// Resolve a single query
    pub fn run_one(&self, query: &BatchQuery) -> BatchOutcome {
        let result = self.resolver.resolve_str(&query.reference_date, query.age);
        if let Err(err) = &result {
            warn!("query {} failed: {}", query.id, err);
        }
        BatchOutcome::new(query, result)
    }

    /// Resolve all queries in parallel, preserving input order
    pub fn run(&self, queries: &[BatchQuery]) -> Vec<BatchOutcome> {
        let outcomes: Vec<BatchOutcome> = queries.par_iter().map(|q| self.run_one(q)).collect();

        let summary = BatchSummary::from_outcomes(&outcomes);
        info!(
            "resolved {} of {} queries ({} failed)",
            summary.resolved, summary.total, summary.failed
        );

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::load_queries_from_reader;
    use crate::calendar::CalendarDate;

    fn query(id: &str, reference: &str, years: i64, months: i64, days: i64) -> BatchQuery {
        BatchQuery {
            id: id.to_string(),
            reference_date: reference.to_string(),
            age: AgeDuration::new(years, months, days),
        }
    }

    #[test]
    fn test_batch_preserves_order_and_reports_failures() {
        let queries = vec![
            query("1", "1987-02-01", 9, 11, 2),
            query("2", "2021-02-30", 1, 0, 0),
            query("3", "2000-01-15", 0, 2, 0),
            query("4", "2000-01-01", 0, -1, 0),
        ];

        let outcomes = BatchRunner::default().run(&queries);
        let ids: Vec<_> = outcomes.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);

        assert_eq!(
            outcomes[0].resolution.as_ref().unwrap().dob(),
            CalendarDate::from_ymd(1977, 2, 27).unwrap()
        );
        assert_eq!(outcomes[1].error.as_ref().unwrap().kind, "InvalidReferenceDate");
        assert!(outcomes[2].is_resolved());
        assert_eq!(outcomes[3].error.as_ref().unwrap().kind, "NegativeAge");

        let summary = BatchSummary::from_outcomes(&outcomes);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.resolved, 2);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.failures_by_kind.get("NegativeAge"), Some(&1));
    }

    #[test]
    fn test_strict_batch() {
        let runner = BatchRunner::new(ResolverConfig::strict());
        let outcome = runner.run_one(&query("x", "2000-01-01", 0, 14, 0));
        assert_eq!(outcome.error.unwrap().kind, "MonthsOutOfRange");
    }

    #[test]
    fn test_rows_from_loaded_csv() {
        let input = "id,reference_date,years,months,days\nr1,2000-03-01,0,0,1\nr2,oops,0,0,0\n";
        let queries = load_queries_from_reader(input.as_bytes()).unwrap();
        let rows: Vec<BatchRow> = BatchRunner::default()
            .run(&queries)
            .iter()
            .map(|o| o.to_row())
            .collect();

        assert_eq!(rows[0].dob, "2000-02-29");
        assert_eq!(rows[0].dob_long, "29 February 2000");
        assert_eq!(rows[0].steps, 2);
        assert!(rows[0].error_kind.is_empty());

        assert!(rows[1].dob.is_empty());
        assert_eq!(rows[1].error_kind, "InvalidReferenceDate");
    }
}
