//! Load resolution queries from CSV

use crate::age::AgeDuration;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

/// One reference date and age to resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchQuery {
    pub id: String,
    /// Kept as entered; parsed when the query runs so a bad date fails one row
    pub reference_date: String,
    pub age: AgeDuration,
}

/// Raw CSV row: `id,reference_date,years,months,days`
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    reference_date: String,
    #[serde(default)]
    years: Option<i64>,
    #[serde(default)]
    months: Option<i64>,
    #[serde(default)]
    days: Option<i64>,
}

impl CsvRow {
    fn into_query(self) -> BatchQuery {
        // Blank age fields count as zero
        BatchQuery {
            id: self.id,
            reference_date: self.reference_date,
            age: AgeDuration::new(
                self.years.unwrap_or(0),
                self.months.unwrap_or(0),
                self.days.unwrap_or(0),
            ),
        }
    }
}

/// Load all queries from a CSV file
pub fn load_queries<P: AsRef<Path>>(path: P) -> Result<Vec<BatchQuery>, csv::Error> {
    let file = File::open(path)?;
    load_queries_from_reader(file)
}

/// Load queries from any reader (e.g., string buffer, stdin)
pub fn load_queries_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<BatchQuery>, csv::Error> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut queries = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        queries.push(row.into_query());
    }

    Ok(queries)
}
