//! Batch resolution of many reference dates and ages

mod loader;
mod runner;

pub use loader::{BatchQuery, load_queries, load_queries_from_reader};
pub use runner::{BatchRunner, BatchOutcome, BatchFailure, BatchRow, BatchSummary};
