//! Resolve a CSV of reference dates and ages in parallel
//!
//! Input columns: id,reference_date,years,months,days
//! Paths come from arguments, or DOB_BATCH_INPUT / DOB_BATCH_OUTPUT.
//! Writes one CSV row per query; with --json prints outcomes and summary instead.

use anyhow::{Context, Result};
use clap::Parser;
use dob_finder::batch::{load_queries, BatchOutcome, BatchRunner, BatchSummary};
use dob_finder::resolver::ValidationMode;
use dob_finder::ResolverConfig;
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "resolve_batch", about = "Resolve dates of birth for a CSV of queries")]
struct Args {
    /// Input CSV (default: $DOB_BATCH_INPUT or batch_input.csv)
    input: Option<PathBuf>,

    /// Output CSV (default: $DOB_BATCH_OUTPUT or batch_output.csv)
    output: Option<PathBuf>,

    /// Reject months >= 12 and days >= 31 instead of carrying them
    #[arg(long)]
    strict: bool,

    /// Print JSON to stdout instead of writing CSV
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct BatchResponse<'a> {
    summary: BatchSummary,
    outcomes: &'a [BatchOutcome],
    execution_time_ms: u64,
}

fn path_or_env(arg: Option<PathBuf>, var: &str, default: &str) -> PathBuf {
    arg.or_else(|| env::var(var).ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(default))
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let input = path_or_env(args.input, "DOB_BATCH_INPUT", "batch_input.csv");
    let output = path_or_env(args.output, "DOB_BATCH_OUTPUT", "batch_output.csv");

    let mut config = ResolverConfig::from_env();
    if args.strict {
        config.mode = ValidationMode::Strict;
    }

    let queries = load_queries(&input)
        .with_context(|| format!("Loading queries from {}", input.display()))?;

    let runner = BatchRunner::new(config);
    let outcomes = runner.run(&queries);
    let summary = BatchSummary::from_outcomes(&outcomes);

    if args.json {
        let response = BatchResponse {
            summary,
            outcomes: &outcomes,
            execution_time_ms: start.elapsed().as_millis() as u64,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("Loaded {} queries from {}", queries.len(), input.display());

    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("Creating {}", output.display()))?;
    for outcome in &outcomes {
        writer.serialize(outcome.to_row())?;
    }
    writer.flush()?;

    println!(
        "Resolved {} of {} ({} failed) in {:?}",
        summary.resolved,
        summary.total,
        summary.failed,
        start.elapsed()
    );
    for (kind, count) in &summary.failures_by_kind {
        println!("  {:<24} {}", kind, count);
    }
    println!("Results written to: {}", output.display());

    Ok(())
}
