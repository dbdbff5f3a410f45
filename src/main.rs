//! DOB Finder CLI
//!
//! Resolves a single date of birth and prints the calculation steps.
//! Validation mode defaults to DOB_VALIDATION_MODE; --strict overrides it.

use anyhow::{Context, Result};
use clap::Parser;
use dob_finder::{
    normalize, AgeDuration, BirthdateResolver, CalculationStep, CalendarDate, DateStyle,
    ResolverConfig,
};
use dob_finder::resolver::ValidationMode;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(
    name = "dob_finder",
    version,
    about = "Calculate a date of birth from a reference date and an age"
)]
struct Args {
    /// Reference date (YYYY-MM-DD or DD-MM-YYYY)
    #[arg(short, long)]
    reference: String,

    /// Whole years of age at the reference date
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    years: i64,

    /// Additional months
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    months: i64,

    /// Additional days
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    days: i64,

    /// Reject months >= 12 and days >= 31 instead of carrying them
    #[arg(long)]
    strict: bool,

    /// Carry excess days and months into larger units before resolving
    #[arg(long)]
    normalize: bool,

    /// Date rendering: long, numeric or iso
    #[arg(long, default_value = "long")]
    format: DateStyle,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonResponse<'a> {
    reference: CalendarDate,
    age: AgeDuration,
    dob: CalendarDate,
    dob_formatted: String,
    steps: &'a [CalculationStep],
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut config = ResolverConfig::from_env();
    if args.strict {
        config.mode = ValidationMode::Strict;
    }

    let reference: CalendarDate = args
        .reference
        .parse()
        .with_context(|| format!("Reading reference date '{}'", args.reference))?;

    let entered = AgeDuration::new(args.years, args.months, args.days);
    let age = if args.normalize { normalize(entered) } else { entered };

    let resolver = BirthdateResolver::new(config);
    let resolution = resolver
        .resolve(reference, age)
        .with_context(|| format!("Resolving date of birth for {} at {}", age, reference))?;

    if args.json {
        let response = JsonResponse {
            reference,
            age,
            dob: resolution.dob(),
            dob_formatted: resolution.dob().render(args.format),
            steps: resolution.steps(),
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("DOB Finder v{}", env!("CARGO_PKG_VERSION"));
    println!("==================\n");

    println!("Reference date: {}", reference.render(args.format));
    if age != entered {
        println!("Age (entered):  {}", entered);
    }
    println!("Age:            {}", age);
    println!();

    println!("Calculation steps:");
    for step in resolution.steps() {
        let note = step.note.as_deref().map(|n| format!(" ({})", n)).unwrap_or_default();
        println!(
            "{:>4}. {:<20} {}{}",
            step.index,
            step.date.render(args.format),
            step.description,
            note
        );
    }

    let summary = resolution.summary();
    println!();
    println!("Date of birth:  {}", resolution.dob().render(args.format));
    println!("  ISO:          {}", resolution.dob());
    println!("  Numeric:      {}", resolution.dob().numeric());
    println!("  Days before reference: {}", summary.days_spanned);

    Ok(())
}
