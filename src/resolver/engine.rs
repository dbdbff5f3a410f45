//! Core resolver: subtracts an age from a reference date, one unit at a time

use super::state::ResolutionState;
use super::steps::{Resolution, Trail};
use crate::age::{plural, AgeDuration};
use crate::calendar::{is_leap_year, parse_iso, CalendarDate};
use crate::error::{DobError, DobResult};
use log::{debug, warn};
use std::env;
use std::str::FromStr;

/// Environment variable selecting the validation mode
pub const VALIDATION_MODE_ENV: &str = "DOB_VALIDATION_MODE";

/// How strictly age components are checked before arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Any non-negative components; excess months and days are carried
    #[default]
    Loose,
    /// Months must be below 12 and days below 31
    Strict,
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loose" => Ok(ValidationMode::Loose),
            "strict" => Ok(ValidationMode::Strict),
            other => Err(format!("Unknown validation mode: {}", other)),
        }
    }
}

/// Configuration for a resolver
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    pub mode: ValidationMode,
}

impl ResolverConfig {
    pub fn strict() -> Self {
        Self { mode: ValidationMode::Strict }
    }

    /// Read config from environment or use defaults
    pub fn from_env() -> Self {
        let mode = match env::var(VALIDATION_MODE_ENV) {
            Ok(value) => value.parse::<ValidationMode>().unwrap_or_else(|e| {
                warn!("{}; falling back to loose validation", e);
                ValidationMode::default()
            }),
            Err(_) => ValidationMode::default(),
        };
        Self { mode }
    }
}

/// Resolves a date of birth from a reference date and an age
#[derive(Debug, Clone, Default)]
pub struct BirthdateResolver {
    config: ResolverConfig,
}

impl BirthdateResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Parse an ISO reference date, then resolve
    pub fn resolve_str(&self, reference: &str, age: AgeDuration) -> DobResult<Resolution> {
        let reference = parse_iso(reference)?;
        self.resolve(reference, age)
    }

    /// Subtract `age` from `reference`, recording every intermediate date
    ///
    /// Order is years, then months, then days. Zero components produce no
    /// step. Fails without a trail if validation, range, or the final
    /// not-after-reference check fails.
    pub fn resolve(&self, reference: CalendarDate, age: AgeDuration) -> DobResult<Resolution> {
        self.validate(&age)?;

        let mut state = ResolutionState::from_reference(reference);
        let mut trail = Trail::default();
        trail.push(reference, "Starting with reference date".to_string(), None);

        // Subtract years
        if age.years > 0 {
            let clamped_from = state.subtract_years(age.years)?;
            trail.push(
                state.to_date()?,
                format!("Subtracted {} year{}", age.years, plural(age.years)),
                Some(leap_note(state.year)),
            );
            if let Some(day) = clamped_from {
                push_clamp(&mut trail, state.to_date()?, day);
            }
        }

        // Subtract months
        if age.months > 0 {
            let previous_day = state.day;
            let (years_borrowed, clamped_from) = state.subtract_months(age.months)?;
            let date = state.to_date()?;

            let mut notes = Vec::new();
            if clamped_from.is_none() && date.day() != previous_day {
                // An earlier clamp is undone once the month can hold the reference day
                notes.push(format!("Day restored to {} (reference day-of-month)", date.day()));
            }
            if years_borrowed > 0 {
                notes.push(format!(
                    "Borrowed {} year{} to bring the month into range",
                    years_borrowed,
                    plural(years_borrowed)
                ));
            }
            if date.month() == 2 {
                notes.push(format!(
                    "February {} has {} days ({})",
                    date.year(),
                    date.days_in_month(),
                    leap_note(state.year)
                ));
            }

            trail.push(
                date,
                format!("Subtracted {} month{}", age.months, plural(age.months)),
                (!notes.is_empty()).then(|| notes.join("; ")),
            );
            if let Some(day) = clamped_from {
                push_clamp(&mut trail, date, day);
            }
        }

        // Subtract days
        if age.days > 0 {
            let before = state.to_date()?;
            let months_borrowed = state.subtract_days(age.days)?;
            let after = state.to_date()?;

            // Self-check against chrono's independent day count
            let subtracted = before.days_since(&after);
            if subtracted != age.days {
                return Err(DobError::ArithmeticInconsistency(format!(
                    "subtracted {} days from {} but requested {}",
                    subtracted, before, age.days
                )));
            }

            let note = (months_borrowed > 0).then(|| {
                format!(
                    "Borrowed days from {} earlier month{}",
                    months_borrowed,
                    plural(i64::from(months_borrowed))
                )
            });
            trail.push(after, format!("Subtracted {} day{}", subtracted, plural(subtracted)), note);
        }

        let dob = state.to_date()?;
        ensure_not_after(dob, reference)?;

        debug!("resolved {} minus {} -> {}", reference, age, dob);
        Ok(Resolution::new(reference, dob, trail.into_steps()))
    }

    fn validate(&self, age: &AgeDuration) -> DobResult<()> {
        if let Some((component, value)) = age.first_negative() {
            return Err(DobError::NegativeAge { component, value });
        }

        if self.config.mode == ValidationMode::Strict {
            if age.months >= 12 {
                return Err(DobError::MonthsOutOfRange(age.months));
            }
            if age.days >= 31 {
                return Err(DobError::DaysOutOfRange(age.days));
            }
        }

        Ok(())
    }
}

/// Resolve with the default (loose) configuration
pub fn resolve(reference: CalendarDate, age: AgeDuration) -> DobResult<Resolution> {
    BirthdateResolver::default().resolve(reference, age)
}

/// Parse an ISO reference date and resolve with the default configuration
pub fn resolve_str(reference: &str, age: AgeDuration) -> DobResult<Resolution> {
    BirthdateResolver::default().resolve_str(reference, age)
}

/// A birth date can never come after the date the age was measured at
pub(crate) fn ensure_not_after(dob: CalendarDate, reference: CalendarDate) -> DobResult<()> {
    if dob > reference {
        return Err(DobError::FutureBirthDate { dob, reference });
    }
    Ok(())
}

fn leap_note(year: i64) -> String {
    if is_leap_year(year) {
        format!("{} is a leap year", year)
    } else {
        format!("{} is not a leap year", year)
    }
}

fn push_clamp(trail: &mut Trail, date: CalendarDate, from_day: u32) {
    trail.push_clamp(
        date,
        format!("Adjusted day from {} to {}", from_day, date.day()),
        format!("{} has only {} days", date.month_year(), date.days_in_month()),
    );
}
