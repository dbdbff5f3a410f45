//! DOB Finder - Date of birth resolution from a reference date and an age
//!
//! This library provides:
//! - A canonical `CalendarDate` with ISO, numeric and split-field parsers
//! - Calendar-exact subtraction of years, months and days with an auditable trail
//! - Age normalization and elapsed-age (the inverse calculation)
//! - Parallel batch resolution from CSV

pub mod calendar;
pub mod age;
pub mod resolver;
pub mod batch;
pub mod error;

// Re-export commonly used types
pub use calendar::{CalendarDate, DateStyle};
pub use age::{AgeDuration, normalize, elapsed};
pub use resolver::{
    BirthdateResolver, ResolverConfig, Resolution, CalculationStep, resolve, resolve_str,
};
pub use error::{DobError, DobResult};
