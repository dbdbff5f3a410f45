//! Birth date resolution with an auditable calculation trail

mod state;
mod engine;
mod steps;

pub use state::DAYS_PER_400_YEARS;
pub use engine::{
    BirthdateResolver, ResolverConfig, ValidationMode, VALIDATION_MODE_ENV, resolve, resolve_str,
};
pub use steps::{CalculationStep, Resolution, ResolutionSummary};
