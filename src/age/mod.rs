//! Age durations, display normalization, and elapsed-age computation

mod duration;
mod elapsed;
mod normalize;

pub use duration::AgeDuration;
pub(crate) use duration::plural;
pub use elapsed::elapsed;
pub use normalize::{normalize, AVERAGE_DAYS_PER_MONTH};
