//! Calendar date value type, Gregorian rules, and boundary adapters

mod date;
mod format;
pub mod parse;

pub use date::{CalendarDate, is_leap_year, days_in_month};
pub use format::DateStyle;
pub use parse::{parse_iso, parse_numeric, from_fields};
