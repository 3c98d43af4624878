//! Unit conversions used by the scoring functions and the sampling grid.
//!
//! Elasticsearch accepts both plain numbers and duration strings such as
//! `"30d"` for decay `scale`/`offset`, and date fields are swept as
//! millisecond timestamps. The helpers here bring all of those onto one
//! numeric scale.

pub mod date;
pub mod duration;
mod numeric;

pub use date::{date_to_timestamp, timestamp_to_date};
pub use duration::{DurationUnit, parse_duration, parse_duration_str};
pub use numeric::leading_float;
