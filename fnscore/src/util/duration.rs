//! Elasticsearch duration strings.
//!
//! Decay functions on date fields express `scale` and `offset` as durations
//! (`"30d"`, `"12h"`). Everything is normalised to milliseconds so that the
//! same curve code serves numeric and date fields.

use super::numeric::leading_float;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Time units understood by [`parse_duration_str`]. Only lowercase suffixes
/// are recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Millis,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
}

impl DurationUnit {
    /// Number of milliseconds in one unit.
    pub const fn millis(self) -> f64 {
        match self {
            Self::Millis => 1.0,
            Self::Seconds => 1_000.0,
            Self::Minutes => 60_000.0,
            Self::Hours => 3_600_000.0,
            Self::Days => 86_400_000.0,
            Self::Weeks => 604_800_000.0,
        }
    }

    /// The suffix used in duration strings.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Millis => "ms",
            Self::Seconds => "s",
            Self::Minutes => "m",
            Self::Hours => "h",
            Self::Days => "d",
            Self::Weeks => "w",
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for DurationUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ms" => Ok(Self::Millis),
            "s" => Ok(Self::Seconds),
            "m" => Ok(Self::Minutes),
            "h" => Ok(Self::Hours),
            "d" => Ok(Self::Days),
            "w" => Ok(Self::Weeks),
            _ => Err(format!("Invalid duration unit: {}", s)),
        }
    }
}

/// A `scale`/`offset` as written in a function definition: either a bare
/// number (already in the field's unit) or a duration string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Number(f64),
    Text(String),
}

impl DurationValue {
    /// Resolve to milliseconds (or the raw number for numeric fields).
    pub fn to_millis(&self) -> f64 {
        parse_duration(self)
    }
}

impl From<f64> for DurationValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for DurationValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Convert a number or a duration string to milliseconds.
///
/// Numbers are returned unchanged; strings go through [`parse_duration_str`].
pub fn parse_duration(value: &DurationValue) -> f64 {
    match value {
        DurationValue::Number(n) => *n,
        DurationValue::Text(s) => parse_duration_str(s),
    }
}

/// Convert a duration string such as `"30d"` or `"1.5h"` to milliseconds.
///
/// Strings that do not match `<number><unit>` fall back to their leading
/// number (`"10x"` → 10, `"5D"` → 5) and to 0 when there is none. The result
/// is always finite.
pub fn parse_duration_str(duration: &str) -> f64 {
    lazy_static! {
        static ref DURATION_REGEX: Regex = Regex::new(r"^(\d+(?:\.\d+)?)(ms|s|m|h|d|w)$").unwrap();
    }

    let parsed = match DURATION_REGEX.captures(duration) {
        Some(caps) => {
            let value = caps[1].parse::<f64>().unwrap_or(0.0);
            let unit = caps[2].parse::<DurationUnit>().unwrap_or(DurationUnit::Millis);
            value * unit.millis()
        }
        None => {
            tracing::trace!(duration, "duration has no recognised unit, using leading number");
            leading_float(duration).unwrap_or(0.0)
        }
    };

    if parsed.is_finite() { parsed } else { 0.0 }
}
