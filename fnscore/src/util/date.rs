//! ISO-8601 dates and millisecond timestamps.
//!
//! Date-typed simulation variables are swept on the millisecond epoch scale,
//! the unit Elasticsearch uses for `date` fields.

use crate::{FnScoreError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or `YYYYMMDD`.
    static ref CALENDAR_DATE: Regex =
        Regex::new(r"^(\d{4})(?:-(\d{2})(?:-(\d{2}))?|(\d{2})(\d{2}))?$").unwrap();

    /// `hh`, `hh:mm`, `hh:mm:ss[.fff]` or their colon-less forms, followed by
    /// an optional `Z`, `±hh`, `±hhmm` or `±hh:mm`.
    static ref TIME_OF_DAY: Regex = Regex::new(
        r"^(\d{2})(?::?(\d{2})(?::?(\d{2})(?:[.,](\d+))?)?)?(Z|[+-]\d{2}(?::?\d{2})?)?$"
    )
    .unwrap();
}

/// Parse an ISO-8601 string to milliseconds since the Unix epoch.
///
/// Accepts calendar dates in extended (`2024-06-01`), basic (`20240601`) and
/// reduced (`2024-06`, `2024`) form, optionally followed by a time of day
/// (`T12:00`, `T12:00:00.000`, `T120000`) and a UTC offset (`Z`, `+09:00`,
/// `+0900`, `+09`). Anything without an offset is read as UTC.
pub fn date_to_timestamp(date: &str) -> Result<i64> {
    let date = date.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return Ok(parsed.timestamp_millis());
    }

    parse_iso8601(date).ok_or_else(|| FnScoreError::InvalidDate(date.to_string()))
}

fn parse_iso8601(input: &str) -> Option<i64> {
    let (date_part, time_part) = match input.split_once(['T', ' ']) {
        Some((date, time)) => (date, Some(time)),
        None => (input, None),
    };

    let day = parse_calendar_date(date_part)?;
    let (time, offset) = match time_part {
        Some(time) => parse_time_of_day(time)?,
        None => (NaiveTime::from_hms_opt(0, 0, 0)?, FixedOffset::east_opt(0)?),
    };

    day.and_time(time)
        .and_local_timezone(offset)
        .single()
        .map(|dt| dt.timestamp_millis())
}

fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let caps = CALENDAR_DATE.captures(input)?;
    let number = |index: usize| caps.get(index).and_then(|m| m.as_str().parse::<u32>().ok());

    let year = caps[1].parse::<i32>().ok()?;
    let month = number(2).or_else(|| number(4)).unwrap_or(1);
    let day = number(3).or_else(|| number(5)).unwrap_or(1);
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_time_of_day(input: &str) -> Option<(NaiveTime, FixedOffset)> {
    let caps = TIME_OF_DAY.captures(input)?;
    let number = |index: usize| caps.get(index).and_then(|m| m.as_str().parse::<u32>().ok());

    // Fractional seconds are truncated to milliseconds.
    let millis = caps
        .get(4)
        .map(|m| format!("{:0<3}", &m.as_str()[..m.as_str().len().min(3)]))
        .and_then(|digits| digits.parse::<u32>().ok())
        .unwrap_or(0);
    let time = NaiveTime::from_hms_milli_opt(
        number(1)?,
        number(2).unwrap_or(0),
        number(3).unwrap_or(0),
        millis,
    )?;

    let offset = match caps.get(5).map(|m| m.as_str()) {
        None | Some("Z") => FixedOffset::east_opt(0)?,
        Some(designator) => parse_offset(designator)?,
    };
    Some((time, offset))
}

fn parse_offset(designator: &str) -> Option<FixedOffset> {
    let (sign, digits) = designator.split_at(1);
    let digits = digits.replace(':', "");
    let hours = digits.get(..2)?.parse::<i32>().ok()?;
    let minutes = match digits.get(2..) {
        Some("") | None => 0,
        Some(rest) => rest.parse::<i32>().ok()?,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }

    let seconds = hours * 3600 + minutes * 60;
    FixedOffset::east_opt(if sign == "-" { -seconds } else { seconds })
}

/// Format a millisecond timestamp as `YYYY-MM-DDTHH:mm:ss.sssZ`.
pub fn timestamp_to_date(timestamp: i64) -> Result<String> {
    DateTime::<Utc>::from_timestamp_millis(timestamp)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .ok_or(FnScoreError::InvalidTimestamp(timestamp))
}
