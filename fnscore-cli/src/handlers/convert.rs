//! Duration and date conversion handlers

use crate::args::{DateArgs, DurationArgs};
use crate::context::FnScoreCliContext;
use crate::output::{CliColors, OutputFormat};
use colored::Colorize;
use fnscore::util::{date_to_timestamp, parse_duration_str, timestamp_to_date};
use serde_json::json;

/// Result of converting one date or timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct DateConversion {
    pub timestamp: i64,
    pub date: String,
}

/// Convert `raw` in whichever direction applies: an integer is a millisecond
/// timestamp, anything else is parsed as an ISO date.
pub fn convert_date(raw: &str) -> fnscore::Result<DateConversion> {
    let raw = raw.trim();
    let timestamp = match raw.parse::<i64>() {
        Ok(timestamp) => timestamp,
        Err(_) => date_to_timestamp(raw)?,
    };
    Ok(DateConversion {
        timestamp,
        date: timestamp_to_date(timestamp)?,
    })
}

pub fn handle_duration_command(args: DurationArgs, ctx: &FnScoreCliContext) -> fnscore::Result<()> {
    let millis = parse_duration_str(&args.value);
    match ctx.output {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "input": args.value, "milliseconds": millis }))
                .unwrap_or_else(|_| "{}".to_string())
        ),
        OutputFormat::Csv => println!("input,milliseconds\n{},{}", args.value, millis),
        OutputFormat::Table => println!(
            "{} {} {}",
            args.value.color(CliColors::accent()).bold(),
            "=".color(CliColors::muted()),
            format!("{} ms", millis)
        ),
    }
    Ok(())
}

pub fn handle_date_command(args: DateArgs, ctx: &FnScoreCliContext) -> fnscore::Result<()> {
    let conversion = convert_date(&args.value)?;
    match ctx.output {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "input": args.value,
                "timestamp": conversion.timestamp,
                "date": conversion.date,
            }))
            .unwrap_or_else(|_| "{}".to_string())
        ),
        OutputFormat::Csv => println!("timestamp,date\n{},{}", conversion.timestamp, conversion.date),
        OutputFormat::Table => println!(
            "{} {} {}",
            conversion.date.color(CliColors::accent()).bold(),
            "=".color(CliColors::muted()),
            format!("{} ms", conversion.timestamp)
        ),
    }
    Ok(())
}
