use colored::*;
use fnscore::FnScoreError;
use fnscore::models::DataType;
use fnscore::presets::Preset;
use fnscore::simple::SimulationResult;
use fnscore::util::timestamp_to_date;
use serde_json::json;
use std::fmt;
use std::fmt::Write as _;

/// How results are printed.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Coloured, aligned table
    #[default]
    Table,
    /// JSON, for tool integration
    Json,
    /// Comma-separated values
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

pub struct CliColors;

impl CliColors {
    /// Line colours of the score chart, cycled per function.
    pub const SERIES: [(u8, u8, u8); 8] = [
        (0x88, 0x84, 0xd8),
        (0x82, 0xca, 0x9d),
        (0xff, 0xc6, 0x58),
        (0xff, 0x7c, 0x7c),
        (0xa2, 0x8b, 0xd4),
        (0xf4, 0x8f, 0xb1),
        (0x81, 0xc7, 0x84),
        (0x64, 0xb5, 0xf6),
    ];

    pub fn series(index: usize) -> Color {
        let (r, g, b) = Self::SERIES[index % Self::SERIES.len()];
        Color::TrueColor { r, g, b }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn warning() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn info() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }

    pub fn accent() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }
}

/// Print an error: structured JSON on stderr in JSON mode, a coloured line
/// otherwise.
pub fn output_error_json(error: &FnScoreError, output: OutputFormat) {
    if output == OutputFormat::Json {
        let (code, details) = match error {
            FnScoreError::InvalidFunctions(_) => (
                "INVALID_FUNCTIONS",
                Some(json!({
                    "hint": "Provide a JSON array such as [{\"field_value_factor\": {\"field\": \"popularity\"}}]"
                })),
            ),
            FnScoreError::InvalidVariable(_) => ("INVALID_VARIABLE", None),
            FnScoreError::InvalidDate(date) => ("INVALID_DATE", Some(json!({ "date": date }))),
            FnScoreError::InvalidTimestamp(ts) => {
                ("INVALID_TIMESTAMP", Some(json!({ "timestamp": ts })))
            }
            FnScoreError::UnknownPreset(name) => (
                "UNKNOWN_PRESET",
                Some(json!({
                    "preset": name,
                    "available": Preset::all().iter().map(|p| p.name()).collect::<Vec<_>>()
                })),
            ),
            FnScoreError::Configuration(_) => ("CONFIGURATION_ERROR", None),
            FnScoreError::Logging(_) => ("LOGGING_ERROR", None),
            FnScoreError::Io(_) => ("IO_ERROR", None),
            FnScoreError::Other(_) => ("OTHER_ERROR", None),
        };

        let mut error_response = json!({
            "error": true,
            "code": code,
            "message": error.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if let Some(details) = details {
            error_response["details"] = details;
        }

        eprintln!(
            "{}",
            serde_json::to_string_pretty(&error_response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        tracing::error!("{}", error);
        eprintln!("{}", format_error(&error.to_string()));
    }
}

pub fn format_error(msg: &str) -> String {
    format!(
        "{} {}",
        "✗".color(CliColors::error()).bold(),
        msg.color(CliColors::error())
    )
}

pub fn format_warning(msg: &str) -> String {
    format!(
        "{} {}",
        "⚠".color(CliColors::warning()).bold(),
        msg.color(CliColors::warning())
    )
}

pub fn format_info(msg: &str) -> String {
    format!(
        "{} {}",
        "ℹ".color(CliColors::info()).bold(),
        msg.color(CliColors::info())
    )
}

/// Format a number in exponent notation with `digits` fraction digits and a
/// signed exponent, e.g. `1.50e+6`.
pub fn to_exponential(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return format_non_finite(value);
    }
    let formatted = format!("{:.*e}", digits, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

fn format_non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value > 0.0 {
        "Infinity".to_string()
    } else {
        "-Infinity".to_string()
    }
}

/// Row label for `x`: an ISO date on date axes, exponent notation for
/// magnitudes of a million or more, otherwise two decimals.
pub fn format_x(x: f64, data_type: DataType) -> String {
    if !x.is_finite() {
        return format_non_finite(x);
    }
    if data_type == DataType::Date
        && let Ok(date) = timestamp_to_date(x.round() as i64)
    {
        return date;
    }
    if x.abs() >= 1e6 {
        to_exponential(x, 2)
    } else {
        format!("{:.2}", x)
    }
}

/// Score with four decimals.
pub fn format_score(score: f64) -> String {
    if score.is_finite() {
        format!("{:.4}", score)
    } else {
        format_non_finite(score)
    }
}

/// Display name of the function at `index`.
pub fn series_name(index: usize) -> String {
    format!("Function {}", index + 1)
}

/// Render a simulation in the requested format.
pub fn render_simulation(result: &SimulationResult, output: OutputFormat) -> String {
    match output {
        OutputFormat::Json => serde_json::to_string_pretty(&result.points)
            .unwrap_or_else(|_| "[]".to_string()),
        OutputFormat::Csv => render_simulation_csv(result),
        OutputFormat::Table => render_simulation_table(result),
    }
}

fn render_simulation_csv(result: &SimulationResult) -> String {
    let mut out = String::new();
    let mut header = vec!["x".to_string()];
    header.extend((0..result.function_count).map(fnscore::models::function_key));
    if result.has_combined() {
        header.push("combined".to_string());
    }
    let _ = writeln!(out, "{}", header.join(","));

    for point in &result.points {
        let mut row = vec![point.x.to_string()];
        row.extend(point.scores.iter().map(|s| s.to_string()));
        if let Some(combined) = point.combined {
            row.push(combined.to_string());
        }
        let _ = writeln!(out, "{}", row.join(","));
    }
    out
}

fn render_simulation_table(result: &SimulationResult) -> String {
    let data_type = result.variable.data_type;
    let x_width = if data_type == DataType::Date { 24 } else { 12 };
    let column_width = 12;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}",
        format_info(&format!(
            "{} points over {} ({}), {} function(s), score mode {}",
            result.points.len(),
            result.variable.field_name,
            data_type,
            result.function_count,
            result.score_mode
        ))
    );
    let _ = writeln!(out);

    let mut header = format!(
        "{}",
        format!("{:<x_width$}", result.variable.field_name)
            .color(CliColors::muted())
            .bold()
    );
    for i in 0..result.function_count {
        let _ = write!(
            header,
            " {}",
            format!("{:>column_width$}", series_name(i))
                .color(CliColors::series(i))
                .bold()
        );
    }
    if result.has_combined() {
        let _ = write!(
            header,
            " {}",
            format!("{:>column_width$}", "Combined")
                .color(CliColors::accent())
                .bold()
        );
    }
    let _ = writeln!(out, "{}", header);

    let total_width = x_width
        + (column_width + 1) * (result.function_count + usize::from(result.has_combined()));
    let _ = writeln!(out, "{}", "─".repeat(total_width).color(CliColors::muted()));

    for point in &result.points {
        let mut line = format!("{:<x_width$}", format_x(point.x, data_type));
        for (i, score) in point.scores.iter().enumerate() {
            let _ = write!(
                line,
                " {}",
                format!("{:>column_width$}", format_score(*score)).color(CliColors::series(i))
            );
        }
        if let Some(combined) = point.combined {
            let _ = write!(
                line,
                " {}",
                format!("{:>column_width$}", format_score(combined))
                    .color(CliColors::accent())
                    .bold()
            );
        }
        let _ = writeln!(out, "{}", line);
    }
    out
}

/// Render per-function scores at a single field value.
pub fn render_scores(
    value: f64,
    data_type: DataType,
    kinds: &[&str],
    scores: &[f64],
    combined: Option<f64>,
    output: OutputFormat,
) -> String {
    match output {
        OutputFormat::Json => {
            let functions: Vec<_> = kinds
                .iter()
                .zip(scores)
                .enumerate()
                .map(|(i, (kind, score))| json!({ "index": i, "type": kind, "score": score }))
                .collect();
            let mut response = json!({
                "value": value,
                "functions": functions,
            });
            if let Some(combined) = combined {
                response["combined"] = json!(combined);
            }
            serde_json::to_string_pretty(&response).unwrap_or_else(|_| "{}".to_string())
        }
        OutputFormat::Csv => {
            let mut out = String::from("index,type,score\n");
            for (i, (kind, score)) in kinds.iter().zip(scores).enumerate() {
                let _ = writeln!(out, "{},{},{}", i, kind, score);
            }
            if let Some(combined) = combined {
                let _ = writeln!(out, ",combined,{}", combined);
            }
            out
        }
        OutputFormat::Table => {
            let mut out = format!(
                "{}: {}\n",
                "Value".color(CliColors::muted()),
                format_x(value, data_type).bold()
            );
            for (i, (kind, score)) in kinds.iter().zip(scores).enumerate() {
                let _ = writeln!(
                    out,
                    "{} {:<20} {}",
                    format!("{:<12}", series_name(i)).color(CliColors::series(i)).bold(),
                    kind.color(CliColors::muted()),
                    format_score(*score)
                );
            }
            if let Some(combined) = combined {
                let _ = writeln!(
                    out,
                    "{} {:<20} {}",
                    format!("{:<12}", "Combined").color(CliColors::accent()).bold(),
                    "",
                    format_score(combined).bold()
                );
            }
            out
        }
    }
}

/// Render the preset list.
pub fn render_preset_list(output: OutputFormat) -> String {
    match output {
        OutputFormat::Json => {
            let presets: Vec<_> = Preset::all()
                .iter()
                .map(|p| {
                    json!({
                        "name": p.name(),
                        "description": p.description(),
                        "functions": p.value(),
                    })
                })
                .collect();
            serde_json::to_string_pretty(&presets).unwrap_or_else(|_| "[]".to_string())
        }
        OutputFormat::Csv => {
            let mut out = String::from("name,description\n");
            for preset in Preset::all() {
                let _ = writeln!(out, "{},\"{}\"", preset.name(), preset.description());
            }
            out
        }
        OutputFormat::Table => {
            let mut out = String::new();
            for preset in Preset::all() {
                let _ = writeln!(
                    out,
                    "{:<20} {}",
                    preset.name().color(CliColors::accent()).bold(),
                    preset.description().color(CliColors::muted())
                );
            }
            out
        }
    }
}

/// Render one preset's function list. The JSON form is always printed so it
/// can be fed back through `simulate --functions -`.
pub fn render_preset(preset: Preset) -> String {
    preset.json()
}
