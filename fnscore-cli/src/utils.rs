use crate::args::{FunctionSourceArgs, VariableArgs};
use fnscore::FnScoreError;
use fnscore::models::{DataType, ScalarValue, SimulationVariable};
use fnscore::presets::Preset;
use fnscore::scoring::{FunctionDefinition, ScoreMode, parse_functions};
use fnscore::util::date_to_timestamp;
use std::io::Read;
use std::path::Path;

/// Read the function list from a file, stdin (`-`), a preset, or fall back
/// to the default preset.
pub fn load_functions(source: &FunctionSourceArgs) -> fnscore::Result<Vec<FunctionDefinition>> {
    if let Some(path) = &source.functions {
        let json = read_source(path)?;
        return parse_functions(&json);
    }

    let preset = match &source.preset {
        Some(name) => name.parse::<Preset>()?,
        None => Preset::default(),
    };
    tracing::debug!(preset = %preset, "using preset functions");
    Ok(preset.functions())
}

fn read_source(path: &Path) -> fnscore::Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }

    std::fs::read_to_string(path).map_err(|e| {
        FnScoreError::Other(format!(
            "Failed to read functions file {}: {}",
            path.display(),
            e
        ))
    })
}

/// Build the simulation variable from command-line overrides.
///
/// Changing the data type resets the range to that type's default before
/// explicit `--min`/`--max` are applied.
pub fn build_variable(args: &VariableArgs) -> fnscore::Result<SimulationVariable> {
    let mut variable = SimulationVariable::default();

    if let Some(data_type) = &args.data_type {
        variable = variable.with_data_type(parse_data_type(data_type)?);
    }
    if let Some(field) = &args.field {
        variable.field_name = field.clone();
    }
    if let Some(min) = &args.min {
        variable.min = parse_bound(min);
    }
    if let Some(max) = &args.max {
        variable.max = parse_bound(max);
    }

    variable.validate()?;
    Ok(variable)
}

fn parse_bound(raw: &str) -> ScalarValue {
    match raw.trim().parse::<f64>() {
        Ok(n) => ScalarValue::Number(n),
        Err(_) => ScalarValue::Text(raw.to_string()),
    }
}

pub fn parse_data_type(raw: &str) -> fnscore::Result<DataType> {
    raw.parse().map_err(|_| {
        FnScoreError::InvalidVariable(format!(
            "Invalid data type: {} (expected numeric or date)",
            raw
        ))
    })
}

/// Strict score mode parsing; the library's lenient fallback to `sum` would
/// hide typos on the command line.
pub fn parse_score_mode(raw: &str) -> fnscore::Result<ScoreMode> {
    raw.parse().map_err(|_| {
        let valid: Vec<&str> = ScoreMode::ALL.iter().map(|m| m.name()).collect();
        FnScoreError::Other(format!(
            "Invalid score mode: {} (expected one of {})",
            raw,
            valid.join(", ")
        ))
    })
}

/// Parse a single field value, accepting ISO dates for date fields.
pub fn parse_field_value(raw: &str, data_type: DataType) -> fnscore::Result<f64> {
    if let Ok(n) = raw.trim().parse::<f64>() {
        return Ok(n);
    }

    match data_type {
        DataType::Date => Ok(date_to_timestamp(raw)? as f64),
        DataType::Numeric => Err(FnScoreError::Other(format!(
            "Invalid field value: {} is not a number",
            raw
        ))),
    }
}
