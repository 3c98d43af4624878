//! The simulation variable: the field swept along the X axis.

use super::scalar::ScalarValue;
use crate::util::date_to_timestamp;
use crate::{FnScoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default bounds the configuration form switches to for each data type.
pub const DEFAULT_NUMERIC_RANGE: (f64, f64) = (0.0, 100.0);
pub const DEFAULT_DATE_RANGE: (&str, &str) = ("2024-01-01", "2024-12-31");

/// How the variable's bounds are interpreted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Plain numbers
    #[default]
    Numeric,

    /// ISO-8601 dates, swept as millisecond timestamps
    Date,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Numeric => write!(f, "numeric"),
            DataType::Date => write!(f, "date"),
        }
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "numeric" | "number" => Ok(DataType::Numeric),
            "date" => Ok(DataType::Date),
            _ => Err(format!("Invalid data type: {}", s)),
        }
    }
}

/// The X-axis domain of a simulation.
///
/// `min` and `max` are numbers for numeric variables and ISO-8601 strings for
/// date variables. A date variable also accepts raw millisecond numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationVariable {
    /// Name of the swept field
    pub field_name: String,

    /// Interpretation of the bounds
    pub data_type: DataType,

    /// Lower bound
    pub min: ScalarValue,

    /// Upper bound
    pub max: ScalarValue,
}

impl Default for SimulationVariable {
    fn default() -> Self {
        Self::numeric("popularity", DEFAULT_NUMERIC_RANGE.0, DEFAULT_NUMERIC_RANGE.1)
    }
}

impl SimulationVariable {
    /// A numeric variable swept from `min` to `max`.
    pub fn numeric(field_name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            field_name: field_name.into(),
            data_type: DataType::Numeric,
            min: ScalarValue::Number(min),
            max: ScalarValue::Number(max),
        }
    }

    /// A date variable swept between two ISO-8601 dates.
    pub fn date(field_name: impl Into<String>, min: impl Into<String>, max: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            data_type: DataType::Date,
            min: ScalarValue::Text(min.into()),
            max: ScalarValue::Text(max.into()),
        }
    }

    /// Switch the data type, resetting the bounds to that type's defaults.
    pub fn with_data_type(self, data_type: DataType) -> Self {
        match data_type {
            DataType::Numeric => {
                Self::numeric(self.field_name, DEFAULT_NUMERIC_RANGE.0, DEFAULT_NUMERIC_RANGE.1)
            }
            DataType::Date => Self::date(self.field_name, DEFAULT_DATE_RANGE.0, DEFAULT_DATE_RANGE.1),
        }
    }

    /// Resolve both bounds onto the common numeric scale.
    pub fn bounds(&self) -> Result<(f64, f64)> {
        Ok((self.resolve(&self.min)?, self.resolve(&self.max)?))
    }

    /// Check that both bounds can be resolved.
    pub fn validate(&self) -> Result<()> {
        self.bounds().map(|_| ())
    }

    /// Like [`bounds`](Self::bounds), but an unusable bound becomes NaN
    /// instead of an error. Used by the generator, which never fails.
    pub(crate) fn bounds_lossy(&self) -> (f64, f64) {
        let lossy = |bound: &ScalarValue| {
            self.resolve(bound).unwrap_or_else(|e| {
                tracing::warn!(field = %self.field_name, error = %e, "unresolvable variable bound");
                f64::NAN
            })
        };
        (lossy(&self.min), lossy(&self.max))
    }

    fn resolve(&self, bound: &ScalarValue) -> Result<f64> {
        match (self.data_type, bound) {
            (_, ScalarValue::Number(n)) => Ok(*n),
            (DataType::Date, ScalarValue::Text(s)) => date_to_timestamp(s)
                .map(|ts| ts as f64)
                .map_err(|e| {
                    FnScoreError::InvalidVariable(format!(
                        "bound of date field '{}': {}",
                        self.field_name, e
                    ))
                }),
            (DataType::Numeric, ScalarValue::Text(s)) => bound.as_number().ok_or_else(|| {
                FnScoreError::InvalidVariable(format!(
                    "bound '{}' of numeric field '{}' is not a number",
                    s, self.field_name
                ))
            }),
        }
    }
}
