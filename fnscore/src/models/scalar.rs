//! Loosely typed scalars from JSON input.

use crate::util::leading_float;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value that may be written either as a JSON number or as a string,
/// such as a decay `origin` or a variable bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Number(f64),
    Text(String),
}

impl ScalarValue {
    /// Numeric reading of the value. Strings use their leading number, so
    /// `"50"` is 50 and `"2024-06-01"` is 2024.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => leading_float(s),
        }
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_deserialization() {
        let n: ScalarValue = serde_json::from_str("50").unwrap();
        let s: ScalarValue = serde_json::from_str("\"50.5\"").unwrap();
        assert_eq!(n, ScalarValue::Number(50.0));
        assert_eq!(s, ScalarValue::Text("50.5".to_string()));
    }

    #[test]
    fn test_as_number() {
        assert_eq!(ScalarValue::from(3.5).as_number(), Some(3.5));
        assert_eq!(ScalarValue::from("42").as_number(), Some(42.0));
        assert_eq!(ScalarValue::from("2024-06-01").as_number(), Some(2024.0));
        assert_eq!(ScalarValue::from("now").as_number(), None);
    }
}
