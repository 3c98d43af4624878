//! The `field_value_factor` function.
//!
//! Score formula: `weight * modifier(factor * value)`, where `value` falls
//! back to `missing` when the document has no value for the field.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Transform applied to `factor * value`.
///
/// The logarithmic and root modifiers return 0 outside their domain instead
/// of producing NaN or infinity, and `reciprocal` returns 0 for 0.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    /// Identity
    #[default]
    None,

    /// `log10(x)`
    Log,

    /// `log10(x + 1)`
    Log1p,

    /// `log10(x + 2)`
    Log2p,

    /// `ln(x)`
    Ln,

    /// `ln(x + 1)`
    Ln1p,

    /// `ln(x + 2)`
    Ln2p,

    /// `x * x`
    Square,

    /// `sqrt(x)`
    Sqrt,

    /// `1 / x`
    Reciprocal,
}

impl Modifier {
    pub const ALL: [Modifier; 10] = [
        Modifier::None,
        Modifier::Log,
        Modifier::Log1p,
        Modifier::Log2p,
        Modifier::Ln,
        Modifier::Ln1p,
        Modifier::Ln2p,
        Modifier::Square,
        Modifier::Sqrt,
        Modifier::Reciprocal,
    ];

    /// Apply the modifier to an already scaled value.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Modifier::None => x,
            Modifier::Log => if x > 0.0 { x.log10() } else { 0.0 },
            Modifier::Log1p => if x > -1.0 { (x + 1.0).log10() } else { 0.0 },
            Modifier::Log2p => if x > -2.0 { (x + 2.0).log10() } else { 0.0 },
            Modifier::Ln => if x > 0.0 { x.ln() } else { 0.0 },
            Modifier::Ln1p => if x > -1.0 { (x + 1.0).ln() } else { 0.0 },
            Modifier::Ln2p => if x > -2.0 { (x + 2.0).ln() } else { 0.0 },
            Modifier::Square => x * x,
            Modifier::Sqrt => if x >= 0.0 { x.sqrt() } else { 0.0 },
            Modifier::Reciprocal => if x != 0.0 { 1.0 / x } else { 0.0 },
        }
    }

    /// Parse a modifier name, treating unknown names as [`Modifier::None`].
    pub fn from_name_lossy(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::debug!(modifier = name, "unknown modifier, applying identity");
            Modifier::None
        })
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Modifier::None => "none",
            Modifier::Log => "log",
            Modifier::Log1p => "log1p",
            Modifier::Log2p => "log2p",
            Modifier::Ln => "ln",
            Modifier::Ln1p => "ln1p",
            Modifier::Ln2p => "ln2p",
            Modifier::Square => "square",
            Modifier::Sqrt => "sqrt",
            Modifier::Reciprocal => "reciprocal",
        };
        f.write_str(name)
    }
}

impl FromStr for Modifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Modifier::ALL
            .into_iter()
            .find(|m| m.to_string() == s)
            .ok_or_else(|| format!("Invalid modifier: {}", s))
    }
}

/// A `field_value_factor` function definition with its defaults resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValueFactorFunction {
    /// Field the value is read from
    pub field: String,

    /// Multiplier applied before the modifier. Default: 1
    pub factor: f64,

    /// Transform applied to `factor * value`. Default: none
    pub modifier: Modifier,

    /// Value used when the field is missing. Default: 1
    pub missing: f64,

    /// Multiplier applied to the final score. Default: 1
    pub weight: f64,
}

impl FieldValueFactorFunction {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            factor: 1.0,
            modifier: Modifier::None,
            missing: 1.0,
            weight: 1.0,
        }
    }

    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn with_missing(mut self, missing: f64) -> Self {
        self.missing = missing;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Score a field value; `None` means the document lacks the field.
    pub fn score(&self, field_value: Option<f64>) -> f64 {
        let value = field_value.unwrap_or(self.missing);
        let score = self.weight * self.modifier.apply(self.factor * value);
        if score.is_finite() { score } else { 0.0 }
    }

    /// Build from the body of a `field_value_factor` key. Missing or
    /// non-numeric settings keep their defaults.
    pub(crate) fn from_json(body: &Value, weight: f64) -> Self {
        let number = |key: &str| body.get(key).and_then(Value::as_f64);
        let defaults = Self::new(body.get("field").and_then(Value::as_str).unwrap_or_default());

        Self {
            factor: number("factor").unwrap_or(defaults.factor),
            modifier: body
                .get("modifier")
                .and_then(Value::as_str)
                .map(Modifier::from_name_lossy)
                .unwrap_or_default(),
            missing: number("missing").unwrap_or(defaults.missing),
            weight,
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_factor_and_weight() {
        let func = FieldValueFactorFunction::new("price").with_factor(2.0);
        assert_eq!(func.score(Some(10.0)), 20.0);

        let func = FieldValueFactorFunction::new("price").with_factor(3.0).with_weight(2.0);
        assert_eq!(func.score(Some(5.0)), 30.0);
    }

    #[test]
    fn test_missing_value() {
        let func = FieldValueFactorFunction::new("price").with_factor(2.0);
        assert_eq!(func.score(None), 2.0);

        let func = func.with_missing(7.0);
        assert_eq!(func.score(None), 14.0);
    }

    #[test]
    fn test_log_modifiers() {
        assert!((Modifier::Log.apply(100.0) - 2.0).abs() < EPSILON);
        assert!((Modifier::Log1p.apply(9.0) - 1.0).abs() < EPSILON);
        assert!((Modifier::Log2p.apply(8.0) - 1.0).abs() < EPSILON);
        assert!((Modifier::Ln.apply(std::f64::consts::E) - 1.0).abs() < EPSILON);
        assert!((Modifier::Ln1p.apply(std::f64::consts::E - 1.0) - 1.0).abs() < EPSILON);
        assert!((Modifier::Ln2p.apply(std::f64::consts::E - 2.0) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_modifier_domain_guards() {
        assert_eq!(Modifier::Log.apply(0.0), 0.0);
        assert_eq!(Modifier::Log.apply(-5.0), 0.0);
        assert_eq!(Modifier::Log1p.apply(-1.0), 0.0);
        assert_eq!(Modifier::Log2p.apply(-2.0), 0.0);
        assert_eq!(Modifier::Ln.apply(0.0), 0.0);
        assert_eq!(Modifier::Ln1p.apply(-3.0), 0.0);
        assert_eq!(Modifier::Ln2p.apply(-2.5), 0.0);
        assert_eq!(Modifier::Sqrt.apply(-4.0), 0.0);
        assert_eq!(Modifier::Reciprocal.apply(0.0), 0.0);
    }

    #[test]
    fn test_algebraic_modifiers() {
        assert_eq!(Modifier::None.apply(-3.5), -3.5);
        assert_eq!(Modifier::Square.apply(-3.0), 9.0);
        assert_eq!(Modifier::Sqrt.apply(16.0), 4.0);
        assert_eq!(Modifier::Sqrt.apply(0.0), 0.0);
        assert_eq!(Modifier::Reciprocal.apply(4.0), 0.25);
    }

    #[test]
    fn test_every_modifier_stays_finite() {
        for modifier in Modifier::ALL {
            for x in [-10.0, -2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 1e6] {
                assert!(modifier.apply(x).is_finite(), "{modifier}({x})");
            }
        }
    }

    #[test]
    fn test_modifier_names() {
        for modifier in Modifier::ALL {
            assert_eq!(modifier.to_string().parse::<Modifier>(), Ok(modifier));
        }
        assert!("LOG".parse::<Modifier>().is_err());
        assert_eq!(Modifier::from_name_lossy("cube"), Modifier::None);
        assert_eq!(
            serde_json::to_string(&Modifier::Log1p).unwrap(),
            "\"log1p\""
        );
    }

    #[test]
    fn test_from_json_defaults() {
        let func = FieldValueFactorFunction::from_json(&json!({"field": "popularity"}), 1.0);
        assert_eq!(func, FieldValueFactorFunction::new("popularity"));
    }

    #[test]
    fn test_from_json_settings() {
        let body = json!({"field": "p", "factor": 1.2, "modifier": "sqrt", "missing": 3});
        let func = FieldValueFactorFunction::from_json(&body, 2.0);
        assert_eq!(func.factor, 1.2);
        assert_eq!(func.modifier, Modifier::Sqrt);
        assert_eq!(func.missing, 3.0);
        assert_eq!(func.weight, 2.0);
    }

    #[test]
    fn test_unknown_modifier_is_identity() {
        let body = json!({"field": "p", "factor": 2, "modifier": "cube"});
        let func = FieldValueFactorFunction::from_json(&body, 1.0);
        assert_eq!(func.score(Some(3.0)), 6.0);
    }
}
