//! Function definitions as they appear in a `function_score` `functions` array.
//!
//! Elasticsearch tells the variants apart by which key is present rather than
//! by an explicit tag. The JSON is inspected once, when it enters the crate,
//! and turned into a [`FunctionDefinition`]; scoring then matches on the enum.

use super::decay::{DecayFunction, DecayKind};
use super::field_value_factor::FieldValueFactorFunction;
use crate::{FnScoreError, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Key of the `field_value_factor` variant.
pub const FIELD_VALUE_FACTOR_KEY: &str = "field_value_factor";

/// Weight applied when a definition does not set one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// One scoring function.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionDefinition {
    FieldValueFactor(FieldValueFactorFunction),
    Gauss(DecayFunction),
    Linear(DecayFunction),
    Exp(DecayFunction),
    /// No recognised function key; always scores 0
    Unknown,
}

impl FunctionDefinition {
    /// Classify a JSON definition.
    ///
    /// Keys are checked in a fixed order: `field_value_factor`, `gauss`,
    /// `linear`, `exp`. The first one present decides the variant. This never
    /// fails; shapes that cannot be scored become functions that score 0.
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            tracing::debug!("function definition is not an object");
            return Self::Unknown;
        };

        let weight = object
            .get("weight")
            .and_then(Value::as_f64)
            .unwrap_or(DEFAULT_WEIGHT);

        if let Some(body) = object.get(FIELD_VALUE_FACTOR_KEY) {
            return Self::FieldValueFactor(FieldValueFactorFunction::from_json(body, weight));
        }

        for kind in DecayKind::ALL {
            if let Some(body) = object.get(kind.key()) {
                return Self::decay(kind, DecayFunction::from_json(body, weight));
            }
        }

        tracing::debug!(keys = ?object.keys().collect::<Vec<_>>(), "no known function key");
        Self::Unknown
    }

    /// Wrap a decay function in the variant for `kind`.
    pub fn decay(kind: DecayKind, function: DecayFunction) -> Self {
        match kind {
            DecayKind::Gauss => Self::Gauss(function),
            DecayKind::Linear => Self::Linear(function),
            DecayKind::Exp => Self::Exp(function),
        }
    }

    /// The decay curve and its definition, for decay variants.
    pub fn as_decay(&self) -> Option<(DecayKind, &DecayFunction)> {
        match self {
            Self::Gauss(f) => Some((DecayKind::Gauss, f)),
            Self::Linear(f) => Some((DecayKind::Linear, f)),
            Self::Exp(f) => Some((DecayKind::Exp, f)),
            Self::FieldValueFactor(_) | Self::Unknown => None,
        }
    }

    /// Name of the function type (`field_value_factor`, `gauss`, ...).
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::FieldValueFactor(_) => FIELD_VALUE_FACTOR_KEY,
            Self::Unknown => "unknown",
            _ => self.as_decay().map_or("unknown", |(kind, _)| kind.key()),
        }
    }

    /// Field the function reads, when known.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::FieldValueFactor(f) => Some(&f.field),
            Self::Unknown => None,
            _ => self.as_decay().and_then(|(_, f)| f.field.as_deref()),
        }
    }

    /// Weight of the function; `None` for unknown definitions.
    pub fn weight(&self) -> Option<f64> {
        match self {
            Self::FieldValueFactor(f) => Some(f.weight),
            Self::Unknown => None,
            _ => self.as_decay().map(|(_, f)| f.weight),
        }
    }

    /// Score a single field value.
    pub fn score(&self, field_value: f64) -> f64 {
        match self {
            Self::FieldValueFactor(f) => f.score(Some(field_value)),
            Self::Gauss(f) => f.score(field_value, DecayKind::Gauss),
            Self::Linear(f) => f.score(field_value, DecayKind::Linear),
            Self::Exp(f) => f.score(field_value, DecayKind::Exp),
            Self::Unknown => 0.0,
        }
    }
}

impl From<FieldValueFactorFunction> for FunctionDefinition {
    fn from(function: FieldValueFactorFunction) -> Self {
        Self::FieldValueFactor(function)
    }
}

impl From<&Value> for FunctionDefinition {
    fn from(value: &Value) -> Self {
        Self::from_json(value)
    }
}

impl<'de> Deserialize<'de> for FunctionDefinition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|value| Self::from_json(&value))
    }
}

/// Parse the text of a `functions` array.
///
/// This is the only fallible step on the way into the scorer: the input must
/// be valid JSON and its top level must be an array. Individual elements are
/// classified with [`FunctionDefinition::from_json`].
pub fn parse_functions(json: &str) -> Result<Vec<FunctionDefinition>> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| FnScoreError::InvalidFunctions(e.to_string()))?;

    let Value::Array(items) = value else {
        return Err(FnScoreError::InvalidFunctions(
            "functions must be a JSON array".to_string(),
        ));
    };

    let functions: Vec<_> = items.iter().map(FunctionDefinition::from_json).collect();
    tracing::debug!(count = functions.len(), "parsed function definitions");
    Ok(functions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::field_value_factor::Modifier;
    use serde_json::json;

    #[test]
    fn test_variant_by_key() {
        let fvf = FunctionDefinition::from_json(&json!({"field_value_factor": {"field": "p"}}));
        assert_eq!(fvf.kind_name(), "field_value_factor");

        for kind in DecayKind::ALL {
            let mut object = serde_json::Map::new();
            object.insert(kind.key().to_string(), json!({"x": {"origin": 1, "scale": 1}}));
            let def = FunctionDefinition::from_json(&Value::Object(object));
            assert_eq!(def.kind_name(), kind.key());
            assert_eq!(def.as_decay().map(|(k, _)| k), Some(kind));
        }
    }

    #[test]
    fn test_key_priority() {
        let def = FunctionDefinition::from_json(&json!({
            "exp": {"x": {"origin": 0, "scale": 1}},
            "gauss": {"x": {"origin": 0, "scale": 1}},
            "field_value_factor": {"field": "x"}
        }));
        assert_eq!(def.kind_name(), "field_value_factor");

        let def = FunctionDefinition::from_json(&json!({
            "exp": {"x": {"origin": 0, "scale": 1}},
            "linear": {"x": {"origin": 0, "scale": 1}}
        }));
        assert_eq!(def.kind_name(), "linear");
    }

    #[test]
    fn test_unknown_definitions_score_zero() {
        for value in [json!({"unknown_function": {"field": "test"}}), json!({}), json!(42), json!([])] {
            let def = FunctionDefinition::from_json(&value);
            assert_eq!(def, FunctionDefinition::Unknown);
            assert_eq!(def.score(50.0), 0.0);
            assert_eq!(def.weight(), None);
        }
    }

    #[test]
    fn test_decay_key_with_non_object_value() {
        let def = FunctionDefinition::from_json(&json!({"gauss": 3, "weight": 2}));
        assert_eq!(def.kind_name(), "gauss");
        assert_eq!(def.weight(), Some(2.0));
        assert_eq!(def.score(3.0), 0.0);
    }

    #[test]
    fn test_weight() {
        let def = FunctionDefinition::from_json(&json!({"field_value_factor": {"field": "p"}, "weight": 2}));
        assert_eq!(def.weight(), Some(2.0));

        let def = FunctionDefinition::from_json(&json!({"field_value_factor": {"field": "p"}, "weight": "heavy"}));
        assert_eq!(def.weight(), Some(DEFAULT_WEIGHT));
    }

    #[test]
    fn test_dispatch_scores() {
        let def = FunctionDefinition::from_json(&json!({"field_value_factor": {"field": "test", "factor": 5}}));
        assert_eq!(def.score(2.0), 10.0);

        let def = FunctionDefinition::from_json(&json!({"gauss": {"test": {"origin": 10, "scale": 5}}}));
        assert_eq!(def.score(10.0), 1.0);
        assert_eq!(def.field(), Some("test"));
    }

    #[test]
    fn test_parse_functions() {
        let functions = parse_functions(
            r#"[
                {"field_value_factor": {"field": "popularity", "factor": 1.2, "modifier": "sqrt"}, "weight": 1},
                {"linear": {"popularity": {"origin": 50, "scale": 20}}}
            ]"#,
        )
        .unwrap();
        assert_eq!(functions.len(), 2);
        match &functions[0] {
            FunctionDefinition::FieldValueFactor(f) => assert_eq!(f.modifier, Modifier::Sqrt),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(functions[1].kind_name(), "linear");
    }

    #[test]
    fn test_parse_functions_errors() {
        assert!(matches!(
            parse_functions("[{"),
            Err(FnScoreError::InvalidFunctions(_))
        ));
        assert!(matches!(
            parse_functions(r#"{"gauss": {}}"#),
            Err(FnScoreError::InvalidFunctions(_))
        ));
        assert!(parse_functions("[]").unwrap().is_empty());
    }

    #[test]
    fn test_deserialize_inside_larger_document() {
        #[derive(Deserialize)]
        struct Request {
            functions: Vec<FunctionDefinition>,
        }
        let request: Request =
            serde_json::from_str(r#"{"functions": [{"exp": {"x": {"origin": 0, "scale": 1}}}, {"bogus": 1}]}"#)
                .unwrap();
        assert_eq!(request.functions[0].kind_name(), "exp");
        assert_eq!(request.functions[1], FunctionDefinition::Unknown);
    }
}
