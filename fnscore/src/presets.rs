//! Ready-made function lists, one per function type plus a combined example.

use crate::FnScoreError;
use crate::scoring::FunctionDefinition;
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;

/// A named example function list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Preset {
    #[default]
    FieldValueFactor,
    Gauss,
    Linear,
    Exp,
    Multi,
}

impl Preset {
    /// Every preset, in display order.
    pub fn all() -> &'static [Preset] {
        &[
            Preset::FieldValueFactor,
            Preset::Gauss,
            Preset::Linear,
            Preset::Exp,
            Preset::Multi,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::FieldValueFactor => "field_value_factor",
            Preset::Gauss => "gauss",
            Preset::Linear => "linear",
            Preset::Exp => "exp",
            Preset::Multi => "multi",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Preset::FieldValueFactor => "Square-rooted popularity boost",
            Preset::Gauss => "Gaussian decay on creation date around 2024-06-01",
            Preset::Linear => "Linear decay on popularity around 50",
            Preset::Exp => "Exponential decay on popularity from 100",
            Preset::Multi => "Weighted popularity boost plus date decay",
        }
    }

    /// The preset's function list as a JSON array.
    pub fn value(self) -> Value {
        match self {
            Preset::FieldValueFactor => json!([
                {
                    "field_value_factor": {
                        "field": "popularity",
                        "factor": 1.2,
                        "modifier": "sqrt"
                    },
                    "weight": 1
                }
            ]),
            Preset::Gauss => json!([
                {
                    "gauss": {
                        "created_at": {
                            "origin": "2024-06-01",
                            "scale": "30d",
                            "offset": "5d",
                            "decay": 0.5
                        }
                    },
                    "weight": 1
                }
            ]),
            Preset::Linear => json!([
                {
                    "linear": {
                        "popularity": {
                            "origin": 50,
                            "scale": 20,
                            "offset": 0,
                            "decay": 0.5
                        }
                    },
                    "weight": 1
                }
            ]),
            Preset::Exp => json!([
                {
                    "exp": {
                        "popularity": {
                            "origin": 100,
                            "scale": 10,
                            "offset": 0,
                            "decay": 0.5
                        }
                    },
                    "weight": 1
                }
            ]),
            Preset::Multi => json!([
                {
                    "field_value_factor": {
                        "field": "popularity",
                        "factor": 1.2,
                        "modifier": "log1p"
                    },
                    "weight": 2
                },
                {
                    "gauss": {
                        "created_at": {
                            "origin": "2024-06-01",
                            "scale": "30d",
                            "decay": 0.5
                        }
                    },
                    "weight": 1
                }
            ]),
        }
    }

    /// The preset's function list as pretty-printed JSON.
    pub fn json(self) -> String {
        format!("{:#}", self.value())
    }

    /// The preset's function list, parsed.
    pub fn functions(self) -> Vec<FunctionDefinition> {
        match self.value() {
            Value::Array(items) => items.iter().map(FunctionDefinition::from_json).collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = FnScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Preset::all()
            .iter()
            .copied()
            .find(|preset| preset.name() == wanted)
            .ok_or_else(|| FnScoreError::UnknownPreset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{DecayKind, Modifier, parse_functions};

    #[test]
    fn test_every_preset_parses() {
        for preset in Preset::all() {
            let from_text = parse_functions(&preset.json()).unwrap();
            assert_eq!(from_text, preset.functions(), "{}", preset);
            assert!(!from_text.is_empty());
            assert!(
                from_text
                    .iter()
                    .all(|f| !matches!(f, FunctionDefinition::Unknown))
            );
        }
    }

    #[test]
    fn test_names_round_trip() {
        for preset in Preset::all() {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), *preset);
        }
        assert_eq!("GAUSS".parse::<Preset>().unwrap(), Preset::Gauss);
        assert!(matches!(
            "cosine".parse::<Preset>(),
            Err(FnScoreError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_default_preset_scores() {
        let functions = Preset::default().functions();
        assert_eq!(functions.len(), 1);
        match &functions[0] {
            FunctionDefinition::FieldValueFactor(f) => {
                assert_eq!(f.field, "popularity");
                assert_eq!(f.factor, 1.2);
                assert_eq!(f.modifier, Modifier::Sqrt);
            }
            other => panic!("unexpected function {:?}", other),
        }
        // sqrt(1.2 * 30) = 6
        assert!((functions[0].score(30.0) - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_gauss_preset_uses_durations() {
        let functions = Preset::Gauss.functions();
        let (kind, decay) = functions[0].as_decay().unwrap();
        assert_eq!(kind, DecayKind::Gauss);
        let params = decay.params.as_ref().unwrap();
        assert_eq!(params.scale, 30.0 * 86_400_000.0);
        assert_eq!(params.offset, 5.0 * 86_400_000.0);
        // a date string origin keeps only its leading number
        assert_eq!(params.origin, 2024.0);
    }

    #[test]
    fn test_every_entry_carries_explicit_weight() {
        for preset in Preset::all() {
            let value = preset.value();
            let entries = value.as_array().unwrap();
            for entry in entries {
                assert!(entry.get("weight").is_some_and(|w| w.is_number()), "{}", preset);
            }
        }
        assert!(Preset::Linear.json().contains("\"weight\": 1"));
    }

    #[test]
    fn test_multi_preset() {
        let functions = Preset::Multi.functions();
        assert_eq!(functions.len(), 2);
        assert_eq!(functions[0].weight(), Some(2.0));
        assert_eq!(functions[1].kind_name(), "gauss");
    }
}
