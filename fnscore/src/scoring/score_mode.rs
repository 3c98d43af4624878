//! Combining several function scores into one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the scores of several functions at one point are merged
/// (Elasticsearch's `score_mode`).
///
/// Deserialisation is lenient: an unrecognised mode becomes [`ScoreMode::Sum`].
/// Use [`FromStr`] for strict parsing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ScoreMode {
    /// Sum of all scores
    #[default]
    Sum,

    /// Product of all scores
    Multiply,

    /// Arithmetic mean
    Avg,

    /// Score of the first function
    First,

    /// Largest score
    Max,

    /// Smallest score
    Min,
}

impl ScoreMode {
    pub const ALL: [ScoreMode; 6] = [
        ScoreMode::Sum,
        ScoreMode::Multiply,
        ScoreMode::Avg,
        ScoreMode::First,
        ScoreMode::Max,
        ScoreMode::Min,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ScoreMode::Sum => "sum",
            ScoreMode::Multiply => "multiply",
            ScoreMode::Avg => "avg",
            ScoreMode::First => "first",
            ScoreMode::Max => "max",
            ScoreMode::Min => "min",
        }
    }

    /// Merge `scores` according to this mode. An empty slice gives 0.
    pub fn combine(self, scores: &[f64]) -> f64 {
        let Some(&first) = scores.first() else {
            return 0.0;
        };

        match self {
            ScoreMode::Sum => scores.iter().sum(),
            ScoreMode::Multiply => scores.iter().product(),
            ScoreMode::Avg => scores.iter().sum::<f64>() / scores.len() as f64,
            ScoreMode::First => first,
            ScoreMode::Max => scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            ScoreMode::Min => scores.iter().copied().fold(f64::INFINITY, f64::min),
        }
    }
}

/// Merge `scores` with `mode`; see [`ScoreMode::combine`].
pub fn combine_scores(scores: &[f64], mode: ScoreMode) -> f64 {
    mode.combine(scores)
}

impl fmt::Display for ScoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScoreMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScoreMode::ALL
            .into_iter()
            .find(|mode| mode.name() == s.to_lowercase())
            .ok_or_else(|| format!("Invalid score mode: {}", s))
    }
}

impl From<String> for ScoreMode {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::debug!(score_mode = %value, "unrecognised score mode, using sum");
            ScoreMode::Sum
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_modes() {
        let scores = [10.0, 20.0, 30.0];
        assert_eq!(combine_scores(&scores, ScoreMode::Sum), 60.0);
        assert_eq!(combine_scores(&scores, ScoreMode::Multiply), 6000.0);
        assert_eq!(combine_scores(&scores, ScoreMode::Avg), 20.0);
        assert_eq!(combine_scores(&scores, ScoreMode::First), 10.0);
        assert_eq!(combine_scores(&scores, ScoreMode::Max), 30.0);
        assert_eq!(combine_scores(&scores, ScoreMode::Min), 10.0);
    }

    #[test]
    fn test_empty_is_zero() {
        for mode in ScoreMode::ALL {
            assert_eq!(mode.combine(&[]), 0.0, "{mode}");
        }
    }

    #[test]
    fn test_single_score_is_identity() {
        for mode in ScoreMode::ALL {
            assert_eq!(mode.combine(&[4.5]), 4.5, "{mode}");
        }
    }

    #[test]
    fn test_first_keeps_order() {
        assert_eq!(ScoreMode::First.combine(&[3.0, 1.0, 2.0]), 3.0);
        assert_eq!(ScoreMode::Max.combine(&[-3.0, -1.0, -2.0]), -1.0);
        assert_eq!(ScoreMode::Min.combine(&[3.0, 1.0, 2.0]), 1.0);
    }

    #[test]
    fn test_strict_parse() {
        for mode in ScoreMode::ALL {
            assert_eq!(mode.to_string().parse::<ScoreMode>(), Ok(mode));
        }
        assert_eq!("AVG".parse::<ScoreMode>(), Ok(ScoreMode::Avg));
        assert!("median".parse::<ScoreMode>().is_err());
    }

    #[test]
    fn test_lenient_deserialize() {
        let mode: ScoreMode = serde_json::from_str("\"multiply\"").unwrap();
        assert_eq!(mode, ScoreMode::Multiply);

        let mode: ScoreMode = serde_json::from_str("\"median\"").unwrap();
        assert_eq!(mode, ScoreMode::Sum);

        assert_eq!(serde_json::to_string(&ScoreMode::Avg).unwrap(), "\"avg\"");
    }
}
