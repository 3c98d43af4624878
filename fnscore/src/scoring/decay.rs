//! Decay functions: `gauss`, `linear` and `exp`.
//!
//! A decay function scores a value by its distance from `origin`. Within
//! `offset` of the origin the score is 1; beyond it, the curve falls so that
//! it reaches `decay` at `offset + scale`. All three curves depend only on the
//! absolute distance, so they are symmetric around the origin.

use crate::models::ScalarValue;
use crate::util::duration::{DurationValue, parse_duration};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Default score at `distance == offset + scale`.
pub const DEFAULT_DECAY: f64 = 0.5;

/// Shape of the decay curve.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DecayKind {
    /// Gaussian bell curve
    ///
    /// Formula: `exp(-0.5 * (d / sigma)^2)` with `sigma = scale / sqrt(-2 * ln(decay))`
    Gauss,

    /// Straight line that floors at 0
    ///
    /// Formula: `max(0, (scale - d) / scale * (1 - decay) + decay)`
    Linear,

    /// Exponential falloff
    ///
    /// Formula: `exp(ln(decay) * d / scale)`
    Exp,
}

impl DecayKind {
    pub const ALL: [DecayKind; 3] = [DecayKind::Gauss, DecayKind::Linear, DecayKind::Exp];

    /// The key naming this curve in a function definition.
    pub const fn key(self) -> &'static str {
        match self {
            DecayKind::Gauss => "gauss",
            DecayKind::Linear => "linear",
            DecayKind::Exp => "exp",
        }
    }

    /// Evaluate the curve at `distance` past the offset.
    ///
    /// Returns 0 for parameters outside the curve's domain and for any
    /// non-finite result.
    pub fn curve(self, distance: f64, scale: f64, decay: f64) -> f64 {
        let score = match self {
            DecayKind::Gauss => gauss_decay(distance, scale, decay),
            DecayKind::Linear => linear_decay(distance, scale, decay),
            DecayKind::Exp => exp_decay(distance, scale, decay),
        };
        if score.is_finite() { score } else { 0.0 }
    }
}

impl fmt::Display for DecayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DecayKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DecayKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| format!("Invalid decay function: {}", s))
    }
}

fn gauss_decay(distance: f64, scale: f64, decay: f64) -> f64 {
    if scale <= 0.0 || decay <= 0.0 || decay >= 1.0 {
        return 0.0;
    }
    let sigma = scale / (-2.0 * decay.ln()).sqrt();
    (-0.5 * (distance / sigma).powi(2)).exp()
}

fn linear_decay(distance: f64, scale: f64, decay: f64) -> f64 {
    if scale <= 0.0 {
        return 0.0;
    }
    ((scale - distance) / scale * (1.0 - decay) + decay).max(0.0)
}

fn exp_decay(distance: f64, scale: f64, decay: f64) -> f64 {
    if scale <= 0.0 || decay <= 0.0 {
        return 0.0;
    }
    (decay.ln() * distance / scale).exp()
}

/// Resolved curve parameters for one field.
///
/// `scale` and `offset` are already in the field's unit: plain numbers for
/// numeric fields, milliseconds for date fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayParams {
    pub origin: f64,
    pub scale: f64,
    pub offset: f64,
    pub decay: f64,
}

impl DecayParams {
    pub fn new(origin: f64, scale: f64) -> Self {
        Self {
            origin,
            scale,
            offset: 0.0,
            decay: DEFAULT_DECAY,
        }
    }
}

/// Field entry as written in JSON, before resolution.
#[derive(Debug, Deserialize)]
struct RawDecayParams {
    origin: ScalarValue,
    scale: DurationValue,
    #[serde(default)]
    offset: Option<DurationValue>,
    #[serde(default)]
    decay: Option<f64>,
}

impl RawDecayParams {
    fn resolve(self) -> Option<DecayParams> {
        Some(DecayParams {
            origin: self.origin.as_number()?,
            scale: parse_duration(&self.scale),
            offset: self.offset.as_ref().map(parse_duration).unwrap_or(0.0),
            decay: self.decay.unwrap_or(DEFAULT_DECAY),
        })
    }
}

/// A decay function definition for one field.
///
/// `params` is `None` when the definition could not supply usable
/// parameters; such a function scores 0 everywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayFunction {
    /// Field the definition is keyed on
    pub field: Option<String>,

    /// Curve parameters
    pub params: Option<DecayParams>,

    /// Multiplier applied to the final score. Default: 1
    pub weight: f64,
}

impl DecayFunction {
    pub fn new(field: impl Into<String>, origin: f64, scale: f64) -> Self {
        Self {
            field: Some(field.into()),
            params: Some(DecayParams::new(origin, scale)),
            weight: 1.0,
        }
    }

    /// A definition without usable parameters.
    pub fn unusable(weight: f64) -> Self {
        Self {
            field: None,
            params: None,
            weight,
        }
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        if let Some(params) = self.params.as_mut() {
            params.offset = offset;
        }
        self
    }

    pub fn with_decay(mut self, decay: f64) -> Self {
        if let Some(params) = self.params.as_mut() {
            params.decay = decay;
        }
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Score `field_value` with the curve of `kind`.
    pub fn score(&self, field_value: f64, kind: DecayKind) -> f64 {
        let Some(params) = self.params else {
            tracing::trace!(kind = %kind, "decay function without usable parameters scores 0");
            return 0.0;
        };

        let distance = (field_value - params.origin).abs();
        if distance <= params.offset {
            return self.weight;
        }

        self.weight * kind.curve(distance - params.offset, params.scale, params.decay)
    }

    /// Build from the value stored under a `gauss`/`linear`/`exp` key.
    ///
    /// Only the first field entry is read; further entries are ignored.
    pub(crate) fn from_json(body: &Value, weight: f64) -> Self {
        let Some((field, entry)) = body.as_object().and_then(|fields| fields.iter().next()) else {
            tracing::debug!("decay definition has no field entry");
            return Self::unusable(weight);
        };

        let params = serde_json::from_value::<RawDecayParams>(entry.clone())
            .ok()
            .and_then(RawDecayParams::resolve);
        if params.is_none() {
            tracing::debug!(field = %field, "decay parameters are incomplete");
        }

        Self {
            field: Some(field.clone()),
            params,
            weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const EPSILON: f64 = 1e-10;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_score_is_one_at_origin() {
        for kind in DecayKind::ALL {
            let func = DecayFunction::new("location", 50.0, 10.0);
            assert_eq!(func.score(50.0, kind), 1.0, "{kind}");
            assert_eq!(func.with_weight(3.0).score(50.0, kind), 3.0, "{kind}");
        }
    }

    #[test]
    fn test_score_is_decay_at_scale() {
        for kind in DecayKind::ALL {
            let func = DecayFunction::new("location", 50.0, 10.0);
            assert!(approx(func.score(60.0, kind), 0.5), "{kind}");
            assert!(approx(func.score(40.0, kind), 0.5), "{kind}");

            let func = func.with_decay(0.3);
            assert!(approx(func.score(60.0, kind), 0.3), "{kind}");
        }
    }

    #[test]
    fn test_symmetry() {
        for kind in DecayKind::ALL {
            let func = DecayFunction::new("x", 100.0, 25.0).with_offset(5.0);
            for d in [0.0, 3.0, 7.5, 20.0, 31.0, 80.0, 500.0] {
                assert_eq!(func.score(100.0 + d, kind), func.score(100.0 - d, kind), "{kind} d={d}");
            }
        }
    }

    #[test]
    fn test_offset_plateau() {
        for kind in DecayKind::ALL {
            let func = DecayFunction::new("x", 0.0, 10.0).with_offset(5.0);
            assert_eq!(func.score(5.0, kind), 1.0);
            assert_eq!(func.score(-4.0, kind), 1.0);
            assert!(func.score(5.5, kind) < 1.0);
            assert!(approx(func.score(15.0, kind), 0.5));
        }
    }

    #[test]
    fn test_linear_floors_at_zero() {
        let func = DecayFunction::new("x", 0.0, 10.0);
        assert!(approx(func.score(15.0, DecayKind::Linear), 0.25));
        assert_eq!(func.score(20.0, DecayKind::Linear), 0.0);
        assert_eq!(func.score(1_000.0, DecayKind::Linear), 0.0);
    }

    #[test]
    fn test_gauss_and_exp_stay_positive() {
        let func = DecayFunction::new("x", 0.0, 10.0);
        for d in [20.0, 40.0, 80.0] {
            assert!(func.score(d, DecayKind::Gauss) > 0.0);
            assert!(func.score(d, DecayKind::Exp) > 0.0);
        }
        assert!(func.score(30.0, DecayKind::Gauss) < func.score(20.0, DecayKind::Gauss));
        assert!(func.score(30.0, DecayKind::Exp) < func.score(20.0, DecayKind::Exp));
    }

    #[test]
    fn test_invalid_scale() {
        for kind in DecayKind::ALL {
            for scale in [0.0, -10.0] {
                let func = DecayFunction::new("x", 0.0, scale);
                assert_eq!(func.score(5.0, kind), 0.0, "{kind} scale={scale}");
                // the offset plateau still applies
                assert_eq!(func.score(0.0, kind), 1.0);
            }
        }
    }

    #[test]
    fn test_invalid_decay() {
        let func = |decay| DecayFunction::new("x", 0.0, 10.0).with_decay(decay);

        assert_eq!(func(0.0).score(5.0, DecayKind::Gauss), 0.0);
        assert_eq!(func(1.0).score(5.0, DecayKind::Gauss), 0.0);
        assert_eq!(func(1.5).score(5.0, DecayKind::Gauss), 0.0);
        assert_eq!(func(0.0).score(5.0, DecayKind::Exp), 0.0);
        assert_eq!(func(-0.5).score(5.0, DecayKind::Exp), 0.0);

        // linear accepts any decay; decay of 1 is a flat line
        assert_eq!(func(1.0).score(5.0, DecayKind::Linear), 1.0);
    }

    #[test]
    fn test_non_finite_input_scores_zero() {
        let func = DecayFunction::new("x", 0.0, 10.0);
        for kind in DecayKind::ALL {
            assert_eq!(func.score(f64::NAN, kind), 0.0);
        }
    }

    #[test]
    fn test_from_json_numeric() {
        let body = json!({"popularity": {"origin": 50, "scale": 20, "offset": 0, "decay": 0.5}});
        let func = DecayFunction::from_json(&body, 1.0);
        assert_eq!(func.field.as_deref(), Some("popularity"));
        assert_eq!(
            func.params,
            Some(DecayParams { origin: 50.0, scale: 20.0, offset: 0.0, decay: 0.5 })
        );
    }

    #[test]
    fn test_from_json_durations_and_string_origin() {
        let body = json!({"created_at": {"origin": "1704067200000", "scale": "30d", "offset": "5d"}});
        let params = DecayFunction::from_json(&body, 2.0).params.unwrap();
        assert_eq!(params.origin, 1_704_067_200_000.0);
        assert_eq!(params.scale, 30.0 * 86_400_000.0);
        assert_eq!(params.offset, 5.0 * 86_400_000.0);
        assert_eq!(params.decay, DEFAULT_DECAY);
    }

    #[test]
    fn test_from_json_reads_only_first_field() {
        let body = json!({
            "first": {"origin": 10, "scale": 5},
            "second": {"origin": 99, "scale": 1}
        });
        let func = DecayFunction::from_json(&body, 1.0);
        assert_eq!(func.field.as_deref(), Some("first"));
        assert_eq!(func.params.unwrap().origin, 10.0);
    }

    #[test]
    fn test_from_json_unusable_shapes() {
        for body in [
            json!(5),
            json!(null),
            json!({}),
            json!({"x": 3}),
            json!({"x": {"scale": 10}}),
            json!({"x": {"origin": 10}}),
            json!({"x": {"origin": "later", "scale": 10}}),
        ] {
            let func = DecayFunction::from_json(&body, 1.0);
            assert!(func.params.is_none(), "{body}");
            assert_eq!(func.score(10.0, DecayKind::Gauss), 0.0);
        }
    }

    #[test]
    fn test_decay_kind_names() {
        for kind in DecayKind::ALL {
            assert_eq!(kind.key().parse::<DecayKind>(), Ok(kind));
        }
        assert!("gaussian".parse::<DecayKind>().is_err());
    }
}
