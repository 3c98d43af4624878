//! Sampling score curves over a variable's range.
//!
//! This module turns a simulation variable and a list of functions into the
//! series of [`DataPoint`]s a chart draws: one line per function, plus a
//! combined line when more than one function is simulated.

use super::functions::FunctionDefinition;
use super::score_mode::ScoreMode;
use crate::config::SimulationConfig;
use crate::models::{DataPoint, SimulationVariable};

/// Number of samples taken when the caller does not say otherwise.
pub const DEFAULT_POINT_COUNT: usize = 100;

/// Score one function at one field value.
///
/// Unknown definitions score 0.
pub fn calculate_function_score(function: &FunctionDefinition, field_value: f64) -> f64 {
    function.score(field_value)
}

/// Sample every function at `points` evenly spaced values from the
/// variable's `min` to `max`, both inclusive.
///
/// Each point carries one score per function in definition order. When two
/// or more functions are given, each point also carries their scores merged
/// with `score_mode`; a single function is reported on its own.
///
/// `points == 1` divides the range by zero and yields a single point whose
/// `x` is NaN; use at least two points for a meaningful curve.
pub fn generate_data_points(
    variable: &SimulationVariable,
    functions: &[FunctionDefinition],
    score_mode: ScoreMode,
    points: usize,
) -> Vec<DataPoint> {
    let (min_value, max_value) = variable.bounds_lossy();
    let step = (max_value - min_value) / (points as f64 - 1.0);

    tracing::debug!(
        field = %variable.field_name,
        data_type = %variable.data_type,
        min_value,
        max_value,
        points,
        functions = functions.len(),
        score_mode = %score_mode,
        "generating data points"
    );

    (0..points)
        .map(|i| {
            let x = min_value + step * i as f64;
            let scores: Vec<f64> = functions
                .iter()
                .map(|function| calculate_function_score(function, x))
                .collect();
            let combined = (scores.len() >= 2).then(|| score_mode.combine(&scores));
            DataPoint { x, scores, combined }
        })
        .collect()
}

/// Generator bound to a [`SimulationConfig`], so the score mode and point
/// count need not be repeated on every call.
#[derive(Debug, Clone, Default)]
pub struct ScoreCalculator {
    config: SimulationConfig,
}

impl ScoreCalculator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Create a calculator, rejecting an invalid configuration.
    pub fn try_new(config: SimulationConfig) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Sample `functions` over `variable` using the configured mode and count.
    pub fn generate(
        &self,
        variable: &SimulationVariable,
        functions: &[FunctionDefinition],
    ) -> Vec<DataPoint> {
        generate_data_points(variable, functions, self.config.score_mode, self.config.point_count)
    }

    /// Score every function at one value and merge the results.
    ///
    /// Returns the per-function scores and the combined score (present only
    /// for two or more functions).
    pub fn score_at(&self, functions: &[FunctionDefinition], field_value: f64) -> (Vec<f64>, Option<f64>) {
        let scores: Vec<f64> = functions.iter().map(|f| f.score(field_value)).collect();
        let combined = (scores.len() >= 2).then(|| self.config.score_mode.combine(&scores));
        (scores, combined)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::decay::DecayFunction;
    use crate::scoring::field_value_factor::FieldValueFactorFunction;
    use crate::scoring::functions::parse_functions;

    fn price_variable() -> SimulationVariable {
        SimulationVariable::numeric("price", 0.0, 100.0)
    }

    fn factor(f: f64) -> FunctionDefinition {
        FieldValueFactorFunction::new("price").with_factor(f).into()
    }

    #[test]
    fn test_point_count() {
        let points = generate_data_points(&price_variable(), &[factor(1.0)], ScoreMode::Sum, 10);
        assert_eq!(points.len(), 10);

        let points = generate_data_points(
            &price_variable(),
            &[factor(1.0)],
            ScoreMode::Sum,
            DEFAULT_POINT_COUNT,
        );
        assert_eq!(points.len(), 100);
    }

    #[test]
    fn test_grid_spans_min_to_max() {
        let points = generate_data_points(&price_variable(), &[factor(1.0)], ScoreMode::Sum, 11);
        assert_eq!(points[0].x, 0.0);
        assert_eq!(points[5].x, 50.0);
        assert_eq!(points[10].x, 100.0);
    }

    #[test]
    fn test_scores_per_function() {
        let points = generate_data_points(
            &price_variable(),
            &[factor(1.0), factor(2.0)],
            ScoreMode::Sum,
            5,
        );
        for point in &points {
            assert_eq!(point.scores.len(), 2);
            assert_eq!(point.score(0), Some(point.x));
            assert_eq!(point.score(1), Some(2.0 * point.x));
            assert_eq!(point.combined, Some(3.0 * point.x));
        }
    }

    #[test]
    fn test_single_function_has_no_combined() {
        let points = generate_data_points(&price_variable(), &[factor(2.0)], ScoreMode::Multiply, 5);
        assert!(points.iter().all(|p| p.combined.is_none()));
    }

    #[test]
    fn test_combined_uses_score_mode() {
        let functions = [factor(1.0), factor(3.0)];
        let points = generate_data_points(&price_variable(), &functions, ScoreMode::Max, 3);
        assert_eq!(points[1].combined, Some(150.0));

        let points = generate_data_points(&price_variable(), &functions, ScoreMode::Avg, 3);
        assert_eq!(points[1].combined, Some(100.0));
    }

    #[test]
    fn test_min_equals_max() {
        let variable = SimulationVariable::numeric("price", 50.0, 50.0);
        let points = generate_data_points(&variable, &[factor(1.0)], ScoreMode::Sum, 5);
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|p| p.x == 50.0));
    }

    #[test]
    fn test_single_point_is_nan() {
        let points = generate_data_points(&price_variable(), &[factor(1.0)], ScoreMode::Sum, 1);
        assert_eq!(points.len(), 1);
        assert!(points[0].x.is_nan());
    }

    #[test]
    fn test_zero_points() {
        let points = generate_data_points(&price_variable(), &[factor(1.0)], ScoreMode::Sum, 0);
        assert!(points.is_empty());
    }

    #[test]
    fn test_no_functions() {
        let points = generate_data_points(&price_variable(), &[], ScoreMode::Sum, 5);
        assert_eq!(points.len(), 5);
        for point in &points {
            assert!(point.scores.is_empty());
            assert!(point.combined.is_none());
        }
    }

    #[test]
    fn test_date_variable() {
        let variable =
            SimulationVariable::date("date", "2024-01-01T00:00:00.000Z", "2024-01-02T00:00:00.000Z");
        let points = generate_data_points(&variable, &[factor(1.0)], ScoreMode::Sum, 3);
        assert_eq!(points[0].x, 1_704_067_200_000.0);
        assert_eq!(points[1].x, 1_704_067_200_000.0 + 43_200_000.0);
        assert_eq!(points[2].x, 1_704_153_600_000.0);
    }

    #[test]
    fn test_date_variable_with_duration_decay() {
        let variable =
            SimulationVariable::date("publish_date", "2024-01-01T00:00:00.000Z", "2024-01-31T00:00:00.000Z");
        let functions = parse_functions(
            r#"[{"gauss": {"publish_date": {"origin": 1705276800000, "scale": "10d"}}}]"#,
        )
        .unwrap();
        let points = generate_data_points(&variable, &functions, ScoreMode::Sum, 31);

        // one point per day; the 15th is the origin, the 25th is origin + scale
        assert_eq!(points[14].score(0), Some(1.0));
        assert!((points[24].score(0).unwrap() - 0.5).abs() < 1e-10);
        assert!((points[4].score(0).unwrap() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_mixed_function_types_are_finite() {
        let functions = vec![
            factor(1.0),
            FunctionDefinition::Gauss(DecayFunction::new("score", 50.0, 10.0)),
            FunctionDefinition::Linear(DecayFunction::new("score", 50.0, 20.0)),
            FunctionDefinition::Unknown,
        ];
        let points = generate_data_points(&price_variable(), &functions, ScoreMode::Multiply, 5);
        assert_eq!(points.len(), 5);
        for point in &points {
            assert_eq!(point.scores.len(), 4);
            assert_eq!(point.score(3), Some(0.0));
            assert!(point.scores.iter().all(|s| s.is_finite()));
            assert_eq!(point.combined, Some(0.0));
        }
    }

    #[test]
    fn test_calculator_uses_config() {
        let calc = ScoreCalculator::new(SimulationConfig {
            point_count: 7,
            score_mode: ScoreMode::Multiply,
        });
        let points = calc.generate(&price_variable(), &[factor(1.0), factor(2.0)]);
        assert_eq!(points.len(), 7);
        assert_eq!(points[6].combined, Some(100.0 * 200.0));

        let (scores, combined) = calc.score_at(&[factor(2.0), factor(3.0)], 10.0);
        assert_eq!(scores, vec![20.0, 30.0]);
        assert_eq!(combined, Some(600.0));
    }

    #[test]
    fn test_try_new_rejects_zero_points() {
        let config = SimulationConfig {
            point_count: 0,
            ..Default::default()
        };
        assert!(ScoreCalculator::try_new(config).is_err());
    }
}
