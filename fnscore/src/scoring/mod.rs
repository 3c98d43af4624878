//! Elasticsearch `function_score` evaluation
//!
//! This module evaluates the scoring functions Elasticsearch accepts inside a
//! `function_score` query and samples them over a range of field values, so
//! their curves can be inspected without running a cluster.
//!
//! # Overview
//!
//! Supported function types:
//! - `field_value_factor` with every Elasticsearch modifier
//! - `gauss`, `linear` and `exp` decay functions, with duration strings
//!   such as `"30d"` accepted for `scale` and `offset`
//!
//! Per-function scores can be merged with any [`ScoreMode`].
//!
//! # Example
//!
//! ```
//! use fnscore::models::SimulationVariable;
//! use fnscore::scoring::{ScoreMode, generate_data_points, parse_functions};
//!
//! let functions = parse_functions(
//!     r#"[{"field_value_factor": {"field": "popularity", "factor": 1.2, "modifier": "sqrt"}}]"#,
//! )
//! .unwrap();
//! let variable = SimulationVariable::default();
//!
//! let points = generate_data_points(&variable, &functions, ScoreMode::Sum, 11);
//! assert_eq!(points.len(), 11);
//! assert_eq!(points[10].x, 100.0);
//! ```

pub mod calculator;
pub mod decay;
pub mod field_value_factor;
pub mod functions;
pub mod score_mode;

pub use calculator::{
    DEFAULT_POINT_COUNT, ScoreCalculator, calculate_function_score, generate_data_points,
};
pub use decay::{DEFAULT_DECAY, DecayFunction, DecayKind, DecayParams};
pub use field_value_factor::{FieldValueFactorFunction, Modifier};
pub use functions::{DEFAULT_WEIGHT, FIELD_VALUE_FACTOR_KEY, FunctionDefinition, parse_functions};
pub use score_mode::{ScoreMode, combine_scores};
