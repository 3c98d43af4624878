//! Builder-style simulation API
//!
//! Wraps the variable, the function list and the sampling settings into a
//! single value that can be run to produce chart-ready data.

use crate::Result;
use crate::config::SimulationConfig;
use crate::models::{DataPoint, SimulationVariable};
use crate::presets::Preset;
use crate::scoring::{FunctionDefinition, ScoreCalculator, ScoreMode, parse_functions};
use serde::Serialize;

/// A configured simulation, ready to run.
///
/// # Examples
///
/// ```rust
/// use fnscore::prelude::*;
///
/// let simulation = Simulation::builder()
///     .preset(Preset::Linear)
///     .point_count(5)
///     .build()
///     .unwrap();
///
/// let result = simulation.run();
/// // linear decay centred on 50 with scale 20: 0.5 at 70, 0 from 90 on
/// assert_eq!(result.points[2].score(0), Some(1.0));
/// assert_eq!(result.points[4].score(0), Some(0.0));
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    variable: SimulationVariable,
    functions: Vec<FunctionDefinition>,
    calculator: ScoreCalculator,
}

impl Simulation {
    /// Simulate `functions` over `variable` with default settings.
    pub fn new(variable: SimulationVariable, functions: Vec<FunctionDefinition>) -> Self {
        Self {
            variable,
            functions,
            calculator: ScoreCalculator::default(),
        }
    }

    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::new()
    }

    /// Sample every function across the variable range.
    pub fn run(&self) -> SimulationResult {
        let points = self.calculator.generate(&self.variable, &self.functions);
        tracing::debug!(
            points = points.len(),
            functions = self.functions.len(),
            "simulation finished"
        );

        SimulationResult {
            variable: self.variable.clone(),
            score_mode: self.score_mode(),
            function_count: self.functions.len(),
            points,
        }
    }

    /// Score every function at a single field value.
    ///
    /// Returns the per-function scores and, for two or more functions,
    /// their combination under the configured score mode.
    pub fn score_at(&self, field_value: f64) -> (Vec<f64>, Option<f64>) {
        self.calculator.score_at(&self.functions, field_value)
    }

    pub fn variable(&self) -> &SimulationVariable {
        &self.variable
    }

    pub fn functions(&self) -> &[FunctionDefinition] {
        &self.functions
    }

    pub fn score_mode(&self) -> ScoreMode {
        self.calculator.config().score_mode
    }

    pub fn point_count(&self) -> usize {
        self.calculator.config().point_count
    }
}

/// Builder for [`Simulation`].
///
/// Unset values fall back to the default variable (`popularity`, 0..100),
/// the default preset's functions, and [`SimulationConfig::default`].
#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    variable: Option<SimulationVariable>,
    functions: Option<Vec<FunctionDefinition>>,
    config: SimulationConfig,
}

impl SimulationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use sampling settings from configuration.
    pub fn config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn variable(mut self, variable: SimulationVariable) -> Self {
        self.variable = Some(variable);
        self
    }

    pub fn functions(mut self, functions: Vec<FunctionDefinition>) -> Self {
        self.functions = Some(functions);
        self
    }

    /// Parse the function list from a JSON array.
    pub fn functions_json(self, json: &str) -> Result<Self> {
        let functions = parse_functions(json)?;
        Ok(self.functions(functions))
    }

    /// Use a preset's function list.
    pub fn preset(self, preset: Preset) -> Self {
        self.functions(preset.functions())
    }

    pub fn score_mode(mut self, score_mode: ScoreMode) -> Self {
        self.config.score_mode = score_mode;
        self
    }

    pub fn point_count(mut self, point_count: usize) -> Self {
        self.config.point_count = point_count;
        self
    }

    /// Validate the settings and the variable bounds.
    pub fn build(self) -> Result<Simulation> {
        let variable = self.variable.unwrap_or_default();
        variable.validate()?;

        Ok(Simulation {
            variable,
            functions: self
                .functions
                .unwrap_or_else(|| Preset::default().functions()),
            calculator: ScoreCalculator::try_new(self.config)?,
        })
    }
}

/// Output of [`Simulation::run`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub variable: SimulationVariable,
    pub score_mode: ScoreMode,
    /// Number of simulated functions; one chart line each
    pub function_count: usize,
    pub points: Vec<DataPoint>,
}

impl SimulationResult {
    /// Whether the points carry a combined score.
    pub fn has_combined(&self) -> bool {
        self.function_count >= 2
    }

    /// `(x, score)` pairs for the function at `index`.
    pub fn series(&self, index: usize) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points
            .iter()
            .filter_map(move |p| p.score(index).map(|s| (p.x, s)))
    }

    /// `(x, combined)` pairs; empty for fewer than two functions.
    pub fn combined_series(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|p| p.combined.map(|c| (p.x, c)))
    }
}
