//! Command enum definitions
//!
//! This module contains the CLI command enum that defines the command structure.

use crate::args::*;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display version information
    Version,

    /// Sample functions across a field range and print the score curves
    #[command(
        alias = "sim",
        long_about = r#"
Evaluate every function at evenly spaced values of one field and print the
resulting curves: one column per function, plus a combined column when two
or more functions are given.

FUNCTION DEFINITIONS:
A JSON array in Elasticsearch function_score syntax, e.g.
  [{"field_value_factor": {"field": "popularity", "factor": 1.2, "modifier": "sqrt"}},
   {"gauss": {"created_at": {"origin": "2024-06-01", "scale": "30d"}}, "weight": 2}]

Supported: field_value_factor, gauss, linear, exp. Anything else scores 0.

EXAMPLES:
  # Default preset over popularity 0..100
  fnscore-cli simulate

  # Functions from a file, 11 points, multiplied together
  fnscore-cli simulate --functions scoring.json --points 11 --score-mode multiply

  # Date axis
  fnscore-cli simulate --preset gauss --field created_at --data-type date

  # Pipe JSON in and get CSV out
  cat scoring.json | fnscore-cli simulate --functions - --output csv
"#
    )]
    Simulate(SimulateArgs),

    /// Score functions at a single field value
    Score(ScoreArgs),

    /// List presets or print one preset's function JSON
    Presets(PresetsArgs),

    /// Convert a duration string to milliseconds
    Duration(DurationArgs),

    /// Convert between ISO dates and millisecond timestamps
    Date(DateArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}
