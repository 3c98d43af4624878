//! Command argument structures
//!
//! This module contains all CLI argument structs organized by command.

use clap::Args;
use std::path::PathBuf;

/// Where the function list comes from. With neither option the default
/// preset is used.
#[derive(Args, Debug, Clone, Default)]
pub struct FunctionSourceArgs {
    /// JSON file holding an array of function definitions ("-" reads stdin)
    #[arg(long, short, conflicts_with = "preset")]
    pub functions: Option<PathBuf>,

    /// Use a named preset instead of a functions file
    #[arg(long, short)]
    pub preset: Option<String>,
}

/// The field being varied.
#[derive(Args, Debug, Clone, Default)]
pub struct VariableArgs {
    /// Name of the simulated field
    #[arg(long)]
    pub field: Option<String>,

    /// Field data type (numeric, date); switching to date resets the range
    /// to 2024-01-01..2024-12-31 unless --min/--max are given
    #[arg(long)]
    pub data_type: Option<String>,

    /// Lower bound of the range (a number, or an ISO date for date fields)
    #[arg(long, allow_hyphen_values = true)]
    pub min: Option<String>,

    /// Upper bound of the range (a number, or an ISO date for date fields)
    #[arg(long, allow_hyphen_values = true)]
    pub max: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub source: FunctionSourceArgs,

    #[command(flatten)]
    pub variable: VariableArgs,

    /// How scores are combined (sum, multiply, avg, first, max, min)
    #[arg(long, short)]
    pub score_mode: Option<String>,

    /// Number of points sampled across the range
    #[arg(long, short = 'n')]
    pub points: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Field value to score (a number, or an ISO date with --data-type date)
    #[arg(long, allow_hyphen_values = true)]
    pub value: String,

    #[command(flatten)]
    pub source: FunctionSourceArgs,

    /// Field data type (numeric, date)
    #[arg(long)]
    pub data_type: Option<String>,

    /// How scores are combined (sum, multiply, avg, first, max, min)
    #[arg(long, short)]
    pub score_mode: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct PresetsArgs {
    /// Preset to print; lists all presets when omitted
    pub name: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DurationArgs {
    /// Duration such as 30d, 1.5h or 250ms; plain numbers are milliseconds
    pub value: String,
}

#[derive(Args, Debug, Clone)]
pub struct DateArgs {
    /// ISO-8601 date to convert to a timestamp, or a millisecond timestamp
    /// to convert to a date
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[clap(name = "powershell")]
    Power,
    Elvish,
}

impl From<Shell> for clap_complete::Shell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::Power => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
