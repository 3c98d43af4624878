use clap::{CommandFactory, Parser};
use fnscore_cli::commands::Commands;
use fnscore_cli::handlers::*;
use fnscore_cli::{FnScoreCliContext, OutputFormat, output_error_json};
use is_terminal::IsTerminal;
use fnscore::config::LogLevel;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "fnscore-cli")]
#[command(about = "Simulate Elasticsearch function_score curves", long_about = None)]
#[command(version = fnscore::VERSION)]
struct Cli {
    /// Configuration file (toml, yaml, yml or json); its [logging] section
    /// also controls CLI log output
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Output format - use json or csv for tool integration
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Table, global = true)]
    output: OutputFormat,

    /// Use machine-readable output (alias for --output json)
    #[arg(long, global = true)]
    machine: bool,

    /// Verbose output (debug level logging)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Quiet mode (suppress all logging output)
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Determine output format - priority: machine flag > env var > cli arg
    let output = if cli.machine {
        OutputFormat::Json
    } else if let Ok(env_output) = std::env::var("FNSCORE_OUTPUT") {
        match env_output.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "table" => OutputFormat::Table,
            _ => cli.output,
        }
    } else {
        cli.output
    };

    let is_quiet = cli.quiet
        || std::env::var("FNSCORE_QUIET")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

    // Machine mode keeps stderr clean apart from structured errors
    let level_override = if is_quiet || cli.machine {
        Some(LogLevel::Error)
    } else if cli.verbose {
        Some(LogLevel::Debug)
    } else {
        None
    };

    if output != OutputFormat::Table || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run(cli.command, cli.config, output, level_override) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output_error_json(&e, output);
            ExitCode::FAILURE
        }
    }
}

fn run(
    command: Commands,
    config: Option<PathBuf>,
    output: OutputFormat,
    level_override: Option<LogLevel>,
) -> fnscore::Result<()> {
    match command {
        Commands::Version => {
            println!("fnscore CLI v{}", fnscore::VERSION);
            Ok(())
        }

        Commands::Completions(args) => {
            let mut cmd = Cli::command();
            let shell: clap_complete::Shell = args.shell.into();
            clap_complete::generate(shell, &mut cmd, "fnscore-cli", &mut std::io::stdout());
            Ok(())
        }

        command => {
            let ctx = FnScoreCliContext::new(config.as_deref(), output)?;
            ctx.init_logging(level_override)?;
            match command {
                Commands::Simulate(args) => handle_simulate_command(args, &ctx),
                Commands::Score(args) => handle_score_command(args, &ctx),
                Commands::Presets(args) => handle_presets_command(args, &ctx),
                Commands::Duration(args) => handle_duration_command(args, &ctx),
                Commands::Date(args) => handle_date_command(args, &ctx),
                Commands::Version | Commands::Completions(_) => Ok(()),
            }
        }
    }
}
