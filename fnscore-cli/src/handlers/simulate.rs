//! Simulate command handler

use crate::args::SimulateArgs;
use crate::context::FnScoreCliContext;
use crate::output::{OutputFormat, format_warning, render_simulation};
use crate::utils::{build_variable, load_functions, parse_score_mode};
use fnscore::simple::{Simulation, SimulationResult};

/// Run the simulation described by `args`, with configuration defaults for
/// anything not given on the command line.
pub fn run_simulation(args: &SimulateArgs, ctx: &FnScoreCliContext) -> fnscore::Result<SimulationResult> {
    let functions = load_functions(&args.source)?;
    let variable = build_variable(&args.variable)?;

    let mut builder = Simulation::builder()
        .config(ctx.config.simulation.clone())
        .variable(variable)
        .functions(functions);
    if let Some(mode) = &args.score_mode {
        builder = builder.score_mode(parse_score_mode(mode)?);
    }
    if let Some(points) = args.points {
        builder = builder.point_count(points);
    }

    Ok(builder.build()?.run())
}

pub fn handle_simulate_command(args: SimulateArgs, ctx: &FnScoreCliContext) -> fnscore::Result<()> {
    let result = run_simulation(&args, ctx)?;

    if result.points.len() == 1 && ctx.output == OutputFormat::Table {
        eprintln!(
            "{}",
            format_warning("A single point has no position on the axis; use --points 2 or more")
        );
    }
    if result.function_count == 0 && ctx.output == OutputFormat::Table {
        eprintln!("{}", format_warning("The function list is empty"));
    }

    print!("{}", render_simulation(&result, ctx.output));
    if ctx.output == OutputFormat::Json {
        println!();
    }
    Ok(())
}
