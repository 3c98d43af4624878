//! Score command handler

use crate::args::ScoreArgs;
use crate::context::FnScoreCliContext;
use crate::output::{OutputFormat, render_scores};
use crate::utils::{load_functions, parse_data_type, parse_field_value, parse_score_mode};
use fnscore::models::DataType;
use fnscore::scoring::ScoreCalculator;

/// Per-function scores and the combined score at one field value.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    pub value: f64,
    pub data_type: DataType,
    pub kinds: Vec<&'static str>,
    pub scores: Vec<f64>,
    pub combined: Option<f64>,
}

pub fn compute_scores(args: &ScoreArgs, ctx: &FnScoreCliContext) -> fnscore::Result<ScoreReport> {
    let functions = load_functions(&args.source)?;
    let data_type = match &args.data_type {
        Some(raw) => parse_data_type(raw)?,
        None => DataType::Numeric,
    };
    let value = parse_field_value(&args.value, data_type)?;

    let mut config = ctx.config.simulation.clone();
    if let Some(mode) = &args.score_mode {
        config.score_mode = parse_score_mode(mode)?;
    }
    let calculator = ScoreCalculator::new(config);
    let (scores, combined) = calculator.score_at(&functions, value);

    Ok(ScoreReport {
        value,
        data_type,
        kinds: functions.iter().map(|f| f.kind_name()).collect(),
        scores,
        combined,
    })
}

pub fn handle_score_command(args: ScoreArgs, ctx: &FnScoreCliContext) -> fnscore::Result<()> {
    let report = compute_scores(&args, ctx)?;
    print!(
        "{}",
        render_scores(
            report.value,
            report.data_type,
            &report.kinds,
            &report.scores,
            report.combined,
            ctx.output,
        )
    );
    if ctx.output == OutputFormat::Json {
        println!();
    }
    Ok(())
}
