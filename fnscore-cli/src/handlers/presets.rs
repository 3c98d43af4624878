//! Presets command handler

use crate::args::PresetsArgs;
use crate::context::FnScoreCliContext;
use crate::output::{render_preset, render_preset_list};
use fnscore::presets::Preset;

pub fn handle_presets_command(args: PresetsArgs, ctx: &FnScoreCliContext) -> fnscore::Result<()> {
    match args.name {
        Some(name) => {
            let preset: Preset = name.parse()?;
            println!("{}", render_preset(preset));
        }
        None => print!("{}", render_preset_list(ctx.output)),
    }
    Ok(())
}
