pub mod args;
pub mod commands;
pub mod context;
pub mod handlers;
pub mod output;
pub mod utils;

pub use context::FnScoreCliContext;
pub use output::{
    CliColors, OutputFormat, format_error, format_info, format_score, format_warning, format_x,
    output_error_json, render_preset_list, render_scores, render_simulation,
};
pub use utils::{
    build_variable, load_functions, parse_data_type, parse_field_value, parse_score_mode,
};
