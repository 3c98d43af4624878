//! Command handlers for the fnscore CLI

pub mod convert;
pub mod presets;
pub mod score;
pub mod simulate;

pub use convert::{handle_date_command, handle_duration_command};
pub use presets::handle_presets_command;
pub use score::handle_score_command;
pub use simulate::handle_simulate_command;
