//! CLI subcommand implementations.

pub mod day;
pub mod overtime;
pub mod set_day;
pub mod stamp;
pub mod status;
pub mod util;
