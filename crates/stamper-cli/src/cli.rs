//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::day::DayArgs;
use crate::commands::overtime::OvertimeArgs;
use crate::commands::set_day::SetDayArgs;
use crate::commands::stamp::StampArgs;

/// Clock-in/clock-out time stamper.
///
/// Records stamps for a single worker, shows the hours worked per day and
/// the overtime accumulated over a month.
#[derive(Debug, Parser)]
#[command(name = "stamper", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Clock in or out now, or at a time of day today.
    Stamp(StampArgs),

    /// Show today's state, hours worked and monthly overtime.
    Status {
        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the overtime accumulated over a month.
    Overtime(OvertimeArgs),

    /// Show the summary of a day.
    Day(DayArgs),

    /// Replace every stamp of a day.
    SetDay(SetDayArgs),
}

impl Commands {
    /// Whether the command rewrites stored events.
    pub const fn is_mutating(&self) -> bool {
        matches!(self, Self::Stamp(_) | Self::SetDay(_))
    }
}
