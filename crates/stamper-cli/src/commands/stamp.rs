//! Stamp command: clock in or out.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveTime;
use clap::Args;
use stamper_core::{Clock, EventStore, TimeEngine};

use super::util::{parse_time, write_summary};

#[derive(Debug, Args)]
pub struct StampArgs {
    /// Stamp today at this time (HH:MM) instead of now.
    #[arg(long, value_parser = parse_time)]
    pub at: Option<NaiveTime>,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run<W, S, C>(writer: &mut W, engine: &mut TimeEngine<S, C>, args: &StampArgs) -> Result<()>
where
    W: Write,
    S: EventStore,
    C: Clock,
{
    let summary = match args.at {
        Some(time) => engine.stamp(time)?,
        None => engine.stamp_in_or_out()?,
    };
    tracing::info!(state = %summary.current_state, day = %summary.day, "stamped");
    write_summary(writer, &summary, args.json)
}
