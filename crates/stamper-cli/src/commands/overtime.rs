//! Overtime command for the monthly rollup.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use stamper_core::{Clock, EventStore, Period, TimeEngine};

#[derive(Debug, Args)]
pub struct OvertimeArgs {
    /// Year of the month to roll up (defaults to the current month).
    #[arg(long, requires = "month")]
    pub year: Option<i32>,

    /// Month to roll up, 1-12.
    #[arg(long, requires = "year")]
    pub month: Option<u32>,
}

pub fn run<W, S, C>(writer: &mut W, engine: &TimeEngine<S, C>, args: &OvertimeArgs) -> Result<()>
where
    W: Write,
    S: EventStore,
    C: Clock,
{
    let period = match (args.year, args.month) {
        (Some(year), Some(month)) => Some(Period::new(year, month).context("invalid month")?),
        _ => None,
    };
    let overtime = engine.overtime_for_month(period)?;
    match period {
        Some(period) => writeln!(writer, "Overtime {period}: {overtime}")?,
        None => writeln!(writer, "Overtime this month: {overtime}")?,
    }
    Ok(())
}
