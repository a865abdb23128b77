//! Set-day command for replacing the stamps of a day.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveTime};
use clap::Args;
use regex::Regex;
use stamper_core::{Clock, ClockEvent, EventStore, TimeEngine};

use super::util::{parse_date, write_summary};

/// Pre-compiled regex for `HH:MM` entries with an optional `/N` pause suffix.
static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})(?:/(\d+))?$").unwrap());

#[derive(Debug, Args)]
pub struct SetDayArgs {
    /// Day to replace (YYYY-MM-DD); defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// JSON file with a list of `{"date": ..., "pause": ...}` events.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Stamps as `HH:MM`, or `HH:MM/N` for a pause of N minutes.
    pub entries: Vec<String>,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Parses one `HH:MM` or `HH:MM/N` entry into an event on `day`.
pub fn parse_entry(entry: &str, day: NaiveDate) -> Result<ClockEvent> {
    let Some(caps) = ENTRY_RE.captures(entry.trim()) else {
        bail!("Invalid entry: {entry}. Use HH:MM for a stamp or HH:MM/N for a pause of N minutes");
    };

    let hour: u32 = caps[1].parse().context("failed to parse hour")?;
    let minute: u32 = caps[2].parse().context("failed to parse minute")?;
    let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) else {
        bail!("Invalid time of day: {entry}");
    };
    let timestamp = day.and_time(time);

    match caps.get(3) {
        Some(pause) => {
            let minutes: u32 = pause
                .as_str()
                .parse()
                .with_context(|| format!("pause too long: {entry}"))?;
            Ok(ClockEvent::pause(timestamp, minutes))
        }
        None => Ok(ClockEvent::clock(timestamp)),
    }
}

fn read_events_file(path: &Path) -> Result<Vec<ClockEvent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn run<W, S, C>(writer: &mut W, engine: &mut TimeEngine<S, C>, args: &SetDayArgs) -> Result<()>
where
    W: Write,
    S: EventStore,
    C: Clock,
{
    let day = args.date.unwrap_or_else(|| engine.today());

    let mut events = match &args.file {
        Some(path) => read_events_file(path)?,
        None => Vec::new(),
    };
    for entry in &args.entries {
        events.push(parse_entry(entry, day)?);
    }

    let summary = match args.date {
        Some(date) => engine.set_day(events, date)?,
        None => engine.set_today(events)?,
    };
    tracing::info!(day = %summary.day, stamps = summary.events.len(), "replaced day");
    write_summary(writer, &summary, args.json)
}
