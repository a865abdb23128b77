//! Day command for inspecting a single day.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use stamper_core::{Clock, EventStore, TimeEngine};

use super::util::{parse_date, write_summary};

#[derive(Debug, Args)]
pub struct DayArgs {
    /// Day to show (YYYY-MM-DD); defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run<W, S, C>(writer: &mut W, engine: &TimeEngine<S, C>, args: &DayArgs) -> Result<()>
where
    W: Write,
    S: EventStore,
    C: Clock,
{
    let summary = match args.date {
        Some(date) => engine.get_day(date)?,
        None => engine.status()?,
    };
    write_summary(writer, &summary, args.json)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDateTime;
    use insta::assert_snapshot;
    use stamper_core::{ClockEvent, EngineConfig, FixedClock, InMemoryStore, Period};

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn day_shows_historical_summary() {
        let mut store = InMemoryStore::new();
        store
            .write(
                Period::new(2022, 1).unwrap(),
                &[
                    ClockEvent::clock(at(5, 9, 0)),
                    ClockEvent::clock(at(5, 12, 0)),
                    ClockEvent::clock(at(5, 13, 0)),
                    ClockEvent::clock(at(5, 17, 0)),
                ],
            )
            .unwrap();
        let now = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let engine = TimeEngine::with_clock(store, FixedClock::new(now), EngineConfig::default());
        let mut output = Vec::new();
        let args = DayArgs {
            date: NaiveDate::from_ymd_opt(2022, 1, 5),
            json: false,
        };

        run(&mut output, &engine, &args).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Day: 2022-01-05
        State: clocked out
        Worked: 07h00m. Left: 01h00m
        Overtime this month: -01h00m
        Stamps:
          09:00
          12:00
          13:00
          17:00
        ");
    }

    #[test]
    fn day_defaults_to_today() {
        let engine = TimeEngine::with_clock(
            InMemoryStore::new(),
            FixedClock::new(at(7, 10, 0)),
            EngineConfig::default(),
        );
        let mut output = Vec::new();
        let args = DayArgs {
            date: None,
            json: true,
        };

        run(&mut output, &engine, &args).unwrap();

        let summary: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(summary["day"], "2022-01-07");
        assert_eq!(summary["current_state"], "CLOCKED_OUT");
    }
}
