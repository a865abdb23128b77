//! Shared utilities for CLI commands.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use stamper_core::PeriodSummary;

/// Parses a time of day as `HH:MM` or `HH:MM:SS`.
pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| format!("invalid time: {s}. Use HH:MM (e.g., 09:30)"))
}

/// Parses a calendar date as `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date: {s}. Use YYYY-MM-DD (e.g., 2022-01-05)"))
}

/// Writes a day summary, either human-readable or as pretty JSON.
pub fn write_summary<W: Write>(writer: &mut W, summary: &PeriodSummary, json: bool) -> Result<()> {
    if json {
        let output =
            serde_json::to_string_pretty(summary).context("failed to serialize summary")?;
        writeln!(writer, "{output}")?;
        return Ok(());
    }

    writeln!(writer, "Day: {}", summary.day)?;
    writeln!(writer, "State: {}", summary.current_state)?;
    writeln!(writer, "Worked: {}", summary.worked_today)?;
    writeln!(writer, "Overtime this month: {}", summary.overtime_month)?;

    if summary.events.is_empty() {
        writeln!(writer, "Stamps: none")?;
        return Ok(());
    }

    writeln!(writer, "Stamps:")?;
    for event in &summary.events {
        let time = event.timestamp.format("%H:%M");
        match event.pause_minutes {
            Some(minutes) => writeln!(writer, "  {time} pause {minutes}m")?,
            None => writeln!(writer, "  {time}")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_time_with_and_without_seconds() {
        assert_eq!(
            parse_time("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time("17:05:42").unwrap(),
            NaiveTime::from_hms_opt(17, 5, 42).unwrap()
        );
    }

    #[test]
    fn rejects_invalid_time() {
        let err = parse_time("25:00").unwrap_err();
        assert!(err.contains("invalid time: 25:00"));
    }

    #[test]
    fn parses_date() {
        assert_eq!(
            parse_date("2022-01-05").unwrap(),
            NaiveDate::from_ymd_opt(2022, 1, 5).unwrap()
        );
        assert!(parse_date("2022-02-30").is_err());
    }
}
