//! Minute arithmetic over a day's events.
//!
//! # Pairing
//!
//! Clock transitions of a day are sorted chronologically and paired from the
//! most recent backwards: the last two form one interval, the two before
//! them the next, and so on. Each interval is measured in minutes of the day
//! (`hour * 60 + minute`), so seconds never contribute. Pause annotations are
//! summed separately and subtracted from the total.
//!
//! A bucket that cannot be paired (odd count) or that holds no transitions
//! at all counts as exactly the expected duration.

use crate::event::ClockEvent;
use crate::summary::ClockState;

/// Resolves the clock state from the parity of non-pause events.
pub fn clock_state(events: &[ClockEvent]) -> ClockState {
    let transitions = events.iter().filter(|event| !event.is_pause()).count();
    if transitions % 2 == 1 {
        ClockState::ClockedIn
    } else {
        ClockState::ClockedOut
    }
}

/// Worked minutes for one day's bucket of events, net of pauses.
pub fn worked_minutes(events: &[ClockEvent], expected_minutes: i64) -> i64 {
    let pauses: i64 = events
        .iter()
        .filter_map(|event| event.pause_minutes)
        .map(i64::from)
        .sum();

    let mut transitions: Vec<&ClockEvent> =
        events.iter().filter(|event| !event.is_pause()).collect();
    transitions.sort_by_key(|event| event.timestamp);

    if transitions.len() % 2 == 1 {
        tracing::error!(
            day = ?transitions.first().map(|event| event.date()),
            transitions = transitions.len(),
            expected_minutes,
            "day is not correctly clocked, assuming expected duration"
        );
        return expected_minutes;
    }
    if transitions.is_empty() {
        tracing::info!(expected_minutes, "day was not clocked, assuming expected duration");
        return expected_minutes;
    }

    let intervals: i64 = transitions
        .rchunks_exact(2)
        .map(|pair| pair[1].minute_of_day() - pair[0].minute_of_day())
        .sum();
    intervals - pauses
}

/// Renders signed minutes as `HHhMMm`, e.g. `07h30m` or `-00h30m`.
pub fn format_minutes(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let magnitude = minutes.unsigned_abs();
    format!("{sign}{:02}h{:02}m", magnitude / 60, magnitude % 60)
}

/// Renders the daily line `"<worked>. Left: <expected - worked>"`.
pub fn format_worked(worked_minutes: i64, expected_minutes: i64) -> String {
    format!(
        "{}. Left: {}",
        format_minutes(worked_minutes),
        format_minutes(expected_minutes - worked_minutes)
    )
}
