//! Timestamped clock events.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A single stamp recorded for the worker.
///
/// Events without a pause are clock transitions; whether a transition is a
/// clock-in or a clock-out is derived from its position among the other
/// transitions of the same day, never stored. Events carrying
/// `pause_minutes` are pause annotations and take no part in pairing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClockEvent {
    /// Local wall-clock time in the configured zone.
    #[serde(rename = "date")]
    pub timestamp: NaiveDateTime,
    /// Minutes to subtract from the day, if this is a pause annotation.
    #[serde(rename = "pause", default, skip_serializing_if = "Option::is_none")]
    pub pause_minutes: Option<u32>,
}

impl ClockEvent {
    /// Creates a clock transition at the given moment.
    ///
    /// Sub-second precision is dropped so stored and in-memory values agree.
    pub fn clock(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp: truncate_subsec(timestamp),
            pause_minutes: None,
        }
    }

    /// Creates a pause annotation attached to the given moment.
    pub fn pause(timestamp: NaiveDateTime, minutes: u32) -> Self {
        Self {
            timestamp: truncate_subsec(timestamp),
            pause_minutes: Some(minutes),
        }
    }

    pub const fn is_pause(&self) -> bool {
        self.pause_minutes.is_some()
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Minutes since midnight, ignoring seconds.
    pub fn minute_of_day(&self) -> i64 {
        i64::from(self.timestamp.hour() * 60 + self.timestamp.minute())
    }
}

fn truncate_subsec(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp.with_nanosecond(0).unwrap_or(timestamp)
}
