//! Day summaries returned by every engine operation.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::event::ClockEvent;

/// Whether the worker is currently on the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClockState {
    ClockedIn,
    ClockedOut,
}

impl ClockState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ClockedIn => "clocked in",
            Self::ClockedOut => "clocked out",
        }
    }
}

impl fmt::Display for ClockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Computed view of a day and its month. Recomputed on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// The day this summary was computed for.
    pub day: NaiveDate,
    pub current_state: ClockState,
    /// `"<worked>. Left: <expected - worked>"`.
    pub worked_today: String,
    /// Signed overtime accumulated over the day's month.
    pub overtime_month: String,
    /// Stored events of the day, chronologically ordered.
    pub events: Vec<ClockEvent>,
}
