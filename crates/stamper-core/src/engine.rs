//! The time engine: stamping, day overrides and summaries.
//!
//! # Algorithm Summary
//!
//! 1. Read the month containing the target day from the [`EventStore`]
//! 2. Apply the stamp or override and write the month back, if mutating
//! 3. Summarise the target day: state from parity, worked time from pairing,
//!    with a synthetic clock-out at "now" while the live day is clocked in
//! 4. Roll the month up day by day against the expected duration: the live
//!    month through today, any explicitly requested month through day 31
//!
//! The engine itself holds no locks; a read-modify-write is expected to run
//! without interleaving from another writer.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::calc::{clock_state, format_minutes, format_worked, worked_minutes};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::event::ClockEvent;
use crate::period::Period;
use crate::store::{EventStore, StoreError};
use crate::summary::{ClockState, PeriodSummary};

/// Days rolled up for an explicitly requested month.
const FULL_MONTH_DAYS: u32 = 31;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Clock-in/clock-out engine over a month-partitioned store.
#[derive(Debug)]
pub struct TimeEngine<S, C = SystemClock> {
    store: S,
    clock: C,
    config: EngineConfig,
}

impl<S: EventStore> TimeEngine<S, SystemClock> {
    /// Creates an engine reading the system time in the configured zone.
    pub const fn new(store: S, config: EngineConfig) -> Self {
        let clock = SystemClock::new(config.timezone);
        Self {
            store,
            clock,
            config,
        }
    }
}

impl<S: EventStore, C: Clock> TimeEngine<S, C> {
    pub const fn with_clock(store: S, clock: C, config: EngineConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// The current local date according to the engine's clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.now().date()
    }

    /// Stamps the current moment, toggling between clocked in and out.
    pub fn stamp_in_or_out(&mut self) -> Result<PeriodSummary, EngineError> {
        let now = self.clock.now();
        self.append(ClockEvent::clock(now), now)
    }

    /// Stamps today at the given time of day.
    pub fn stamp(&mut self, time: NaiveTime) -> Result<PeriodSummary, EngineError> {
        let now = self.clock.now();
        self.append(ClockEvent::clock(now.date().and_time(time)), now)
    }

    /// Summary of today.
    pub fn status(&self) -> Result<PeriodSummary, EngineError> {
        let now = self.clock.now();
        let today = now.date();
        let events = self.store.read(Period::of(today))?;
        Ok(self.summarize(&events, today, now, Rollup::Live))
    }

    /// Formatted overtime for the given month, or the live month when `None`.
    ///
    /// An explicit month is always rolled up over 31 days without a synthetic
    /// close, even when it is the current month.
    pub fn overtime_for_month(&self, period: Option<Period>) -> Result<String, EngineError> {
        let now = self.clock.now();
        let rollup = period.map_or(Rollup::Live, Rollup::Month);
        let events = self.store.read(rollup.period(now.date()))?;
        Ok(format_minutes(self.overtime_minutes(&events, rollup, now)))
    }

    /// Replaces today's events.
    pub fn set_today(&mut self, events: Vec<ClockEvent>) -> Result<PeriodSummary, EngineError> {
        let today = self.clock.now().date();
        self.set_day(events, today)
    }

    /// Replaces every stored event of `day` with the supplied events that fall on it.
    ///
    /// Supplied events for any other day are discarded.
    pub fn set_day(
        &mut self,
        events: Vec<ClockEvent>,
        day: NaiveDate,
    ) -> Result<PeriodSummary, EngineError> {
        let now = self.clock.now();
        let period = Period::of(day);

        let (replacements, foreign): (Vec<ClockEvent>, Vec<ClockEvent>) =
            events.into_iter().partition(|event| event.date() == day);
        if !foreign.is_empty() {
            tracing::warn!(
                %day,
                dropped = foreign.len(),
                "ignoring events outside the day being replaced"
            );
        }

        let mut stored = self.store.read(period)?;
        stored.retain(|event| event.date() != day);
        stored.extend(replacements);
        stored.sort_by_key(|event| event.timestamp);

        self.store.write(period, &stored)?;
        tracing::debug!(%day, events = stored.len(), %period, "replaced day");
        Ok(self.summarize(&stored, day, now, Rollup::Month(period)))
    }

    /// Summary of an arbitrary day, without mutation.
    pub fn get_day(&self, day: NaiveDate) -> Result<PeriodSummary, EngineError> {
        let now = self.clock.now();
        let period = Period::of(day);
        let events = self.store.read(period)?;
        Ok(self.summarize(&events, day, now, Rollup::Month(period)))
    }

    fn append(
        &mut self,
        event: ClockEvent,
        now: NaiveDateTime,
    ) -> Result<PeriodSummary, EngineError> {
        let period = Period::of(now.date());
        let mut events = self.store.read(period)?;
        events.push(event);
        self.store.write(period, &events)?;
        tracing::debug!(%period, events = events.len(), "stamped");
        Ok(self.summarize(&events, now.date(), now, Rollup::Live))
    }

    fn summarize(
        &self,
        month_events: &[ClockEvent],
        day: NaiveDate,
        now: NaiveDateTime,
        rollup: Rollup,
    ) -> PeriodSummary {
        let mut day_events: Vec<ClockEvent> = month_events
            .iter()
            .filter(|event| event.date() == day)
            .cloned()
            .collect();
        day_events.sort_by_key(|event| event.timestamp);

        let expected = self.config.expected_minutes();
        let worked = if day_events.is_empty() {
            0
        } else {
            worked_minutes(&with_synthetic_close(&day_events, day, now), expected)
        };

        PeriodSummary {
            day,
            current_state: clock_state(&day_events),
            worked_today: format_worked(worked, expected),
            overtime_month: format_minutes(self.overtime_minutes(month_events, rollup, now)),
            events: day_events,
        }
    }

    /// Accumulated minus expected minutes over the month.
    ///
    /// The live month runs through today, closing a live clock-in at `now`.
    /// An explicit month runs through day 31; days that do not exist hold no
    /// events and contribute exactly the expected duration.
    fn overtime_minutes(
        &self,
        month_events: &[ClockEvent],
        rollup: Rollup,
        now: NaiveDateTime,
    ) -> i64 {
        let today = now.date();
        let period = rollup.period(today);
        let is_live = matches!(rollup, Rollup::Live);
        let days = if is_live { today.day() } else { FULL_MONTH_DAYS };
        let expected = self.config.expected_minutes();

        let mut worked = 0;
        for day_of_month in 1..=days {
            let bucket: Vec<ClockEvent> = month_events
                .iter()
                .filter(|event| {
                    period.contains(&event.timestamp) && event.timestamp.day() == day_of_month
                })
                .cloned()
                .collect();
            worked += if is_live && day_of_month == today.day() {
                worked_minutes(&with_synthetic_close(&bucket, today, now), expected)
            } else {
                worked_minutes(&bucket, expected)
            };
        }
        worked - i64::from(days) * expected
    }
}

/// Which month an overtime rollup covers.
#[derive(Debug, Clone, Copy)]
enum Rollup {
    /// The clock's current month, through today.
    Live,
    /// An explicitly addressed month, through day 31.
    Month(Period),
}

impl Rollup {
    fn period(self, today: NaiveDate) -> Period {
        match self {
            Self::Live => Period::of(today),
            Self::Month(period) => period,
        }
    }
}

/// Appends a transient clock-out at `now` when `day` is today and still clocked in.
fn with_synthetic_close(events: &[ClockEvent], day: NaiveDate, now: NaiveDateTime) -> Vec<ClockEvent> {
    let mut events = events.to_vec();
    if day == now.date() && clock_state(&events) == ClockState::ClockedIn {
        events.push(ClockEvent::clock(now));
    }
    events
}
