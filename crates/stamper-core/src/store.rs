//! Persistence port for clock events.

use std::collections::BTreeMap;
use std::error::Error as StdError;

use thiserror::Error;

use crate::event::ClockEvent;
use crate::period::Period;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Failure to load or persist a period.
///
/// A failed read is never the same as an empty period.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read events for {period}")]
    Read {
        period: Period,
        #[source]
        source: BoxError,
    },
    #[error("failed to write events for {period}")]
    Write {
        period: Period,
        #[source]
        source: BoxError,
    },
}

impl StoreError {
    pub fn read(period: Period, source: impl Into<BoxError>) -> Self {
        Self::Read {
            period,
            source: source.into(),
        }
    }

    pub fn write(period: Period, source: impl Into<BoxError>) -> Self {
        Self::Write {
            period,
            source: source.into(),
        }
    }
}

/// Month-partitioned event storage.
///
/// Implementations own the persistence format; the engine only ever reads
/// and replaces whole months.
pub trait EventStore {
    /// Returns every event stored for the period.
    fn read(&self, period: Period) -> Result<Vec<ClockEvent>, StoreError>;

    /// Replaces everything stored for the period with `events`.
    fn write(&mut self, period: Period, events: &[ClockEvent]) -> Result<(), StoreError>;
}

impl<S: EventStore + ?Sized> EventStore for Box<S> {
    fn read(&self, period: Period) -> Result<Vec<ClockEvent>, StoreError> {
        (**self).read(period)
    }

    fn write(&mut self, period: Period, events: &[ClockEvent]) -> Result<(), StoreError> {
        (**self).write(period, events)
    }
}

/// Volatile store, useful for tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    periods: BTreeMap<Period, Vec<ClockEvent>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventStore for InMemoryStore {
    fn read(&self, period: Period) -> Result<Vec<ClockEvent>, StoreError> {
        Ok(self.periods.get(&period).cloned().unwrap_or_default())
    }

    fn write(&mut self, period: Period, events: &[ClockEvent]) -> Result<(), StoreError> {
        let events: Vec<ClockEvent> = events
            .iter()
            .filter(|event| period.contains(&event.timestamp))
            .cloned()
            .collect();
        self.periods.insert(period, events);
        Ok(())
    }
}
