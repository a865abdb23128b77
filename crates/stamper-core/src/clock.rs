//! Wall-clock access.
//!
//! Every read of "now" in the engine goes through [`Clock`], so tests can
//! pin the current moment with [`FixedClock`].

use std::cell::Cell;

use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Source of the current local time.
pub trait Clock {
    /// Current wall-clock time in the configured zone.
    fn now(&self) -> NaiveDateTime;
}

/// Production clock reading the system time, converted into a fixed zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    timezone: Tz,
}

impl SystemClock {
    pub const fn new(timezone: Tz) -> Self {
        Self { timezone }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.timezone).naive_local()
    }
}

/// A clock that returns a pinned moment until moved with [`FixedClock::set`].
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub const fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
