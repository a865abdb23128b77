//! Core domain logic for the time clock stamper.
//!
//! This crate contains the fundamental types and logic for:
//! - Events: timestamped clock transitions and pause annotations
//! - Calculation: parity-based pairing of events into worked minutes
//! - Engine: stamping, day overrides, daily summaries and monthly overtime
//!
//! Storage and wall-clock access are ports ([`EventStore`], [`Clock`]) so the
//! engine stays deterministic under test.

pub mod calc;
pub mod clock;
mod config;
mod engine;
pub mod event;
pub mod period;
pub mod store;
mod summary;

pub use calc::{clock_state, format_minutes, worked_minutes};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, DEFAULT_EXPECTED_MINUTES_PER_DAY, EngineConfig};
pub use engine::{EngineError, TimeEngine};
pub use event::ClockEvent;
pub use period::{Period, ValidationError};
pub use store::{EventStore, InMemoryStore, StoreError};
pub use summary::{ClockState, PeriodSummary};
