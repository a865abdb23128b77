//! Storage layer for the time clock stamper.
//!
//! Provides two [`EventStore`] implementations:
//! - [`Database`]: a `rusqlite` database holding every month in one table
//! - [`JsonFileStore`]: one pretty-printed JSON file per month
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A month is replaced inside a single transaction, but concurrent writers
//! from separate processes still need external serialisation of the
//! read-modify-write the engine performs.
//!
//! # Schema
//!
//! ## Timestamp Format
//!
//! Timestamps are stored as TEXT in local ISO 8601 form without offset
//! (e.g., `2024-01-15T10:30:00`). Lexicographic ordering matches chronological
//! ordering, and the zone is a property of the whole installation.

mod json;

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rusqlite::{Connection, params};
use stamper_core::{ClockEvent, EventStore, Period, StoreError};
use thiserror::Error;

pub use json::JsonFileStore;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Storage errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Failed to parse a stored timestamp.
    #[error("invalid timestamp for event {event_id}: {timestamp}")]
    TimestampParse {
        event_id: i64,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
    /// Failed to read or write a month file.
    #[error("i/o error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A month file did not hold a valid event list.
    #[error("invalid event file {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            -- timestamp: local time, e.g. '2024-01-15T10:30:00'
            -- pause_minutes: NULL for clock transitions
            CREATE TABLE IF NOT EXISTS clock_events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                year INTEGER NOT NULL,
                month INTEGER NOT NULL,
                timestamp TEXT NOT NULL,
                pause_minutes INTEGER
            );

            CREATE INDEX IF NOT EXISTS idx_clock_events_period ON clock_events(year, month);
            ",
        )?;
        Ok(())
    }

    /// Lists the events of a month ordered by timestamp then insertion.
    pub fn list_events(&self, period: Period) -> Result<Vec<ClockEvent>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, timestamp, pause_minutes
            FROM clock_events
            WHERE year = ? AND month = ?
            ORDER BY timestamp ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map(params![period.year(), period.month()], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<u32>>(2)?,
            ))
        })?;
        let mut events = Vec::new();
        for row in rows {
            let (id, timestamp, pause_minutes) = row?;
            let timestamp = parse_timestamp(&timestamp, id)?;
            events.push(ClockEvent {
                timestamp,
                pause_minutes,
            });
        }
        tracing::debug!(%period, events = events.len(), "read month from sqlite");
        Ok(events)
    }

    /// Replaces every event of a month.
    ///
    /// Events outside the month are not stored.
    pub fn replace_events(&mut self, period: Period, events: &[ClockEvent]) -> Result<usize, DbError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM clock_events WHERE year = ? AND month = ?",
            params![period.year(), period.month()],
        )?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "
                INSERT INTO clock_events (year, month, timestamp, pause_minutes)
                VALUES (?, ?, ?, ?)
                ",
            )?;
            for event in events.iter().filter(|event| period.contains(&event.timestamp)) {
                inserted += stmt.execute(params![
                    period.year(),
                    period.month(),
                    format_timestamp(event.timestamp),
                    event.pause_minutes,
                ])?;
            }
        }
        tx.commit()?;
        tracing::debug!(%period, inserted, "replaced month in sqlite");
        Ok(inserted)
    }
}

impl EventStore for Database {
    fn read(&self, period: Period) -> Result<Vec<ClockEvent>, StoreError> {
        self.list_events(period)
            .map_err(|err| StoreError::read(period, err))
    }

    fn write(&mut self, period: Period, events: &[ClockEvent]) -> Result<(), StoreError> {
        self.replace_events(period, events)
            .map(|_| ())
            .map_err(|err| StoreError::write(period, err))
    }
}

fn parse_timestamp(timestamp: &str, event_id: i64) -> Result<NaiveDateTime, DbError> {
    NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).map_err(|source| {
        DbError::TimestampParse {
            event_id,
            timestamp: timestamp.to_string(),
            source,
        }
    })
}

fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}
