//! Month-per-file JSON storage.
//!
//! Each month lives in `<dir>/<YYYY>-<MM>-<file_name>` as a pretty-printed
//! array of `{"date": "...", "pause": n}` records, sorted chronologically.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use stamper_core::{ClockEvent, EventStore, Period, StoreError};

use tempfile::NamedTempFile;

use crate::DbError;

/// Stores each month in its own JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
    file_name: String,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
        }
    }

    /// Path of the file holding a month.
    pub fn month_path(&self, period: Period) -> PathBuf {
        self.dir.join(format!(
            "{}-{:02}-{}",
            period.year(),
            period.month(),
            self.file_name
        ))
    }

    /// Loads a month. A missing file is an empty month; anything else unreadable is an error.
    pub fn load(&self, period: Period) -> Result<Vec<ClockEvent>, DbError> {
        let path = self.month_path(period);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no month file yet");
                return Ok(Vec::new());
            }
            Err(source) => return Err(DbError::Io { path, source }),
        };
        let events: Vec<ClockEvent> =
            serde_json::from_str(&content).map_err(|source| DbError::Json {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), events = events.len(), "read month file");
        Ok(events)
    }

    /// Rewrites a month file with the events that fall in the month.
    ///
    /// The new content is written to a temporary file in the same directory
    /// and renamed over the month file, so readers see the old or the new
    /// month but never a partial one.
    pub fn save(&self, period: Period, events: &[ClockEvent]) -> Result<(), DbError> {
        let mut events: Vec<&ClockEvent> = events
            .iter()
            .filter(|event| period.contains(&event.timestamp))
            .collect();
        events.sort_by_key(|event| event.timestamp);

        create_dir(&self.dir)?;
        let path = self.month_path(period);
        let json = serde_json::to_string_pretty(&events).map_err(|source| DbError::Json {
            path: path.clone(),
            source,
        })?;
        let io_err = |source: std::io::Error| DbError::Io {
            path: path.clone(),
            source,
        };
        let mut file = NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        file.write_all(json.as_bytes()).map_err(io_err)?;
        file.persist(&path).map_err(|err| io_err(err.error))?;
        tracing::debug!(path = %path.display(), events = events.len(), "wrote month file");
        Ok(())
    }
}

fn create_dir(dir: &Path) -> Result<(), DbError> {
    fs::create_dir_all(dir).map_err(|source| DbError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

impl EventStore for JsonFileStore {
    fn read(&self, period: Period) -> Result<Vec<ClockEvent>, StoreError> {
        self.load(period)
            .map_err(|err| StoreError::read(period, err))
    }

    fn write(&mut self, period: Period, events: &[ClockEvent]) -> Result<(), StoreError> {
        self.save(period, events)
            .map_err(|err| StoreError::write(period, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn january() -> Period {
        Period::new(2022, 1).unwrap()
    }

    #[test]
    fn month_path_uses_zero_padded_prefix() {
        let store = JsonFileStore::new("/data", "clock-times.json");
        assert_eq!(
            store.month_path(january()),
            PathBuf::from("/data/2022-01-clock-times.json")
        );
    }

    #[test]
    fn missing_file_reads_as_empty_month() {
        let temp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(temp.path(), "clock-times.json");
        assert!(store.read(january()).unwrap().is_empty());
    }

    #[test]
    fn save_sorts_and_filters_to_month() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(temp.path().join("months"), "clock-times.json");
        let stray = ClockEvent::clock(
            NaiveDate::from_ymd_opt(2022, 2, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        );

        store
            .write(
                january(),
                &[
                    ClockEvent::clock(at(5, 17, 0)),
                    ClockEvent::pause(at(5, 17, 0), 30),
                    stray,
                    ClockEvent::clock(at(5, 9, 0)),
                ],
            )
            .unwrap();

        let content = fs::read_to_string(store.month_path(january())).unwrap();
        let expected = r#"[
  {
    "date": "2022-01-05T09:00:00"
  },
  {
    "date": "2022-01-05T17:00:00"
  },
  {
    "date": "2022-01-05T17:00:00",
    "pause": 30
  }
]"#;
        assert_eq!(content, expected);
        assert_eq!(store.read(january()).unwrap().len(), 3);
        assert!(!store.month_path(Period::new(2022, 2).unwrap()).exists());
    }

    #[test]
    fn save_replaces_month_without_leftover_files() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(temp.path(), "clock-times.json");

        store
            .write(january(), &[ClockEvent::clock(at(5, 9, 0))])
            .unwrap();
        store
            .write(
                january(),
                &[ClockEvent::clock(at(5, 9, 0)), ClockEvent::clock(at(5, 17, 0))],
            )
            .unwrap();

        assert_eq!(store.read(january()).unwrap().len(), 2);
        let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn failed_save_leaves_no_partial_file() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(temp.path(), "clock-times.json");
        // A directory in the way makes the final rename fail.
        fs::create_dir(store.month_path(january())).unwrap();

        let err = store
            .write(january(), &[ClockEvent::clock(at(5, 9, 0))])
            .unwrap_err();

        assert!(matches!(err, StoreError::Write { .. }));
        let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert!(store.month_path(january()).is_dir());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(temp.path(), "clock-times.json");
        fs::write(store.month_path(january()), "{ not json").unwrap();

        let err = store.read(january()).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[test]
    fn reads_files_without_pause_field() {
        let temp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(temp.path(), "clock-times.json");
        fs::write(
            store.month_path(january()),
            r#"[{"date":"2022-01-05T09:00:00"},{"date":"2022-01-05T12:00:00","pause":null}]"#,
        )
        .unwrap();

        let events = store.read(january()).unwrap();
        assert_eq!(
            events,
            vec![
                ClockEvent::clock(at(5, 9, 0)),
                ClockEvent::clock(at(5, 12, 0)),
            ]
        );
    }
}
