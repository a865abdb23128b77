//! Engine configuration.

use chrono_tz::Tz;
use thiserror::Error;

/// Eight hours.
pub const DEFAULT_EXPECTED_MINUTES_PER_DAY: u32 = 480;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown timezone {name}: {reason}")]
    UnknownTimezone { name: String, reason: String },
}

/// Settings fixed for the lifetime of a [`crate::TimeEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Zone every timestamp is local to.
    pub timezone: Tz,
    /// Baseline the daily "left" and monthly overtime figures are measured against.
    pub expected_minutes_per_day: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            expected_minutes_per_day: DEFAULT_EXPECTED_MINUTES_PER_DAY,
        }
    }
}

impl EngineConfig {
    /// Builds a configuration from an IANA zone id such as `Europe/Berlin`.
    pub fn new(timezone: &str, expected_minutes_per_day: u32) -> Result<Self, ConfigError> {
        let timezone = timezone
            .parse::<Tz>()
            .map_err(|err| ConfigError::UnknownTimezone {
                name: timezone.to_string(),
                reason: err.to_string(),
            })?;
        Ok(Self {
            timezone,
            expected_minutes_per_day,
        })
    }

    pub(crate) fn expected_minutes(&self) -> i64 {
        i64::from(self.expected_minutes_per_day)
    }
}
