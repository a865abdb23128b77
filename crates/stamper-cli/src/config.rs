//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use stamper_core::{ConfigError, DEFAULT_EXPECTED_MINUTES_PER_DAY, EngineConfig};

/// Which event store backs the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// A single `SQLite` database.
    #[default]
    Sqlite,
    /// One JSON file per month.
    Json,
}

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,
    /// Storage backend.
    pub storage: StorageBackend,
    /// Directory holding month files when `storage = "json"`.
    pub json_dir: PathBuf,
    /// Suffix of each month file, after the `YYYY-MM-` prefix.
    pub json_file_name: String,
    /// IANA zone every stamp is local to.
    pub timezone: String,
    /// Expected working minutes per day.
    pub expected_minutes_per_day: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("storage", &self.storage)
            .field("json_dir", &self.json_dir)
            .field("json_file_name", &self.json_file_name)
            .field("timezone", &self.timezone)
            .field("expected_minutes_per_day", &self.expected_minutes_per_day)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("stamper.db"),
            storage: StorageBackend::default(),
            json_dir: data_dir.join("months"),
            json_file_name: "clock-times.json".to_string(),
            timezone: iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string()),
            expected_minutes_per_day: DEFAULT_EXPECTED_MINUTES_PER_DAY,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (STAMPER_*)
        figment = figment.merge(Env::prefixed("STAMPER_"));

        figment.extract()
    }

    /// Engine settings with the timezone resolved.
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        EngineConfig::new(&self.timezone, self.expected_minutes_per_day)
    }

    /// Directory the active backend writes into; the lock file lives here.
    pub fn data_dir(&self) -> PathBuf {
        match self.storage {
            StorageBackend::Sqlite => self
                .database_path
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
            StorageBackend::Json => self.json_dir.clone(),
        }
    }
}

/// Returns the platform-specific config directory for stamper.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("stamper"))
}

/// Returns the platform-specific data directory for stamper.
///
/// On Linux: `~/.local/share/stamper`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("stamper"))
}
