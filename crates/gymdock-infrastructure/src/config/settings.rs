//! Kiosk configuration.
//!
//! Loaded from a TOML file; every section is optional and falls back to its
//! defaults, so a kiosk with no config file talks to a backend on
//! `http://127.0.0.1:8000` using the `America/Toronto` calendar.
//! `GYMDOCK_API_URL` (from the environment or a `.env` file) overrides the
//! configured backend URL.

use std::path::{Path, PathBuf};

use gymdock_domain::attendance::WeeklyGoal;
use gymdock_domain::family::StatusFailurePolicy;
use gymdock_domain::ZoneCalendar;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http::RetryConfig;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const API_URL_ENV: &str = "GYMDOCK_API_URL";

const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "gymdock";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KioskConfig {
    pub api: ApiConfig,
    pub calendar: CalendarConfig,
    pub admin: AdminConfig,
    pub family: FamilyConfig,
    pub logging: LoggingConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub retry: RetrySettings,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
            retry: RetrySettings::default(),
        }
    }
}

/// Backoff for idempotent reads. Writes are never retried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 500,
            max_backoff_ms: 5000,
            backoff_multiplier: 2.0,
        }
    }
}

impl From<&RetrySettings> for RetryConfig {
    fn from(settings: &RetrySettings) -> Self {
        RetryConfig {
            max_retries: settings.max_retries,
            initial_backoff_ms: settings.initial_backoff_ms,
            max_backoff_ms: settings.max_backoff_ms,
            backoff_multiplier: settings.backoff_multiplier,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// IANA zone that defines the gym's calendar days
    pub timezone: String,
    pub default_goal: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            timezone: "America/Toronto".to_string(),
            default_goal: WeeklyGoal::DEFAULT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub poll_interval_ms: u64,
    /// Window shown by the trend chart when no range is given
    pub trend_days: u32,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 3500,
            trend_days: 30,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyConfig {
    pub status_failure_policy: StatusFailurePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `json` or `pretty`
    pub format: String,
    /// Defaults to the platform data dir when unset
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            directory: None,
        }
    }
}

impl LoggingConfig {
    pub fn log_dir(&self) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(|| data_dir().join("logs"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub store_path: Option<PathBuf>,
}

impl SessionConfig {
    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(|| data_dir().join("session.json"))
    }
}

impl KioskConfig {
    /// Default location: `<config dir>/gymdock/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(CONFIG_FILE)
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    ///
    /// Environment overrides are applied after the file is parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&content)?
        } else {
            log::debug!(
                "[config] no config file, using defaults path={}",
                path.display()
            );
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.api.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "api.base_url",
            reason: e.to_string(),
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url",
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.api.retry.backoff_multiplier < 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "api.retry.backoff_multiplier",
                reason: "must be at least 1.0".to_string(),
            });
        }
        self.calendar()?;
        if self.admin.poll_interval_ms < 250 {
            return Err(ConfigError::InvalidValue {
                field: "admin.poll_interval_ms",
                reason: "must be at least 250".to_string(),
            });
        }
        if self.admin.trend_days == 0 || self.admin.trend_days > 366 {
            return Err(ConfigError::InvalidValue {
                field: "admin.trend_days",
                reason: "must be between 1 and 366".to_string(),
            });
        }
        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected json or pretty, got {}", self.logging.format),
            });
        }
        Ok(())
    }

    pub fn calendar(&self) -> Result<ZoneCalendar, ConfigError> {
        ZoneCalendar::from_name(&self.calendar.timezone).map_err(|e| ConfigError::InvalidValue {
            field: "calendar.timezone",
            reason: e.message().to_string(),
        })
    }

    /// Configured goal, clamped to the supported range.
    pub fn default_goal(&self) -> WeeklyGoal {
        WeeklyGoal::new(self.calendar.default_goal)
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::from(&self.api.retry)
    }
}

fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
