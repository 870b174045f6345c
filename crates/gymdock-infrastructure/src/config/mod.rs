mod settings;
mod timeouts;

pub use settings::{
    AdminConfig, ApiConfig, CalendarConfig, ConfigError, FamilyConfig, KioskConfig, LoggingConfig,
    RetrySettings, SessionConfig, API_URL_ENV, DEFAULT_API_URL,
};
pub use timeouts::TimeoutConfig;
