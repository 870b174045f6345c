use std::time::Duration;

use super::KioskConfig;

/// Durations used by the HTTP client and the background pollers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Whole-request timeout for a single backend call
    pub http_request: Duration,

    /// TCP connect timeout
    pub http_connect: Duration,

    /// Interval of the admin "today" poller
    pub poll_interval: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            http_request: Duration::from_secs(30),
            http_connect: Duration::from_secs(5),
            poll_interval: Duration::from_millis(3500),
        }
    }
}

impl From<&KioskConfig> for TimeoutConfig {
    fn from(config: &KioskConfig) -> Self {
        Self {
            http_request: Duration::from_secs(config.api.timeout_secs),
            poll_interval: Duration::from_millis(config.admin.poll_interval_ms),
            ..Self::default()
        }
    }
}
