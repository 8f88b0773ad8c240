#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_API_ENDPOINT: &str = "http://localhost:8080/api/courses";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_NOTIFICATION_MS: u64 = 5000;

/// Resolved runtime settings. Command-line values win over the file, the
/// file wins over the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_endpoint: String,
    pub timeout_seconds: u64,
    pub notification_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            notification_ms: DEFAULT_NOTIFICATION_MS,
        }
    }
}

/// Values given explicitly by the caller; `None` falls through.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub api_endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub notification_ms: Option<u64>,
}

impl Settings {
    pub fn resolve(file: Option<&TomlConfig>, overrides: SettingsOverrides) -> Self {
        let defaults = Settings::default();
        let file = file.cloned().unwrap_or_default();

        Self {
            api_endpoint: overrides
                .api_endpoint
                .or(file.service.endpoint)
                .unwrap_or(defaults.api_endpoint),
            timeout_seconds: overrides
                .timeout_seconds
                .or(file.service.timeout_seconds)
                .unwrap_or(defaults.timeout_seconds),
            notification_ms: overrides
                .notification_ms
                .or(file.notifications.duration_ms)
                .unwrap_or(defaults.notification_ms),
        }
    }
}

impl ConfigProvider for Settings {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_endpoint("api_endpoint", &self.api_endpoint)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        validation::validate_range("notification_ms", self.notification_ms, 500, 60_000)?;
        Ok(())
    }
}
