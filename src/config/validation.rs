//! Configuration validation logic
//!
//! Checks run on every loaded [`Settings`] before it is handed to the rest of
//! the application.

use crate::config::error::ConfigError;
use crate::config::settings::{LoggerSettings, Settings, SlackSettings};
use crate::error::AppError;

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl SlackSettings {
    /// Validate slack configuration
    ///
    /// # Validation Rules
    /// - Timeout must be greater than 0
    /// - If a webhook URL is present it must be a valid http(s) URL
    /// - Optional overrides must not be blank
    ///
    /// A missing webhook URL is not an error here; it is only required when a
    /// message is actually sent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "slack.timeout_seconds",
                "Timeout must be greater than 0 seconds.",
            ));
        }

        let config = self.to_slack_config();
        if !config.webhook_url.is_empty() {
            config.parse_webhook_url().map_err(into_config_error)?;
        }
        config.validate_overrides().map_err(into_config_error)
    }
}

impl LoggerSettings {
    /// Validate logger configuration
    ///
    /// # Validation Rules
    /// - Level must be one of trace, debug, info, warn, error
    /// - At least one of console or file output must be enabled
    /// - File format must be full, compact or json
    /// - File path must not be empty when file output is enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.parse_format()?;

        if self.file.enabled && self.file.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "Log file path cannot be empty when file output is enabled.",
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all sections of the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.application.name.trim().is_empty() {
            return Err(ConfigError::validation(
                "application.name",
                "Application name cannot be empty.",
            ));
        }

        self.slack.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

fn into_config_error(error: AppError) -> ConfigError {
    match error {
        AppError::Validation { field, reason } => ConfigError::ValidationError {
            field: format!("slack.{}", field),
            message: reason,
        },
        other => ConfigError::ParseError(other.to_string()),
    }
}
