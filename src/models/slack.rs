//! Slack incoming-webhook configuration.

use crate::error::{AppError, AppResult};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Request timeout used when none is configured
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

/// Delivery parameters for a [`SlackNotifier`](crate::SlackNotifier)
///
/// The webhook URL is stored exactly as given. Nothing is checked at
/// construction; call [`SlackConfig::validate`] or let the notifier do it
/// before the first request.
///
/// # Example
/// ```
/// use slack_notifier::SlackConfig;
///
/// let config = SlackConfig::new("https://hooks.slack.com/services/T000/B000/XXXX")
///     .with_username("ci-bot");
/// assert_eq!(config.webhook_url, "https://hooks.slack.com/services/T000/B000/XXXX");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackConfig {
    pub webhook_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl SlackConfig {
    /// Creates a configuration for the given webhook URL with default settings
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            channel: None,
            username: None,
            icon_emoji: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_icon_emoji(mut self, icon_emoji: impl Into<String>) -> Self {
        self.icon_emoji = Some(icon_emoji.into());
        self
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Checks every field
    ///
    /// Checks that:
    /// - webhook_url is a non-empty http(s) URL with a host
    /// - timeout_seconds is positive
    /// - channel, username and icon_emoji are not blank when set
    /// - icon_emoji looks like `:name:`
    pub fn validate(&self) -> AppResult<()> {
        self.parse_webhook_url()?;

        if self.timeout_seconds == 0 {
            return Err(AppError::validation(
                "timeout_seconds",
                "Timeout must be greater than 0 seconds",
            ));
        }

        self.validate_overrides()
    }

    /// Parses the webhook URL, rejecting anything that is not http(s)
    pub fn parse_webhook_url(&self) -> AppResult<Url> {
        if self.webhook_url.trim().is_empty() {
            return Err(AppError::validation(
                "webhook_url",
                "Webhook URL cannot be empty",
            ));
        }

        let url = Url::parse(&self.webhook_url)
            .map_err(|e| AppError::validation("webhook_url", format!("Invalid URL format: {e}")))?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(AppError::validation(
                "webhook_url",
                "URL must use http or https protocol",
            ));
        }

        if url.host_str().is_none_or(str::is_empty) {
            return Err(AppError::validation("webhook_url", "URL must include a host"));
        }

        Ok(url)
    }

    /// Validates the optional payload overrides on their own
    pub fn validate_overrides(&self) -> AppResult<()> {
        for (field, value) in [
            ("channel", &self.channel),
            ("username", &self.username),
            ("icon_emoji", &self.icon_emoji),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(AppError::validation(field, "Value cannot be blank when set"));
            }
        }

        if let Some(emoji) = &self.icon_emoji {
            let is_shortcode = emoji.len() > 2
                && emoji.starts_with(':')
                && emoji.ends_with(':')
                && !emoji[1..emoji.len() - 1].contains(char::is_whitespace);
            if !is_shortcode {
                return Err(AppError::validation(
                    "icon_emoji",
                    format!("Emoji must be a shortcode like :robot_face:, got '{emoji}'"),
                ));
            }
        }

        Ok(())
    }

    /// Host part of the webhook URL, for logs that must not leak the secret path
    pub fn redacted_url(&self) -> String {
        match Url::parse(&self.webhook_url) {
            Ok(url) => format!(
                "{}://{}/…",
                url.scheme(),
                url.host_str().unwrap_or_default()
            ),
            Err(_) => "<invalid url>".to_string(),
        }
    }

    /// Parse a JSON value into a typed SlackConfig
    pub fn from_json(config: &JsonValue) -> Result<Self, serde_json::Error> {
        serde_json::from_value(config.clone())
    }

    /// Convert to a JSON value
    pub fn to_json(&self) -> Result<JsonValue, serde_json::Error> {
        serde_json::to_value(self)
    }
}
