//! Core notification provider trait and types.
//!
//! A provider delivers one [`NotificationMessage`] to one destination and
//! reports what happened in a [`NotificationResult`].

use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Message to be sent via notification provider
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Message title/subject (optional for some providers)
    pub title: Option<String>,
    /// Message body/content (required)
    pub body: String,
    /// Additional metadata for provider-specific data
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl NotificationMessage {
    /// A message with only a body
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl From<&str> for NotificationMessage {
    fn from(body: &str) -> Self {
        Self::text(body)
    }
}

impl From<String> for NotificationMessage {
    fn from(body: String) -> Self {
        Self::text(body)
    }
}

/// Result of a notification send attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResult {
    /// Whether send was successful
    pub success: bool,
    /// HTTP status code, `None` when no response was received
    pub status_code: Option<u16>,
    /// Response body or transport error message
    pub response: Option<String>,
    /// Time taken for the operation in milliseconds
    pub duration_ms: u64,
}

impl NotificationResult {
    /// Turns an unsuccessful attempt into [`AppError::Delivery`]
    pub fn ensure_delivered(self) -> AppResult<Self> {
        if self.success {
            return Ok(self);
        }

        Err(AppError::Delivery {
            status_code: self.status_code,
            message: self
                .response
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| "no response body".to_string()),
        })
    }
}

/// Trait for notification providers
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// All providers must be Send + Sync for use in async contexts.
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Sends a notification message
    ///
    /// Transport and HTTP failures are reported through
    /// `NotificationResult::success`; `Err` is reserved for problems detected
    /// before anything was sent.
    async fn send(&self, message: &NotificationMessage) -> AppResult<NotificationResult>;

    /// Returns the provider name for logging/debugging
    fn name(&self) -> &'static str;

    /// Validates provider configuration (optional, default no-op)
    async fn validate_config(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(success: bool, status_code: Option<u16>, response: Option<&str>) -> NotificationResult {
        NotificationResult {
            success,
            status_code,
            response: response.map(str::to_string),
            duration_ms: 12,
        }
    }

    #[test]
    fn test_text_message() {
        let message = NotificationMessage::text("Hello");
        assert_eq!(message.body, "Hello");
        assert!(message.title.is_none());
        assert!(message.metadata.is_empty());
        assert_eq!(NotificationMessage::from("Hello"), message);
    }

    #[test]
    fn test_with_title() {
        let message = NotificationMessage::text("Build green").with_title("CI");
        assert_eq!(message.title.as_deref(), Some("CI"));
    }

    #[test]
    fn test_ensure_delivered_passes_success_through() {
        let ok = result(true, Some(200), Some("ok"));
        assert_eq!(ok.clone().ensure_delivered().unwrap(), ok);
    }

    #[test]
    fn test_ensure_delivered_http_failure() {
        let err = result(false, Some(403), Some("invalid_token"))
            .ensure_delivered()
            .unwrap_err();
        match err {
            AppError::Delivery { status_code, message } => {
                assert_eq!(status_code, Some(403));
                assert_eq!(message, "invalid_token");
            }
            other => panic!("Expected Delivery, got {other:?}"),
        }
    }

    #[test]
    fn test_ensure_delivered_empty_body() {
        let err = result(false, Some(500), Some("")).ensure_delivered().unwrap_err();
        assert!(err.to_string().contains("no response body"));
    }
}
