//! Slack incoming-webhook provider.
//!
//! Posts a JSON payload to the configured webhook URL using the global
//! `HTTP_CLIENT`. Each send is exactly one request; nothing is retried.
//!
//! Slack API Reference: https://api.slack.com/messaging/webhooks

use super::provider::{NotificationMessage, NotificationProvider, NotificationResult};
use crate::error::AppResult;
use crate::external::client::HTTP_CLIENT;
use crate::models::SlackConfig;
use async_trait::async_trait;
use serde_json::json;
use std::time::{Duration, Instant};

/// Slack notification provider
///
/// # Example
/// ```no_run
/// use slack_notifier::{SlackConfig, SlackNotifier};
///
/// # async fn run() -> slack_notifier::error::AppResult<()> {
/// let config = SlackConfig::new("https://hooks.slack.com/services/T000/B000/XXXX");
/// let notifier = SlackNotifier::new(config);
/// notifier.send_text("Hello from ai-coding-utils").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SlackNotifier {
    config: SlackConfig,
}

impl SlackNotifier {
    /// Creates a new notifier; the configuration is checked on first send
    pub fn new(config: SlackConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SlackConfig {
        &self.config
    }

    /// Sends a plain text message
    pub async fn send_text(&self, text: impl Into<String>) -> AppResult<NotificationResult> {
        self.send(&NotificationMessage::text(text)).await
    }

    /// Builds the JSON body posted to the webhook
    ///
    /// A non-blank title is rendered in bold on the first line.
    /// Metadata is not transmitted.
    pub fn build_payload(&self, message: &NotificationMessage) -> serde_json::Value {
        let text = match message.title.as_deref() {
            Some(title) if !title.trim().is_empty() => format!("*{}*\n{}", title, message.body),
            _ => message.body.clone(),
        };

        let mut body = json!({ "text": text });

        if let Some(channel) = &self.config.channel {
            body["channel"] = json!(channel);
        }

        if let Some(username) = &self.config.username {
            body["username"] = json!(username);
        }

        if let Some(icon_emoji) = &self.config.icon_emoji {
            body["icon_emoji"] = json!(icon_emoji);
        }

        body
    }
}

#[async_trait]
impl NotificationProvider for SlackNotifier {
    /// Sends a notification via the Slack webhook
    ///
    /// # Returns
    /// NotificationResult with success status, HTTP status code, response body,
    /// and duration. Invalid configuration is returned as an error before any
    /// request is made.
    async fn send(&self, message: &NotificationMessage) -> AppResult<NotificationResult> {
        self.config.validate()?;

        let payload = self.build_payload(message);
        let start = Instant::now();

        let response = HTTP_CLIENT
            .post(&self.config.webhook_url)
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .json(&payload)
            .send()
            .await;

        let duration_ms = start.elapsed().as_millis() as u64;

        let result = match response {
            Ok(resp) => {
                let status = resp.status();
                let response_text = resp.text().await.ok();

                NotificationResult {
                    success: status.is_success(),
                    status_code: Some(status.as_u16()),
                    response: response_text,
                    duration_ms,
                }
            }
            Err(e) => NotificationResult {
                success: false,
                status_code: None,
                response: Some(e.to_string()),
                duration_ms,
            },
        };

        if result.success {
            tracing::info!(
                provider = self.name(),
                destination = %self.config.redacted_url(),
                status = ?result.status_code,
                duration_ms,
                "Slack message delivered"
            );
        } else {
            tracing::warn!(
                provider = self.name(),
                destination = %self.config.redacted_url(),
                status = ?result.status_code,
                response = result.response.as_deref().unwrap_or_default(),
                duration_ms,
                "Slack message not delivered"
            );
        }

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "slack"
    }

    async fn validate_config(&self) -> AppResult<()> {
        self.config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use httpmock::prelude::*;
    use std::collections::HashMap;

    fn notifier_for(server: &MockServer) -> SlackNotifier {
        SlackNotifier::new(SlackConfig::new(server.url("/services/T000/B000/XXXX")))
    }

    #[test]
    fn test_build_payload_text_only() {
        let notifier = SlackNotifier::new(SlackConfig::new(
            "https://hooks.slack.com/services/T000/B000/XXXX",
        ));

        let body = notifier.build_payload(&NotificationMessage::text("Hello from ai-coding-utils"));
        assert_eq!(body, json!({ "text": "Hello from ai-coding-utils" }));
    }

    #[test]
    fn test_build_payload_full() {
        let config = SlackConfig::new("https://hooks.slack.com/services/T000/B000/XXXX")
            .with_channel("#alerts")
            .with_username("ci-bot")
            .with_icon_emoji(":robot_face:");
        let notifier = SlackNotifier::new(config);

        let message = NotificationMessage {
            title: Some("Deploy".to_string()),
            body: "api v2 is live".to_string(),
            metadata: HashMap::from([("env".to_string(), "prod".to_string())]),
        };

        let body = notifier.build_payload(&message);
        assert_eq!(body["text"], "*Deploy*\napi v2 is live");
        assert_eq!(body["channel"], "#alerts");
        assert_eq!(body["username"], "ci-bot");
        assert_eq!(body["icon_emoji"], ":robot_face:");
        assert!(body.get("env").is_none());
    }

    #[test]
    fn test_build_payload_ignores_blank_title() {
        let notifier = SlackNotifier::new(SlackConfig::new(
            "https://hooks.slack.com/services/T000/B000/XXXX",
        ));

        for title in ["", "  "] {
            let body = notifier.build_payload(&NotificationMessage::text("body").with_title(title));
            assert_eq!(body, json!({ "text": "body" }));
        }
    }

    #[tokio::test]
    async fn test_send_text_posts_once() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/services/T000/B000/XXXX")
                    .header("content-type", "application/json")
                    .json_body(json!({ "text": "Hello from ai-coding-utils" }));
                then.status(200).body("ok");
            })
            .await;

        let result = notifier_for(&server)
            .send_text("Hello from ai-coding-utils")
            .await
            .unwrap();

        mock.assert_hits_async(1).await;
        assert!(result.success);
        assert_eq!(result.status_code, Some(200));
        assert_eq!(result.response.as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn test_send_reports_http_failure() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/services/T000/B000/XXXX");
                then.status(404).body("no_service");
            })
            .await;

        let result = notifier_for(&server).send_text("lost").await.unwrap();

        mock.assert_async().await;
        assert!(!result.success);
        assert_eq!(result.status_code, Some(404));
        assert_eq!(result.response.as_deref(), Some("no_service"));
    }

    #[tokio::test]
    async fn test_send_does_not_follow_redirects() {
        let server = MockServer::start_async().await;
        let moved = server
            .mock_async(|when, then| {
                when.method(POST).path("/old");
                then.status(302).header("location", server.url("/new"));
            })
            .await;
        let target = server
            .mock_async(|when, then| {
                when.path("/new");
                then.status(200).body("ok");
            })
            .await;

        let notifier = SlackNotifier::new(SlackConfig::new(server.url("/old")));
        let result = notifier.send_text("moved").await.unwrap();

        moved.assert_hits_async(1).await;
        target.assert_hits_async(0).await;
        assert!(!result.success);
        assert_eq!(result.status_code, Some(302));
        assert!(result.ensure_delivered().is_err());
    }

    #[tokio::test]
    async fn test_send_reports_transport_failure() {
        let notifier = SlackNotifier::new(SlackConfig::new("http://127.0.0.1:1/hook"));

        let result = notifier.send_text("nobody home").await.unwrap();

        assert!(!result.success);
        assert_eq!(result.status_code, None);
        assert!(result.response.is_some());
    }

    #[tokio::test]
    async fn test_send_honours_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).delay(Duration::from_secs(3));
            })
            .await;

        let notifier = SlackNotifier::new(
            SlackConfig::new(server.url("/slow")).with_timeout_seconds(1),
        );
        let result = notifier.send_text("slow").await.unwrap();

        assert!(!result.success);
        assert_eq!(result.status_code, None);
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_sending() {
        let notifier = SlackNotifier::new(SlackConfig::new("hooks.slack.com/services/T000"));
        let err = notifier.send_text("never").await.unwrap_err();

        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "webhook_url"));
    }

    #[tokio::test]
    async fn test_invalid_override_is_rejected_before_sending() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200);
            })
            .await;

        let notifier = SlackNotifier::new(
            SlackConfig::new(server.url("/hook")).with_icon_emoji("robot"),
        );
        assert!(notifier.send_text("never").await.is_err());
        mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_validate_config() {
        let valid = SlackNotifier::new(SlackConfig::new(
            "https://hooks.slack.com/services/T000/B000/XXXX",
        ));
        assert!(valid.validate_config().await.is_ok());

        let invalid = SlackNotifier::new(SlackConfig::new(""));
        assert!(invalid.validate_config().await.is_err());
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).json_body(json!({ "text": "*Title*\nbody" }));
                then.status(200).body("ok");
            })
            .await;

        let provider: std::sync::Arc<dyn NotificationProvider> =
            std::sync::Arc::new(notifier_for(&server));
        let message = NotificationMessage::text("body").with_title("Title");

        let result = provider.send(&message).await.unwrap();
        assert_eq!(provider.name(), "slack");
        assert!(result.success);
    }
}
