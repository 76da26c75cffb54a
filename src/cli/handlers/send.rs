//! Send command handler
//!
//! Delivers one message through the Slack provider, or prints what would be
//! sent when `--dry-run` is given.

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::services::{NotificationMessage, NotificationProvider, SlackNotifier};

/// Handler for the send command
pub struct SendCommandHandler {
    config: Settings,
}

impl SendCommandHandler {
    /// Create a new send command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the send command
    ///
    /// # Errors
    /// - Validation errors when the webhook configuration is incomplete
    /// - `AppError::Delivery` when Slack does not accept the message
    pub async fn execute(&self, message: &str, title: Option<&str>, dry_run: bool) -> AppResult<()> {
        let notifier = SlackNotifier::new(self.config.slack.to_slack_config());
        let message = Self::build_message(message, title);

        if dry_run {
            return self.preview(&notifier, &message).await;
        }

        let result = notifier.send(&message).await?.ensure_delivered()?;

        println!(
            "✓ Message delivered to {} (status {}, {} ms)",
            notifier.config().redacted_url(),
            result.status_code.unwrap_or_default(),
            result.duration_ms
        );
        Ok(())
    }

    /// Validate and print the payload without sending it
    async fn preview(&self, notifier: &SlackNotifier, message: &NotificationMessage) -> AppResult<()> {
        notifier.validate_config().await?;

        println!("Dry run - nothing was sent");
        println!("Destination: {}", notifier.config().redacted_url());
        println!("Payload:\n{:#}", notifier.build_payload(message));
        Ok(())
    }

    fn build_message(body: &str, title: Option<&str>) -> NotificationMessage {
        let message = NotificationMessage::text(body);
        match title {
            Some(title) => message.with_title(title),
            None => message,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}
