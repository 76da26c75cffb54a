//! Check command handler
//!
//! Validates the merged configuration and prints a summary that is safe to
//! paste into a ticket: the webhook secret path is redacted.

use crate::config::settings::Settings;
use crate::error::AppResult;

/// Handler for the check command
pub struct CheckCommandHandler {
    config: Settings,
}

impl CheckCommandHandler {
    /// Create a new check command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validate configuration and print the summary
    ///
    /// Unlike loading, this requires a webhook URL to be present.
    pub async fn execute(&self) -> AppResult<()> {
        self.config.validate()?;

        let slack = self.config.slack.to_slack_config();
        slack.validate()?;

        for line in self.summary_lines() {
            println!("{line}");
        }
        Ok(())
    }

    fn summary_lines(&self) -> Vec<String> {
        let slack = self.config.slack.to_slack_config();
        let or_default = |value: &Option<String>| {
            value.clone().unwrap_or_else(|| "(webhook default)".to_string())
        };

        let mut lines = vec![
            "✓ Configuration is valid".to_string(),
            format!(
                "  application: {} {}",
                self.config.application.name, self.config.application.version
            ),
            format!("  webhook:     {}", slack.redacted_url()),
            format!("  channel:     {}", or_default(&slack.channel)),
            format!("  username:    {}", or_default(&slack.username)),
            format!("  icon_emoji:  {}", or_default(&slack.icon_emoji)),
            format!("  timeout:     {}s", slack.timeout_seconds),
            format!("  log level:   {}", self.config.logger.level),
        ];

        if self.config.logger.file.enabled {
            lines.push(format!("  log file:    {}", self.config.logger.file.path));
        }

        lines
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}
