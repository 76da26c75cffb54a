//! Sends one message to a Slack incoming webhook.
//!
//! ```text
//! SLACK_WEBHOOK_URL=https://hooks.slack.com/services/... \
//!     cargo run --example slack_integration -- "optional message"
//! ```

use anyhow::Context;
use slack_notifier::logger::{LoggerConfigBuilder, init_logger};
use slack_notifier::{SlackConfig, SlackNotifier};

const PLACEHOLDER_WEBHOOK: &str = "https://hooks.slack.com/services/T000/B000/XXXX";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger(LoggerConfigBuilder::new().level("debug").build()?)?;

    let webhook_url =
        std::env::var("SLACK_WEBHOOK_URL").unwrap_or_else(|_| PLACEHOLDER_WEBHOOK.to_string());
    let message = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Hello from ai-coding-utils".to_string());

    let notifier = SlackNotifier::new(SlackConfig::new(webhook_url));
    let result = notifier
        .send_text(message)
        .await
        .context("Slack configuration rejected")?;

    println!(
        "success={} status={:?} duration={}ms",
        result.success, result.status_code, result.duration_ms
    );

    result.ensure_delivered()?;
    Ok(())
}
