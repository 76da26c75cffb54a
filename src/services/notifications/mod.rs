//! Notification system with pluggable providers.
//!
//! The core trait `NotificationProvider` describes one delivery channel;
//! `SlackNotifier` implements it for Slack incoming webhooks.

mod provider;
mod slack_provider;

pub use provider::{NotificationMessage, NotificationProvider, NotificationResult};
pub use slack_provider::SlackNotifier;
