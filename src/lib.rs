//! slack-notifier library
//!
//! Delivers text messages to a Slack incoming webhook, with layered
//! configuration, structured logging and a small CLI on top.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod models;
pub mod services;

pub use error::{AppError, AppResult};
pub use models::SlackConfig;
pub use services::{NotificationMessage, NotificationProvider, NotificationResult, SlackNotifier};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
