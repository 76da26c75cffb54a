//! Data models for notification delivery.

pub mod slack;

pub use slack::SlackConfig;
