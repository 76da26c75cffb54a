//! Service layer for message delivery.

pub mod notifications;

pub use notifications::{
    NotificationMessage, NotificationProvider, NotificationResult, SlackNotifier,
};
