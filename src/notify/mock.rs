//! Mock notifier for testing.
//!
//! `MockNotifier` implements [`Notifier`] and captures every notification
//! and opened URL for later assertion. It can be told to accept or dismiss.
//!
//! # Example
//!
//! ```
//! use toolcheck::notify::{MockNotifier, Notification, Notifier, NotificationResponse};
//! use toolcheck::profile::ToolProfile;
//!
//! let mut notifier = MockNotifier::accepting();
//! let notification = Notification::download_prompt(&ToolProfile::buildifier(), "missing");
//!
//! assert_eq!(notifier.notify(&notification), NotificationResponse::Accepted);
//! assert_eq!(notifier.notifications().len(), 1);
//! ```

use super::{Notification, NotificationResponse, Notifier};

/// Mock notifier implementation for testing.
#[derive(Debug, Clone)]
pub struct MockNotifier {
    response: NotificationResponse,
    notifications: Vec<Notification>,
    opened_urls: Vec<String>,
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::dismissing()
    }
}

impl MockNotifier {
    /// A notifier whose user ignores every notification.
    pub fn dismissing() -> Self {
        Self {
            response: NotificationResponse::Dismissed,
            notifications: Vec::new(),
            opened_urls: Vec::new(),
        }
    }

    /// A notifier whose user always chooses the remediation action.
    pub fn accepting() -> Self {
        Self {
            response: NotificationResponse::Accepted,
            ..Self::dismissing()
        }
    }

    /// Notifications shown so far.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// URLs opened so far.
    pub fn opened_urls(&self) -> &[String] {
        &self.opened_urls
    }

    /// Whether `notify` was never called.
    pub fn is_silent(&self) -> bool {
        self.notifications.is_empty()
    }
}

impl Notifier for MockNotifier {
    fn notify(&mut self, notification: &Notification) -> NotificationResponse {
        self.notifications.push(notification.clone());
        self.response
    }

    fn open_url(&mut self, url: &str) {
        self.opened_urls.push(url.to_string());
    }
}
