//! Notification of an unusable tool.
//!
//! This module provides:
//! - [`Notification`] and [`RemediationAction`], the value handed to a host
//! - [`Notifier`] trait, implemented by whatever renders the message
//! - [`LogNotifier`] for hosts without a UI (reports through `tracing`)
//! - [`MockNotifier`] for tests
//!
//! The crate never renders anything itself.

pub mod mock;

pub use mock::MockNotifier;

use crate::profile::ToolProfile;
use serde::Serialize;

/// Title of the single remediation action.
pub const DOWNLOAD_ACTION_TITLE: &str = "Download";

/// The affirmative action offered alongside a failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemediationAction {
    /// Button or menu label.
    pub title: String,
    /// Page to open when the action is accepted.
    pub url: String,
}

/// A warning for the user that the tool cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Short reason (e.g., "Buildifier was not found").
    pub reason: String,
    /// Full text to show the user.
    pub message: String,
    /// What the user can do about it.
    pub action: RemediationAction,
}

impl Notification {
    /// Build the download prompt for `reason`.
    pub fn download_prompt(profile: &ToolProfile, reason: &str) -> Self {
        let message = format!(
            "{reason}; {feature} will not be available. Please download it from {url} \
             and install it on your system PATH or set its location in Settings.",
            feature = profile.feature,
            url = profile.releases_url,
        );
        Self {
            reason: reason.to_string(),
            message,
            action: RemediationAction {
                title: DOWNLOAD_ACTION_TITLE.to_string(),
                url: profile.releases_url.clone(),
            },
        }
    }
}

/// How the user answered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationResponse {
    /// The remediation action was chosen.
    Accepted,
    /// The notification was closed or ignored.
    Dismissed,
}

/// Presents notifications to the user.
///
/// Implemented by the host (editor, IDE plugin, terminal UI).
pub trait Notifier {
    /// Show a notification and report how the user answered.
    fn notify(&mut self, notification: &Notification) -> NotificationResponse;

    /// Open a URL for the user (called after an accepted action).
    fn open_url(&mut self, url: &str);
}

/// Reports notifications as `tracing` warnings and never accepts the action.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notification: &Notification) -> NotificationResponse {
        tracing::warn!(
            reason = %notification.reason,
            url = %notification.action.url,
            "{}",
            notification.message
        );
        NotificationResponse::Dismissed
    }

    fn open_url(&mut self, url: &str) {
        tracing::info!(url, "Open this URL to download the tool");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_prompt_mentions_reason_and_url() {
        let profile = ToolProfile::buildifier();
        let notification = Notification::download_prompt(&profile, "Buildifier was not found");

        insta::assert_snapshot!(notification.message, @"Buildifier was not found; linting and formatting of Bazel files will not be available. Please download it from https://github.com/bazelbuild/buildtools/releases and install it on your system PATH or set its location in Settings.");
        assert_eq!(notification.reason, "Buildifier was not found");
    }

    #[test]
    fn download_prompt_offers_single_download_action() {
        let profile = ToolProfile::buildifier();
        let notification = Notification::download_prompt(&profile, "anything");

        assert_eq!(notification.action.title, "Download");
        assert_eq!(notification.action.url, profile.releases_url);
    }

    #[test]
    fn log_notifier_dismisses() {
        let profile = ToolProfile::buildifier();
        let notification = Notification::download_prompt(&profile, "Buildifier was not found");
        let mut notifier = LogNotifier;

        assert_eq!(
            notifier.notify(&notification),
            NotificationResponse::Dismissed
        );
    }
}
