// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.

use crate::ui::design_tokens::palette;
use iced::Color;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity level determines display duration and visual styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Operation completed successfully (green, 3s duration).
    #[default]
    Success,
    /// Informational message (blue, 3s duration).
    Info,
    /// Warning that doesn't block operation (orange, 5s duration).
    Warning,
    /// Error requiring attention (red, manual dismiss).
    Error,
}

impl Severity {
    /// Returns the primary color for this severity level.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// Returns the auto-dismiss duration for this severity.
    /// Returns `None` for errors (manual dismiss required).
    #[must_use]
    pub fn auto_dismiss_duration(&self) -> Option<Duration> {
        match self {
            Severity::Success | Severity::Info => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None, // Manual dismiss required
        }
    }
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    /// The i18n key for the notification message.
    message_key: String,
    /// Optional arguments for message interpolation.
    message_args: Vec<(String, String)>,
    created_at: Instant,
}

impl Notification {
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
            created_at: Instant::now(),
        }
    }

    /// Adds a named argument interpolated into the Fluent message.
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((name.into(), value.into()));
        self
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }

    /// True once this notification has outlived its severity's display time.
    pub fn should_auto_dismiss(&self) -> bool {
        match self.severity.auto_dismiss_duration() {
            Some(duration) => self.created_at.elapsed() >= duration,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(NotificationId::new(), NotificationId::new());
    }

    #[test]
    fn errors_never_auto_dismiss() {
        let notification = Notification::new(Severity::Error, "error-api-network");
        assert!(notification.severity().auto_dismiss_duration().is_none());
        assert!(!notification.should_auto_dismiss());
    }

    #[test]
    fn fresh_success_does_not_dismiss_yet() {
        let notification = Notification::new(Severity::Success, "notification-signed-out");
        assert!(!notification.should_auto_dismiss());
    }

    #[test]
    fn args_are_kept_in_order() {
        let notification = Notification::new(Severity::Info, "navbar-signed-in-as")
            .with_arg("username", "ada");
        assert_eq!(
            notification.message_args(),
            &[("username".to_string(), "ada".to_string())]
        );
    }
}
