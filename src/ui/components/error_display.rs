// SPDX-License-Identifier: MPL-2.0
//! Reusable error display component with consistent styling.
//!
//! Displays a failed request with:
//! - A severity-colored title
//! - A user-friendly message explaining what went wrong
//! - An optional action button (typically "Retry")
//! - An optional technical detail line
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::components::error_display::{ErrorDisplay, ErrorSeverity};
//!
//! ErrorDisplay::new(ErrorSeverity::Error)
//!     .title(i18n.tr("error-api-title"))
//!     .message(i18n.tr(error.i18n_key()))
//!     .details(error.detail())
//!     .action(i18n.tr("action-retry"), Message::Retry)
//!     .view()
//! ```

use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles::button as button_styles;
use iced::widget::{button, text, Column, Container, Text};
use iced::{alignment, Color, Element, Length, Theme};

/// Severity level determines the color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorSeverity {
    /// Critical error - prevents operation (red)
    #[default]
    Error,
    /// Warning - operation degraded but possible (orange)
    Warning,
    /// Informational - no action required (blue)
    Info,
}

impl ErrorSeverity {
    /// Returns the primary color for this severity level.
    pub fn color(&self) -> Color {
        match self {
            ErrorSeverity::Error => palette::ERROR_500,
            ErrorSeverity::Warning => palette::WARNING_500,
            ErrorSeverity::Info => palette::INFO_500,
        }
    }
}

/// Configuration for the ErrorDisplay component.
#[derive(Debug, Clone)]
pub struct ErrorDisplay<Message> {
    severity: ErrorSeverity,
    title: Option<String>,
    message: Option<String>,
    details: Option<String>,
    action_label: Option<String>,
    action_message: Option<Message>,
}

impl<Message> Default for ErrorDisplay<Message> {
    fn default() -> Self {
        Self {
            severity: ErrorSeverity::default(),
            title: None,
            message: None,
            details: None,
            action_label: None,
            action_message: None,
        }
    }
}

impl<Message: Clone + 'static> ErrorDisplay<Message> {
    /// Creates a new error display with the given severity.
    pub fn new(severity: ErrorSeverity) -> Self {
        Self {
            severity,
            ..Self::default()
        }
    }

    /// Sets the title (main heading).
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the message (user-friendly explanation).
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the technical detail line.
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Sets the action button label and message.
    pub fn action(mut self, label: impl Into<String>, message: Message) -> Self {
        self.action_label = Some(label.into());
        self.action_message = Some(message);
        self
    }

    /// Renders the error display component.
    pub fn view(self) -> Element<'static, Message> {
        let accent_color = self.severity.color();

        let mut content = Column::new()
            .spacing(spacing::SM)
            .align_x(alignment::Horizontal::Center)
            .width(Length::Fill);

        if let Some(title_text) = self.title {
            let title = Text::new(title_text)
                .size(typography::TITLE_MD)
                .style(move |_theme: &Theme| text::Style {
                    color: Some(accent_color),
                });
            content = content.push(title);
        }

        if let Some(message_text) = self.message {
            let message = Text::new(message_text).size(typography::BODY);
            content = content.push(
                Container::new(message)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Center),
            );
        }

        if let Some(details_text) = self.details {
            let details = Text::new(details_text)
                .size(typography::CAPTION)
                .style(|theme: &Theme| text::Style {
                    color: Some(theme.extended_palette().background.strong.color),
                });
            content = content.push(
                Container::new(details)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Center),
            );
        }

        if let (Some(label), Some(msg)) = (self.action_label, self.action_message) {
            let action_btn = button(Text::new(label))
                .on_press(msg)
                .style(button_styles::primary);
            content = content.push(
                Container::new(action_btn)
                    .padding(spacing::SM)
                    .align_x(alignment::Horizontal::Center),
            );
        }

        Container::new(content)
            .width(Length::Fill)
            .padding(spacing::LG)
            .into()
    }
}
