// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering individual notifications.
//!
//! Toasts are the visual representation of notifications, appearing as
//! small cards with severity-colored accents and a dismiss button.

use super::manager::{Manager, Message};
use super::notification::{Notification, Severity};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{border, radius, shadow, sizing, spacing, typography};
use iced::widget::{button, container, text, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Theme};

/// Toast widget configuration.
pub struct Toast;

impl Toast {
    /// Renders a single toast notification.
    pub fn view<'a>(notification: &'a Notification, i18n: &'a I18n) -> Element<'a, Message> {
        let severity = notification.severity();
        let accent_color = severity.color();

        // Resolve the message text using i18n with optional arguments
        let message_text = if notification.message_args().is_empty() {
            i18n.tr(notification.message_key())
        } else {
            let args: Vec<(&str, &str)> = notification
                .message_args()
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            i18n.tr_with_args(notification.message_key(), &args)
        };

        let badge = Text::new(Self::severity_glyph(severity))
            .size(typography::BODY_LG)
            .color(accent_color);

        let message_widget =
            Text::new(message_text)
                .size(typography::BODY)
                .style(|theme: &Theme| text::Style {
                    color: Some(theme.palette().text),
                });

        let notification_id = notification.id();
        let dismiss_button = button(Text::new("✕").size(typography::BODY_SM))
            .on_press(Message::Dismiss(notification_id))
            .padding(spacing::XXS)
            .style(styles_dismiss);

        // Layout: [badge] [message] [dismiss]
        let content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Container::new(badge).padding(spacing::XXS))
            .push(
                Container::new(message_widget)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Left),
            )
            .push(dismiss_button);

        Container::new(content)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |theme: &Theme| toast_container_style(theme, accent_color))
            .into()
    }

    /// Renders the toast overlay with all visible notifications.
    ///
    /// Positions toasts in the bottom-left corner (the chat launcher owns the
    /// bottom-right), stacked vertically.
    pub fn view_overlay<'a>(manager: &'a Manager, i18n: &'a I18n) -> Element<'a, Message> {
        let toasts: Vec<Element<'a, Message>> = manager
            .visible()
            .map(|notification| Self::view(notification, i18n))
            .collect();

        if toasts.is_empty() {
            // Return an empty container that takes no space
            Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into()
        } else {
            let toast_column = Column::with_children(toasts)
                .spacing(spacing::XS)
                .align_x(alignment::Horizontal::Left);

            Container::new(toast_column)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Left)
                .align_y(alignment::Vertical::Bottom)
                .padding(spacing::MD)
                .into()
        }
    }

    fn severity_glyph(severity: Severity) -> &'static str {
        match severity {
            Severity::Success => "✔",
            Severity::Info => "ℹ",
            Severity::Warning | Severity::Error => "⚠",
        }
    }
}

/// Style function for the toast container.
fn toast_container_style(theme: &Theme, accent_color: Color) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(iced::Background::Color(bg_color)),
        border: iced::Border {
            color: accent_color,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

/// Style function for the dismiss button.
fn styles_dismiss(theme: &Theme, status: iced::widget::button::Status) -> iced::widget::button::Style {
    let palette = theme.extended_palette();
    let background = match status {
        iced::widget::button::Status::Hovered => Some(iced::Background::Color(
            palette.background.weak.color,
        )),
        _ => None,
    };

    iced::widget::button::Style {
        background,
        text_color: palette.background.base.text,
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}
