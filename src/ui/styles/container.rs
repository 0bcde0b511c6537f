// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, palette, radius, shadow};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Generic panel surface used for forms and dashboard sections.
///
/// The color is derived from the active Iced `Theme` background, with a slight
/// opacity, so panels stay readable in both light and dark modes without
/// hard-coding colors.
pub fn panel(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    let base = palette.background.base.color;

    container::Style {
        background: Some(Background::Color(Color::from_rgba(
            base.r,
            base.g,
            base.b,
            opacity::SURFACE,
        ))),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Raised card for dashboard metrics.
pub fn card(theme: &Theme) -> container::Style {
    let palette_ext = theme.extended_palette();

    container::Style {
        background: Some(Background::Color(palette_ext.background.weak.color)),
        border: Border {
            radius: radius::MD.into(),
            width: border::WIDTH_SM,
            color: palette_ext.background.strong.color,
        },
        shadow: shadow::SM,
        ..Default::default()
    }
}

/// Body surface of the floating assistant panel (dark teal, like the
/// product's web incarnation).
pub fn chat_panel(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::PRIMARY_800)),
        text_color: Some(palette::WHITE),
        border: Border {
            radius: radius::LG.into(),
            width: border::WIDTH_SM,
            color: Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::WHITE
            },
        },
        shadow: shadow::LG,
        ..Default::default()
    }
}

/// Header bar of the assistant panel.
pub fn chat_header(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::ACCENT_500)),
        text_color: Some(palette::WHITE),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// A single transcript bubble. Users get the brand teal, the assistant a
/// slightly lighter surface.
pub fn chat_bubble(from_user: bool) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(if from_user {
            palette::PRIMARY_600
        } else {
            palette::PRIMARY_700
        })),
        text_color: Some(palette::WHITE),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
