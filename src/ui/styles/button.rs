// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    palette::{self, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Theme};

/// Primary action button (sign in, predict, refresh).
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active | button::Status::Pressed => button::Style {
            background: Some(Background::Color(palette::PRIMARY_500)),
            text_color: WHITE,
            border: Border {
                color: palette::PRIMARY_600,
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: shadow::SM,
            snap: true,
        },
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(palette::PRIMARY_400)),
            text_color: WHITE,
            border: Border {
                color: palette::PRIMARY_500,
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: shadow::MD,
            snap: true,
        },
        _ => button::Style::default(),
    }
}

/// Accent button for the calls to action that should pop (send message,
/// chat launcher).
pub fn accent(_theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active | button::Status::Pressed => button::Style {
            background: Some(Background::Color(palette::ACCENT_500)),
            text_color: WHITE,
            border: Border {
                color: palette::ACCENT_600,
                width: 1.0,
                radius: radius::MD.into(),
            },
            shadow: shadow::SM,
            snap: true,
        },
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(palette::ACCENT_400)),
            text_color: WHITE,
            border: Border {
                color: palette::ACCENT_500,
                width: 1.0,
                radius: radius::MD.into(),
            },
            shadow: shadow::MD,
            snap: true,
        },
        _ => button::Style::default(),
    }
}

/// Round launcher button that opens the assistant panel.
pub fn launcher(theme: &Theme, status: button::Status) -> button::Style {
    let mut style = accent(theme, status);
    style.border.radius = radius::FULL.into();
    style.shadow = shadow::LG;
    style
}

/// Quiet button for secondary navigation (switch to sign-up, menu entries).
pub fn quiet(theme: &Theme, status: button::Status) -> button::Style {
    let palette_ext = theme.extended_palette();
    match status {
        button::Status::Hovered | button::Status::Pressed => button::Style {
            background: Some(Background::Color(palette_ext.background.weak.color)),
            text_color: palette_ext.background.base.text,
            border: Border {
                radius: radius::SM.into(),
                ..Border::default()
            },
            shadow: shadow::NONE,
            snap: true,
        },
        _ => button::Style {
            background: None,
            text_color: palette_ext.background.base.text,
            border: Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}

/// Selected state in toggle groups (model type, theme, language pickers).
pub fn selected(_theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active | button::Status::Pressed | button::Status::Hovered => {
            button::Style {
                background: Some(Background::Color(palette::PRIMARY_500)),
                text_color: WHITE,
                border: Border {
                    color: palette::PRIMARY_600,
                    width: 1.0,
                    radius: radius::SM.into(),
                },
                shadow: shadow::SM,
                snap: true,
            }
        }
        _ => button::Style::default(),
    }
}
