// SPDX-License-Identifier: MPL-2.0
//! Overlay styles shared by toasts and the assistant panel chrome.

use crate::ui::design_tokens::{
    opacity,
    palette::{BLACK, WHITE},
};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

fn container_background() -> Color {
    Color {
        a: opacity::OVERLAY_STRONG,
        ..BLACK
    }
}

fn container_border() -> Color {
    Color {
        a: opacity::OVERLAY_SUBTLE,
        ..WHITE
    }
}

/// Generic style for floating indicators (toast backdrop, typing hint).
pub fn indicator(rad: f32) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(container_background())),
        text_color: Some(WHITE),
        border: Border {
            color: container_border(),
            width: 1.0,
            radius: rad.into(),
        },
        ..Default::default()
    }
}
