// SPDX-License-Identifier: MPL-2.0
//! Labeled figure card for the dashboard grids.

use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{text, Column, Container, Text};
use iced::{alignment, Element, Length, Theme};

/// Formats a count with thin thousands separation, matching the dashboards
/// the analytics were designed for (`4 504` rather than `4504.3`).
pub fn format_count(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\u{202F}');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Renders one metric card: a small label above a large figure.
pub fn view<Message: 'static>(label: String, value: String) -> Element<'static, Message> {
    let label_text = Text::new(label)
        .size(typography::BODY_SM)
        .style(|theme: &Theme| text::Style {
            color: Some(theme.extended_palette().background.strong.color),
        });
    let value_text = Text::new(value).size(typography::TITLE_MD);

    Container::new(
        Column::new()
            .spacing(spacing::XXS)
            .align_x(alignment::Horizontal::Left)
            .push(label_text)
            .push(value_text),
    )
    .width(Length::Fixed(sizing::METRIC_CARD_WIDTH))
    .padding(spacing::MD)
    .style(styles::container::card)
    .into()
}
