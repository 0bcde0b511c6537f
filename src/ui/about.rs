// SPDX-License-Identifier: MPL-2.0
//! About screen.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{Column, Container, Text};
use iced::{alignment, Element, Length};

/// Renders the about screen. It has no interactions of its own, so it is
/// generic over the parent's message type.
pub fn view<'a, Message: 'a>(i18n: &'a I18n) -> Element<'a, Message> {
    let title = Text::new(i18n.tr("about-title")).size(typography::TITLE_LG);
    let description = Text::new(i18n.tr("about-description")).size(typography::BODY);
    let version = Text::new(format!(
        "{}: {}",
        i18n.tr("about-version-label"),
        env!("CARGO_PKG_VERSION")
    ))
    .size(typography::BODY_SM);

    Container::new(
        Container::new(
            Column::new()
                .spacing(spacing::MD)
                .push(title)
                .push(description)
                .push(version),
        )
        .width(Length::Fixed(sizing::FORM_WIDTH * 1.4))
        .padding(spacing::LG)
        .style(styles::container::panel),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .align_x(alignment::Horizontal::Center)
    .padding(spacing::XL)
    .into()
}
