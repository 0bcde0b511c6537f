// SPDX-License-Identifier: MPL-2.0
//! Navigation bar for app-level navigation.
//!
//! Shows the brand, the two main destinations, the signed-in account, and a
//! hamburger menu with the secondary screens (Settings, About) and sign-out.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, Column, Container, Row, Text};
use iced::{alignment, Element, Length};

/// Which primary destination is active, for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Prediction,
}

/// Contextual data needed to render the navbar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub menu_open: bool,
    pub username: Option<&'a str>,
    pub active: Option<Tab>,
}

/// Messages emitted by the navbar.
#[derive(Debug, Clone)]
pub enum Message {
    ToggleMenu,
    GoDashboard,
    GoPrediction,
    OpenSettings,
    OpenAbout,
    SignOut,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    GoDashboard,
    GoPrediction,
    OpenSettings,
    OpenAbout,
    SignOut,
}

/// Process a navbar message and return the corresponding event.
pub fn update(message: Message, menu_open: &mut bool) -> Event {
    match message {
        Message::ToggleMenu => {
            *menu_open = !*menu_open;
            Event::None
        }
        Message::GoDashboard => {
            *menu_open = false;
            Event::GoDashboard
        }
        Message::GoPrediction => {
            *menu_open = false;
            Event::GoPrediction
        }
        Message::OpenSettings => {
            *menu_open = false;
            Event::OpenSettings
        }
        Message::OpenAbout => {
            *menu_open = false;
            Event::OpenAbout
        }
        Message::SignOut => {
            *menu_open = false;
            Event::SignOut
        }
    }
}

/// Renders the navbar (and the dropdown menu when open).
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let brand = Text::new(ctx.i18n.tr("app-title")).size(typography::TITLE_MD);

    let tab = |label_key: &str, tab: Tab, message: Message| {
        let style: fn(&iced::Theme, button::Status) -> button::Style = if ctx.active == Some(tab) {
            styles::button::selected
        } else {
            styles::button::quiet
        };
        button(Text::new(ctx.i18n.tr(label_key)).size(typography::BODY))
            .style(style)
            .on_press(message)
    };

    let mut bar = Row::new()
        .spacing(spacing::MD)
        .align_y(alignment::Vertical::Center)
        .padding(spacing::SM)
        .push(brand)
        .push(tab("navbar-dashboard", Tab::Dashboard, Message::GoDashboard))
        .push(tab("navbar-prediction", Tab::Prediction, Message::GoPrediction))
        .push(Container::new(Text::new("")).width(Length::Fill));

    if let Some(username) = ctx.username {
        bar = bar.push(
            Text::new(
                ctx.i18n
                    .tr_with_args("navbar-signed-in-as", &[("username", username)]),
            )
            .size(typography::BODY_SM),
        );
    }

    bar = bar.push(
        button(Text::new("☰").size(typography::BODY_LG))
            .style(styles::button::quiet)
            .on_press(Message::ToggleMenu),
    );

    let mut column = Column::new().push(
        container(bar)
            .width(Length::Fill)
            .style(styles::container::panel),
    );

    if ctx.menu_open {
        let entry = |label_key: &str, message: Message| {
            button(Text::new(ctx.i18n.tr(label_key)).size(typography::BODY))
                .width(Length::Fill)
                .style(styles::button::quiet)
                .on_press(message)
        };
        let menu = Column::new()
            .spacing(spacing::XXS)
            .push(entry("navbar-settings", Message::OpenSettings))
            .push(entry("navbar-about", Message::OpenAbout))
            .push(entry("navbar-sign-out", Message::SignOut));

        column = column.push(
            container(
                Container::new(menu)
                    .width(Length::Fixed(200.0))
                    .padding(spacing::XS)
                    .style(styles::container::card),
            )
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Right)
            .padding(spacing::XS),
        );
    }

    column.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_menu_state() {
        let mut menu_open = false;
        assert_eq!(update(Message::ToggleMenu, &mut menu_open), Event::None);
        assert!(menu_open);
        update(Message::ToggleMenu, &mut menu_open);
        assert!(!menu_open);
    }

    #[test]
    fn menu_entries_close_the_menu() {
        let mut menu_open = true;
        assert_eq!(
            update(Message::OpenSettings, &mut menu_open),
            Event::OpenSettings
        );
        assert!(!menu_open);
    }

    #[test]
    fn sign_out_propagates() {
        let mut menu_open = true;
        assert_eq!(update(Message::SignOut, &mut menu_open), Event::SignOut);
    }
}
