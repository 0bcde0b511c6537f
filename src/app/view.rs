// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Renders the active screen, layers the assistant chat overlay above it for
//! signed-in users, and puts the toast overlay on top of everything.

use super::{App, Message, Screen};
use crate::ui::about;
use crate::ui::navbar::{self, Tab, ViewContext as NavbarViewContext};
use crate::ui::notifications::Toast;
use iced::widget::{Column, Container, Stack};
use iced::{Element, Length};

/// Renders the current application view based on the active screen.
pub fn view(app: &App) -> Element<'_, Message> {
    let screen: Element<'_, Message> = match app.screen {
        Screen::Auth => app.auth.view(&app.i18n).map(Message::Auth),
        Screen::Dashboard => app.dashboard.view(&app.i18n).map(Message::Dashboard),
        Screen::Prediction => app.prediction.view(&app.i18n).map(Message::Prediction),
        Screen::Settings => app.settings.view(&app.i18n).map(Message::Settings),
        Screen::About => about::view(&app.i18n),
    };

    let base: Element<'_, Message> = if app.screen == Screen::Auth {
        screen
    } else {
        // Navbar above the screen content everywhere but the auth screen.
        let active = match app.screen {
            Screen::Dashboard => Some(Tab::Dashboard),
            Screen::Prediction => Some(Tab::Prediction),
            _ => None,
        };
        let navbar_view = navbar::view(NavbarViewContext {
            i18n: &app.i18n,
            menu_open: app.menu_open,
            username: app.session.username.as_deref(),
            active,
        })
        .map(Message::Navbar);

        Column::new()
            .push(navbar_view)
            .push(
                Container::new(screen)
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .into()
    };

    let mut layers = Stack::new().push(
        Container::new(base)
            .width(Length::Fill)
            .height(Length::Fill),
    );

    // The assistant overlay rides on every authenticated screen.
    if app.session.is_signed_in() && app.screen != Screen::Auth {
        layers = layers.push(app.chat.view(&app.i18n).map(Message::Chat));
    }

    if app.notifications.visible_count() > 0 {
        layers = layers.push(
            Toast::view_overlay(&app.notifications, &app.i18n).map(Message::Notification),
        );
    }

    layers.into()
}
