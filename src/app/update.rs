// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! This module contains the main `update` function and the specialized
//! handlers for each part of the application. Component updates return
//! events; the side effects those events ask for (API calls, persistence)
//! are performed here so they stay in one auditable place.

use super::session::Session;
use super::{config, App, Message, Screen};
use crate::api;
use crate::ui::auth::{self, Event as AuthEvent};
use crate::ui::chat::{self, Event as ChatEvent};
use crate::ui::dashboard::{self, Event as DashboardEvent};
use crate::ui::navbar::{self, Event as NavbarEvent};
use crate::ui::notifications::{Notification, Severity};
use crate::ui::prediction::{self, Event as PredictionEvent};
use crate::ui::settings::{self, Event as SettingsEvent};
use iced::Task;

/// Fetches both dashboard documents concurrently.
pub fn fetch_dashboard(client: &api::Client, city: &str) -> Task<Message> {
    let now = chrono::Local::now();
    let date = now.format("%Y-%m-%d").to_string();
    let hour = chrono::Timelike::hour(&now) as u8;

    let overview_client = client.clone();
    let overview_city = city.to_string();
    let overview = Task::perform(
        async move { overview_client.overview(&overview_city, &date, hour).await },
        |result| Message::Dashboard(dashboard::Message::OverviewLoaded(result)),
    );

    let insights_client = client.clone();
    let insights = Task::perform(
        async move { insights_client.insights().await },
        |result| Message::Dashboard(dashboard::Message::InsightsLoaded(result)),
    );

    Task::batch([overview, insights])
}

pub fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Auth(message) => handle_auth(app, message),
        Message::SignInCompleted { username, result } => {
            handle_sign_in_completed(app, username, result)
        }
        Message::SignUpCompleted(result) => handle_sign_up_completed(app, result),
        Message::Prediction(message) => handle_prediction(app, message),
        Message::Dashboard(message) => handle_dashboard(app, message),
        Message::Settings(message) => handle_settings(app, message),
        Message::Navbar(message) => handle_navbar(app, message),
        Message::Chat(message) => handle_chat(app, message),
        Message::Notification(message) => {
            app.notifications.handle_message(&message);
            Task::none()
        }
        Message::Tick => {
            app.notifications.tick();
            Task::none()
        }
    }
}

fn handle_auth(app: &mut App, message: auth::Message) -> Task<Message> {
    match app.auth.update(message) {
        AuthEvent::None => Task::none(),
        AuthEvent::SignIn { username, password } => {
            let client = app.client.clone();
            let task_username = username.clone();
            Task::perform(
                async move { client.sign_in(&task_username, &password).await },
                move |result| Message::SignInCompleted {
                    username: username.clone(),
                    result,
                },
            )
        }
        AuthEvent::SignUp(form) => {
            let client = app.client.clone();
            Task::perform(
                async move { client.sign_up(&form).await },
                Message::SignUpCompleted,
            )
        }
    }
}

fn handle_sign_in_completed(
    app: &mut App,
    username: String,
    result: Result<api::AuthTokens, api::ApiError>,
) -> Task<Message> {
    match result {
        Ok(tokens) => {
            app.client
                .set_access_token(Some(tokens.access.clone()));
            app.session = Session::signed_in(username, tokens);
            if let Some(key) = app.session.save() {
                app.notifications
                    .push(Notification::new(Severity::Warning, key));
            }
            app.screen = Screen::Dashboard;
            app.dashboard.begin_loading();
            fetch_dashboard(&app.client, &app.config.dashboard.city)
        }
        Err(error) => {
            app.auth.update(auth::Message::Failed(error));
            Task::none()
        }
    }
}

fn handle_sign_up_completed(
    app: &mut App,
    result: Result<(), api::ApiError>,
) -> Task<Message> {
    match result {
        Ok(()) => {
            app.auth.update(auth::Message::SignUpSucceeded);
            app.notifications.push(Notification::new(
                Severity::Success,
                "notification-sign-up-success",
            ));
        }
        Err(error) => {
            app.auth.update(auth::Message::Failed(error));
        }
    }
    Task::none()
}

fn handle_prediction(app: &mut App, message: prediction::Message) -> Task<Message> {
    match app.prediction.update(message) {
        PredictionEvent::None => Task::none(),
        PredictionEvent::Predict(request) => {
            let client = app.client.clone();
            Task::perform(
                async move { client.predict(&request).await },
                |result| Message::Prediction(prediction::Message::Completed(result)),
            )
        }
    }
}

fn handle_dashboard(app: &mut App, message: dashboard::Message) -> Task<Message> {
    match app.dashboard.update(message) {
        DashboardEvent::None => Task::none(),
        DashboardEvent::Refresh => {
            app.dashboard.begin_loading();
            fetch_dashboard(&app.client, &app.config.dashboard.city)
        }
    }
}

fn handle_settings(app: &mut App, message: settings::Message) -> Task<Message> {
    match app.settings.update(message) {
        SettingsEvent::None => {}
        SettingsEvent::LocaleSelected(locale) => {
            app.i18n.set_locale(locale.clone());
            app.config.general.language = Some(locale.to_string());
            save_config(app);
        }
        SettingsEvent::ThemePicked(mode) => {
            app.theme_mode = mode;
            app.config.general.theme_mode = mode;
            save_config(app);
        }
        SettingsEvent::BaseUrlApplied(url) => {
            app.client.set_base_url(url.clone());
            app.config.api.base_url = Some(url);
            save_config(app);
        }
    }
    Task::none()
}

fn save_config(app: &mut App) {
    if config::save(&app.config).is_err() {
        app.notifications.push(Notification::new(
            Severity::Warning,
            "notification-config-save-error",
        ));
    }
}

fn handle_navbar(app: &mut App, message: navbar::Message) -> Task<Message> {
    let event = navbar::update(message, &mut app.menu_open);
    let target = match event {
        NavbarEvent::None => return Task::none(),
        NavbarEvent::GoDashboard => Screen::Dashboard,
        NavbarEvent::GoPrediction => Screen::Prediction,
        NavbarEvent::OpenSettings => Screen::Settings,
        NavbarEvent::OpenAbout => Screen::About,
        NavbarEvent::SignOut => return sign_out(app),
    };
    navigate(app, target)
}

/// Session-gated navigation: unauthenticated users land on the auth screen.
fn navigate(app: &mut App, target: Screen) -> Task<Message> {
    if target.requires_session() && !app.session.is_signed_in() {
        app.screen = Screen::Auth;
        return Task::none();
    }

    let entering_dashboard = target == Screen::Dashboard && app.screen != Screen::Dashboard;
    app.screen = target;

    if entering_dashboard {
        app.dashboard.begin_loading();
        return fetch_dashboard(&app.client, &app.config.dashboard.city);
    }
    Task::none()
}

fn sign_out(app: &mut App) -> Task<Message> {
    if let Some(key) = Session::clear() {
        app.notifications
            .push(Notification::new(Severity::Warning, key));
    }
    app.session = Session::default();
    app.client.set_access_token(None);
    // The overlay belongs to the authenticated surface; drop it with the
    // session (this also releases any live drag session).
    app.chat.update(chat::Message::Close);
    app.screen = Screen::Auth;
    app.notifications.push(Notification::new(
        Severity::Success,
        "notification-signed-out",
    ));
    Task::none()
}

fn handle_chat(app: &mut App, message: chat::Message) -> Task<Message> {
    match app.chat.update(message) {
        ChatEvent::None => Task::none(),
        ChatEvent::Send(text) => {
            let client = app.client.clone();
            Task::perform(
                async move { client.chat(&text).await },
                |result| Message::Chat(chat::Message::ReplyReceived(result)),
            )
        }
    }
}
