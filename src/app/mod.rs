// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between screens, the API client,
//! and persisted state.
//!
//! The `App` struct wires together the domains (auth, prediction, dashboard,
//! chat, settings) and translates component events into side effects like API
//! calls, config persistence, or session storage. Policy decisions (session
//! gating, window sizing, theme resolution) live close to the main update
//! loop so user-facing behavior is easy to audit.

pub mod config;
mod message;
pub mod paths;
pub mod session;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::api;
use crate::i18n::fluent::I18n;
use crate::ui::auth::State as AuthState;
use crate::ui::chat::State as ChatState;
use crate::ui::dashboard::State as DashboardState;
use crate::ui::notifications;
use crate::ui::notifications::{Notification, Severity};
use crate::ui::prediction::State as PredictionState;
use crate::ui::settings::{State as SettingsState, StateConfig as SettingsConfig};
use crate::ui::theming::ThemeMode;
use iced::{window, Element, Subscription, Task, Theme};
use session::Session;
use std::fmt;

/// Root Iced application state that bridges UI components, localization, and
/// persisted preferences.
pub struct App {
    pub i18n: I18n,
    screen: Screen,
    config: config::Config,
    client: api::Client,
    session: Session,
    auth: AuthState,
    prediction: PredictionState,
    dashboard: DashboardState,
    settings: SettingsState,
    chat: ChatState,
    theme_mode: ThemeMode,
    /// Whether the hamburger menu is open.
    menu_open: bool,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("signed_in", &self.session.is_signed_in())
            .finish()
    }
}

pub const WINDOW_DEFAULT_WIDTH: u32 = 1024;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const MIN_WINDOW_WIDTH: u32 = 800;
pub const MIN_WINDOW_HEIGHT: u32 = 600;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self {
            i18n: I18n::default(),
            screen: Screen::Auth,
            config: config::Config::default(),
            client: api::Client::new(api::DEFAULT_BASE_URL),
            session: Session::default(),
            auth: AuthState::new(),
            prediction: PredictionState::new(),
            dashboard: DashboardState::new(),
            settings: SettingsState::default(),
            chat: ChatState::new(),
            theme_mode: ThemeMode::System,
            menu_open: false,
            notifications: notifications::Manager::new(),
        }
    }
}

impl App {
    /// Initializes application state and, when a stored session exists,
    /// kicks off the dashboard fetches right away.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);

        let base_url = flags
            .api_base_url
            .clone()
            .unwrap_or_else(|| config.api.effective_base_url().to_string());
        let mut client = api::Client::new(base_url.clone());

        let (session, session_warning) = Session::load();
        client.set_access_token(session.access_token().map(str::to_string));

        let mut app = App {
            i18n,
            client,
            theme_mode: config.general.theme_mode,
            settings: SettingsState::new(SettingsConfig {
                theme_mode: config.general.theme_mode,
                base_url,
            }),
            config,
            session,
            ..Self::default()
        };

        if let Some(key) = config_warning {
            app.notifications
                .push(Notification::new(Severity::Warning, key));
        }
        if let Some(key) = session_warning {
            app.notifications
                .push(Notification::new(Severity::Warning, key));
        }

        let task = if app.session.is_signed_in() {
            app.screen = Screen::Dashboard;
            app.dashboard.begin_loading();
            update::fetch_dashboard(&app.client, &app.config.dashboard.city)
        } else {
            Task::none()
        };

        (app, task)
    }

    fn title(&self) -> String {
        self.i18n.tr("app-title")
    }

    fn theme(&self) -> Theme {
        if self.theme_mode.is_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::update(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::subscription(self)
    }
}
