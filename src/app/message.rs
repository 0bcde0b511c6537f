// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::api::{ApiError, AuthTokens};
use crate::ui::auth;
use crate::ui::chat;
use crate::ui::dashboard;
use crate::ui::navbar;
use crate::ui::notifications;
use crate::ui::prediction;
use crate::ui::settings;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Auth(auth::Message),
    Prediction(prediction::Message),
    Dashboard(dashboard::Message),
    Settings(settings::Message),
    Navbar(navbar::Message),
    Chat(chat::Message),
    Notification(notifications::NotificationMessage),
    /// Result of the sign-in request spawned for the auth screen.
    SignInCompleted {
        username: String,
        result: Result<AuthTokens, ApiError>,
    },
    /// Result of the sign-up request spawned for the auth screen.
    SignUpCompleted(Result<(), ApiError>),
    /// Periodic tick for notification auto-dismiss.
    Tick,
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional backend base URL override.
    /// Takes precedence over the `[api]` section of settings.toml.
    pub api_base_url: Option<String>,
    /// Optional data directory override (for the session file).
    /// Takes precedence over the `PEDALCAST_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over the `PEDALCAST_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
