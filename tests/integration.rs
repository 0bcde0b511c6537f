// SPDX-License-Identifier: MPL-2.0
use pedalcast::api::AuthTokens;
use pedalcast::app::config::{self, Config};
use pedalcast::app::session::Session;
use pedalcast::i18n::fluent::I18n;
use pedalcast::ui::theming::ThemeMode;
use tempfile::tempdir;

#[test]
fn language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let temp_config_file_path = dir.path().join("settings.toml");

    // 1. Initial config: en-US
    let mut initial_config = Config::default();
    initial_config.general.language = Some("en-US".to_string());
    config::save_to_path(&initial_config, &temp_config_file_path)
        .expect("Failed to write initial config file");

    let loaded_initial_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load initial config from path");
    let i18n_en = I18n::new(None, &loaded_initial_config);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");

    // 2. Change config to fr
    let mut french_config = Config::default();
    french_config.general.language = Some("fr".to_string());
    config::save_to_path(&french_config, &temp_config_file_path)
        .expect("Failed to write french config file");

    let loaded_french_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load french config from path");
    let i18n_fr = I18n::new(None, &loaded_french_config);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn cli_lang_overrides_config() {
    let mut config = Config::default();
    config.general.language = Some("fr".to_string());
    let i18n = I18n::new(Some("en-US".to_string()), &config);
    assert_eq!(i18n.current_locale().to_string(), "en-US");
}

#[test]
fn every_locale_translates_core_keys() {
    let mut i18n = I18n::default();
    let locales = i18n.available_locales.clone();
    for locale in locales {
        i18n.set_locale(locale.clone());
        for key in [
            "app-title",
            "auth-sign-in-title",
            "prediction-title",
            "dashboard-title",
            "chat-title",
            "error-api-network",
        ] {
            let translated = i18n.tr(key);
            assert!(
                !translated.starts_with("MISSING:"),
                "locale {locale} is missing {key}"
            );
        }
    }
}

#[test]
fn config_and_session_live_side_by_side() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let base = dir.path().to_path_buf();

    // Preferences in TOML...
    let mut prefs = Config::default();
    prefs.general.theme_mode = ThemeMode::Dark;
    prefs.api.base_url = Some("https://api.example.com".to_string());
    config::save_with_override(&prefs, Some(base.clone())).expect("save config");

    // ...session in CBOR, in the same directory tree.
    let session = Session::signed_in(
        "ada".to_string(),
        AuthTokens {
            access: "a".to_string(),
            refresh: "r".to_string(),
        },
    );
    assert!(session.save_to(Some(base.clone())).is_none());

    let (loaded_config, warning) = config::load_with_override(Some(base.clone()));
    assert!(warning.is_none());
    assert_eq!(loaded_config, prefs);

    let (loaded_session, warning) = Session::load_from(Some(base.clone()));
    assert!(warning.is_none());
    assert!(loaded_session.is_signed_in());
    assert_eq!(loaded_session.username.as_deref(), Some("ada"));

    // Sign-out removes only the session.
    assert!(Session::clear_in(Some(base.clone())).is_none());
    let (after, _) = Session::load_from(Some(base.clone()));
    assert!(!after.is_signed_in());
    let (config_still_there, _) = config::load_with_override(Some(base));
    assert_eq!(config_still_there, prefs);
}
