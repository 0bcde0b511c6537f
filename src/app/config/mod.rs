// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[api]` - Backend endpoint
//! - `[dashboard]` - Overview defaults (city)
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable
//! deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. Set the `PEDALCAST_CONFIG_DIR` environment variable
//! 3. Falls back to the platform-specific config directory

pub mod defaults;

pub use defaults::*;

use crate::api;
use crate::app::paths;
use crate::error::Result;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Backend endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the prediction service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: None }
    }
}

impl ApiConfig {
    /// Effective base URL, falling back to the built-in default.
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(api::DEFAULT_BASE_URL)
    }
}

/// Dashboard settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    /// City the overview is requested for.
    #[serde(default = "default_city")]
    pub city: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
        }
    }
}

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_city() -> String {
    DEFAULT_CITY.to_string()
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(_) => {
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_sections() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
                theme_mode: ThemeMode::Dark,
            },
            api: ApiConfig {
                base_url: Some("https://api.example.com".to_string()),
            },
            dashboard: DashboardConfig {
                city: "Lyon".to_string(),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[general]\nlanguage = \"en-US\"\n")
            .expect("failed to write partial config");

        let loaded = load_from_path(&config_path).expect("load partial config");
        assert_eq!(loaded.general.language.as_deref(), Some("en-US"));
        assert_eq!(loaded.api.effective_base_url(), api::DEFAULT_BASE_URL);
        assert_eq!(loaded.dashboard.city, DEFAULT_CITY);
    }

    #[test]
    fn invalid_toml_yields_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn unknown_theme_mode_is_rejected() {
        let result: std::result::Result<Config, _> =
            toml::from_str("[general]\ntheme_mode = \"sepia\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn default_config_uses_builtin_endpoint() {
        let config = Config::default();
        assert_eq!(config.api.effective_base_url(), api::DEFAULT_BASE_URL);
    }
}
