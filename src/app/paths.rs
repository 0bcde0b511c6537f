// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for application directories.
//!
//! Paths are resolved in the following priority order:
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI arguments** (`--data-dir`, `--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`PEDALCAST_DATA_DIR`, `PEDALCAST_CONFIG_DIR`)
//! 4. **Platform default** - via the `dirs` crate
//!
//! CLI overrides should be initialized once at startup, before any path
//! resolution function is called.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "Pedalcast";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "PEDALCAST_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "PEDALCAST_CONFIG_DIR";

/// Global CLI override for data directory (set once at startup).
static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Global CLI override for config directory (set once at startup).
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Initializes CLI overrides for data and config directories.
///
/// # Panics
///
/// Panics if called more than once (OnceLock can only be set once).
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) {
    CLI_DATA_DIR
        .set(data_dir.map(PathBuf::from))
        .expect("CLI data dir override already initialized");
    CLI_CONFIG_DIR
        .set(config_dir.map(PathBuf::from))
        .expect("CLI config dir override already initialized");
}

fn get_cli_data_dir() -> Option<PathBuf> {
    CLI_DATA_DIR.get().and_then(Clone::clone)
}

fn get_cli_config_dir() -> Option<PathBuf> {
    CLI_CONFIG_DIR.get().and_then(Clone::clone)
}

/// Returns the application data directory path (session state, not
/// user preferences).
///
/// Returns `None` if the data directory cannot be determined.
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

/// Returns the application data directory path with an optional override.
/// The explicit override has highest priority because it is the most
/// specific; tests pass a temp dir here.
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }
    if let Some(path) = get_cli_data_dir() {
        return Some(path);
    }
    if let Ok(env_path) = std::env::var(ENV_DATA_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }
    dirs::data_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the application config directory path (settings.toml).
///
/// Returns `None` if the config directory cannot be determined.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the application config directory path with an optional override.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }
    if let Some(path) = get_cli_config_dir() {
        return Some(path);
    }
    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}
