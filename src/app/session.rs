// SPDX-License-Identifier: MPL-2.0
//! Signed-in session persistence using CBOR format.
//!
//! The session (username plus token pair) survives restarts so the user is
//! not asked to sign in every launch. It is stored in CBOR for compact
//! binary storage and clear separation from the user-editable TOML
//! preferences.
//!
//! # Path Resolution
//!
//! The session file location can be customized for testing or portable
//! deployments:
//! 1. Use `load_from()`/`save_to()` with an explicit path override
//! 2. Set the `PEDALCAST_DATA_DIR` environment variable
//! 3. Falls back to the platform-specific data directory

use super::paths;
use crate::api::AuthTokens;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// Session file name within the app data directory.
const SESSION_FILE: &str = "session.cbor";

/// A signed-in account session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Account name shown in the navbar.
    #[serde(default)]
    pub username: Option<String>,

    /// Token pair from the last successful sign-in.
    #[serde(default)]
    pub tokens: Option<AuthTokens>,
}

impl Session {
    pub fn signed_in(username: String, tokens: AuthTokens) -> Self {
        Self {
            username: Some(username),
            tokens: Some(tokens),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.tokens.is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.access.as_str())
    }

    /// Loads the session from the default location.
    ///
    /// Returns a tuple of (session, optional_warning). A missing file is an
    /// ordinary signed-out start; a corrupt one loads as signed-out with a
    /// warning key the caller can surface as a notification.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    /// Loads the session from a custom directory.
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::session_file_path_with_override(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        match fs::File::open(&path) {
            Ok(file) => {
                let reader = BufReader::new(file);
                match ciborium::from_reader(reader) {
                    Ok(session) => (session, None),
                    Err(_) => (
                        Self::default(),
                        Some("notification-session-parse-error".to_string()),
                    ),
                }
            }
            Err(_) => (
                Self::default(),
                Some("notification-session-read-error".to_string()),
            ),
        }
    }

    /// Saves the session to the default location.
    ///
    /// Creates the parent directory if it doesn't exist.
    /// Returns an optional warning key if the save failed.
    pub fn save(&self) -> Option<String> {
        self.save_to(None)
    }

    /// Saves the session to a custom directory.
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = Self::session_file_path_with_override(base_dir) else {
            return Some("notification-session-path-error".to_string());
        };

        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return Some("notification-session-dir-error".to_string());
            }
        }

        match fs::File::create(&path) {
            Ok(file) => {
                let writer = BufWriter::new(file);
                if ciborium::into_writer(self, writer).is_err() {
                    return Some("notification-session-write-error".to_string());
                }
                None
            }
            Err(_) => Some("notification-session-create-error".to_string()),
        }
    }

    /// Deletes the session file (sign-out). Missing files are fine.
    pub fn clear() -> Option<String> {
        Self::clear_in(None)
    }

    /// Deletes the session file in a custom directory.
    pub fn clear_in(base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = Self::session_file_path_with_override(base_dir) else {
            return None;
        };
        if path.exists() && fs::remove_file(&path).is_err() {
            return Some("notification-session-clear-error".to_string());
        }
        None
    }

    fn session_file_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(SESSION_FILE);
            path
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens() -> AuthTokens {
        AuthTokens {
            access: "access-token".to_string(),
            refresh: "refresh-token".to_string(),
        }
    }

    #[test]
    fn default_session_is_signed_out() {
        let session = Session::default();
        assert!(!session.is_signed_in());
        assert!(session.access_token().is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let temp_dir = tempdir().expect("temp dir");
        let session = Session::signed_in("ada".to_string(), tokens());

        let warning = session.save_to(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none());

        let (loaded, warning) = Session::load_from(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none());
        assert_eq!(loaded, session);
        assert_eq!(loaded.access_token(), Some("access-token"));
    }

    #[test]
    fn missing_file_loads_signed_out_without_warning() {
        let temp_dir = tempdir().expect("temp dir");
        let (session, warning) = Session::load_from(Some(temp_dir.path().to_path_buf()));
        assert!(!session.is_signed_in());
        assert!(warning.is_none());
    }

    #[test]
    fn corrupt_file_loads_signed_out_with_warning() {
        let temp_dir = tempdir().expect("temp dir");
        fs::write(temp_dir.path().join(SESSION_FILE), b"definitely not cbor")
            .expect("write corrupt file");

        let (session, warning) = Session::load_from(Some(temp_dir.path().to_path_buf()));
        assert!(!session.is_signed_in());
        assert_eq!(
            warning.as_deref(),
            Some("notification-session-parse-error")
        );
    }

    #[test]
    fn clear_removes_saved_session() {
        let temp_dir = tempdir().expect("temp dir");
        let session = Session::signed_in("ada".to_string(), tokens());
        session.save_to(Some(temp_dir.path().to_path_buf()));

        assert!(Session::clear_in(Some(temp_dir.path().to_path_buf())).is_none());

        let (loaded, _) = Session::load_from(Some(temp_dir.path().to_path_buf()));
        assert!(!loaded.is_signed_in());
    }

    #[test]
    fn clear_on_missing_file_is_fine() {
        let temp_dir = tempdir().expect("temp dir");
        assert!(Session::clear_in(Some(temp_dir.path().to_path_buf())).is_none());
    }
}
