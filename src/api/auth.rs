// SPDX-License-Identifier: MPL-2.0
//! Account endpoints: sign-in and sign-up.

use super::{ApiError, ApiResult, Client};
use serde::{Deserialize, Serialize};

/// Token pair returned by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

/// Registration form. Field names match the backend's expected payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignUpForm {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
}

impl SignUpForm {
    /// Client-side validation mirroring the backend's checks, so the common
    /// failures never leave the client. Returns the i18n key of the first
    /// problem found.
    pub fn validate(&self) -> Result<(), &'static str> {
        let all_filled = !self.full_name.trim().is_empty()
            && !self.username.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.password1.is_empty()
            && !self.password2.is_empty();
        if !all_filled {
            return Err("error-form-missing-fields");
        }
        if !self.email.contains('@') {
            return Err("error-form-invalid-email");
        }
        if self.password1 != self.password2 {
            return Err("error-form-password-mismatch");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct SignInBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct SignUpAck {
    #[serde(default)]
    #[allow(dead_code)]
    message: Option<String>,
}

impl Client {
    /// Exchanges credentials for a token pair.
    pub async fn sign_in(&self, username: &str, password: &str) -> ApiResult<AuthTokens> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ApiError::Rejected("All fields are required.".to_string()));
        }
        self.post_json(
            "/api/accounts/signin/",
            &SignInBody { username, password },
        )
        .await
    }

    /// Registers a new account. The caller should run [`SignUpForm::validate`]
    /// first; the backend re-checks everything anyway.
    pub async fn sign_up(&self, form: &SignUpForm) -> ApiResult<()> {
        let _ack: SignUpAck = self.post_json("/api/accounts/signup/", form).await?;
        Ok(())
    }
}
