// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the Pedalcast backend.
//!
//! All prediction, analytics, and assistant computation lives in a remote
//! service; this module is the client's only gateway to it. Submodules group
//! the endpoint surfaces: accounts, predictions, insights, and the assistant.

pub mod auth;
pub mod chat;
pub mod insights;
pub mod prediction;

pub use auth::{AuthTokens, SignUpForm};
pub use insights::Insights;
pub use prediction::{Overview, PredictionRequest, PredictionResponse};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Default backend base URL, overridable via config or `--api-base-url`.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never reached the backend (DNS, refused, timeout).
    Network(String),
    /// The backend rejected the request with an explanation
    /// (the `{"error": ...}` body its views return).
    Rejected(String),
    /// Non-success status with no parseable explanation.
    Status(u16),
    /// The response body did not match the expected shape.
    Decode(String),
}

impl ApiError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "error-api-network",
            ApiError::Rejected(_) => "error-api-rejected",
            ApiError::Status(_) => "error-api-status",
            ApiError::Decode(_) => "error-api-decode",
        }
    }

    /// Detail string suitable for the collapsible section of an error display.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Network(msg) | ApiError::Rejected(msg) | ApiError::Decode(msg) => {
                msg.clone()
            }
            ApiError::Status(code) => format!("HTTP {code}"),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {msg}"),
            ApiError::Rejected(msg) => write!(f, "Request rejected: {msg}"),
            ApiError::Status(code) => write!(f, "Unexpected status: {code}"),
            ApiError::Decode(msg) => write!(f, "Malformed response: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Shape of the backend's error bodies.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    error: String,
}

/// Cloneable handle to the backend. Wraps a shared `reqwest::Client`, the
/// resolved base URL, and the access token of the signed-in session (if any).
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: normalize_base_url(base_url.into()),
            access_token: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replaces the base URL (settings screen edit). The token is kept: the
    /// user is switching deployments of the same service, not accounts.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = normalize_base_url(base_url.into());
    }

    pub fn set_access_token(&mut self, token: Option<String>) {
        self.access_token = token;
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let mut request = self.http.get(self.url(path)).query(query);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode_response(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let mut request = self.http.post(self.url(path)).json(body);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode_response(response).await
    }
}

/// Strips a trailing slash so `url()` can join with absolute paths.
fn normalize_base_url(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}

async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !status.is_success() {
        // The backend reports failures as `{"error": "..."}` bodies.
        if let Ok(body) = serde_json::from_slice::<ErrorBody>(&bytes) {
            return Err(ApiError::Rejected(body.error));
        }
        return Err(ApiError::Status(status.as_u16()));
    }

    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let client = Client::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/predict"), "http://localhost:8000/predict");
    }

    #[test]
    fn set_base_url_keeps_access_token() {
        let mut client = Client::new(DEFAULT_BASE_URL);
        client.set_access_token(Some("tok".to_string()));
        client.set_base_url("https://api.example.com");
        assert!(client.has_access_token());
        assert_eq!(client.base_url(), "https://api.example.com");
    }

    #[test]
    fn i18n_keys_are_distinct_per_variant() {
        let keys = [
            ApiError::Network(String::new()).i18n_key(),
            ApiError::Rejected(String::new()).i18n_key(),
            ApiError::Status(500).i18n_key(),
            ApiError::Decode(String::new()).i18n_key(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn status_detail_mentions_code() {
        assert_eq!(ApiError::Status(404).detail(), "HTTP 404");
    }
}
