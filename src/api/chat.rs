// SPDX-License-Identifier: MPL-2.0
//! Assistant endpoint: `POST /api/chatbot/chat/`.

use super::{ApiResult, Client};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatBody<'a> {
    message: &'a str,
}

/// The assistant answers with `reply`, or `error` when intent detection or
/// the upstream model fails. Both are conversation text to the client.
#[derive(Debug, Clone, Deserialize)]
struct ChatReply {
    #[serde(default)]
    reply: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl Client {
    /// Sends one user message and resolves to the assistant's reply text.
    pub async fn chat(&self, message: &str) -> ApiResult<String> {
        let reply: ChatReply = self
            .post_json("/api/chatbot/chat/", &ChatBody { message })
            .await?;
        Ok(reply
            .reply
            .or(reply.error)
            .unwrap_or_else(|| "Sorry, I couldn't understand that. Please try again.".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_field_wins_over_error() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"reply": "Demand peaks at 17:00.", "error": "ignored"}"#)
                .expect("chat reply");
        assert_eq!(
            reply.reply.or(reply.error).as_deref(),
            Some("Demand peaks at 17:00.")
        );
    }

    #[test]
    fn error_only_body_still_yields_text() {
        let reply: ChatReply = serde_json::from_str(r#"{"error": "model offline"}"#)
            .expect("chat error body");
        assert_eq!(reply.reply.or(reply.error).as_deref(), Some("model offline"));
    }
}
