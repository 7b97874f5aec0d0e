//! Raw HTTP calls to the Telegram Bot API.
//!
//! Wraps reqwest for the handful of methods the bot uses. Every call is a
//! JSON POST whose response is unwrapped from [`ApiResponse`]. Outgoing text
//! is always sent with HTML parse mode.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::types::{
    ApiResponse, BotCommand, ChatMember, InlineKeyboardButton, InlineKeyboardMarkup, SentMessage,
    Update,
};

const PARSE_MODE: &str = "HTML";

/// Telegram transport errors
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telegram API error: {description}")]
    Api {
        code: Option<i64>,
        description: String,
    },

    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

impl TelegramError {
    /// Editing a message to identical content is rejected by Telegram
    pub fn is_not_modified(&self) -> bool {
        matches!(self, Self::Api { description, .. } if description.contains("message is not modified"))
    }
}

/// Low-level Telegram Bot API client.
pub struct TelegramApi {
    client: Client,
    base_url: String,
}

impl TelegramApi {
    /// Create a new API client for the given bot token.
    ///
    /// `poll_timeout` is the long-poll timeout; the HTTP timeout is set
    /// above it so `getUpdates` is never cut short.
    pub fn new(bot_token: &str, poll_timeout: u64) -> Result<Self, TelegramError> {
        Self::with_base_url(bot_token, "https://api.telegram.org", poll_timeout)
    }

    /// Create a new API client with a custom base URL (local Bot API server, tests).
    pub fn with_base_url(
        bot_token: &str,
        base_url: &str,
        poll_timeout: u64,
    ) -> Result<Self, TelegramError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(poll_timeout + 10))
            .build()?;

        Ok(Self {
            client,
            base_url: format!("{}/bot{}", base_url.trim_end_matches('/'), bot_token),
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: &Value) -> Result<T, TelegramError> {
        let resp = self
            .client
            .post(format!("{}/{method}", self.base_url))
            .json(body)
            .send()
            .await?;

        let api_resp: ApiResponse<T> = resp.json().await?;
        match api_resp {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse {
                description,
                error_code,
                ..
            } => Err(TelegramError::Api {
                code: error_code,
                description: description.unwrap_or_else(|| format!("{method} returned no result")),
            }),
        }
    }

    /// Send an HTML message, optionally as a reply, returning its id.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_to: Option<i64>,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<i64, TelegramError> {
        let mut body = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": PARSE_MODE,
            "disable_web_page_preview": true,
        });

        if let Some(message_id) = reply_to {
            body["reply_parameters"] = json!({
                "message_id": message_id,
                "allow_sending_without_reply": true,
            });
        }
        if let Some(markup) = reply_markup {
            body["reply_markup"] = serde_json::to_value(markup)?;
        }

        debug!(chat_id, "sendMessage");
        let sent: SentMessage = self.call("sendMessage", &body).await.inspect_err(|e| {
            warn!(chat_id, error = %e, "sendMessage failed");
        })?;
        Ok(sent.message_id)
    }

    /// Replace the text (and keyboard) of a message the bot sent earlier.
    pub async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<(), TelegramError> {
        let mut body = json!({
            "chat_id": chat_id,
            "message_id": message_id,
            "text": text,
            "parse_mode": PARSE_MODE,
            "disable_web_page_preview": true,
        });

        if let Some(markup) = reply_markup {
            body["reply_markup"] = serde_json::to_value(markup)?;
        }

        debug!(chat_id, message_id, "editMessageText");
        // Result is the edited Message or `true`; neither is needed.
        let _: Value = self.call("editMessageText", &body).await?;
        Ok(())
    }

    /// Long-poll for new updates.
    ///
    /// `offset` should be set to `last_update_id + 1` to acknowledge
    /// previously received updates.
    pub async fn get_updates(&self, offset: Option<i64>, timeout: u64) -> Result<Vec<Update>, TelegramError> {
        let mut body = json!({
            "timeout": timeout,
            "allowed_updates": ["message", "callback_query", "my_chat_member"],
        });

        if let Some(off) = offset {
            body["offset"] = json!(off);
        }

        self.call("getUpdates", &body).await
    }

    /// Acknowledge a callback query (dismisses the loading spinner on the button).
    pub async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<&str>,
    ) -> Result<(), TelegramError> {
        let mut body = json!({
            "callback_query_id": callback_query_id,
        });

        if let Some(t) = text {
            body["text"] = json!(t);
        }

        let _: bool = self.call("answerCallbackQuery", &body).await?;
        Ok(())
    }

    /// Current administrators of a chat, including the creator.
    pub async fn get_chat_administrators(&self, chat_id: i64) -> Result<Vec<ChatMember>, TelegramError> {
        self.call("getChatAdministrators", &json!({ "chat_id": chat_id }))
            .await
    }

    /// Publish the command menu shown by Telegram clients.
    pub async fn set_my_commands(&self, commands: &[BotCommand]) -> Result<(), TelegramError> {
        let body = json!({
            "commands": commands,
            "scope": { "type": "default" },
        });

        let _: bool = self.call("setMyCommands", &body).await?;
        Ok(())
    }
}

impl std::fmt::Debug for TelegramApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // base_url embeds the token
        f.debug_struct("TelegramApi").finish_non_exhaustive()
    }
}

/// Build an `InlineKeyboardMarkup` from button (label, callback_data) pairs.
///
/// Places all buttons on a single row.
pub fn build_keyboard(buttons: &[(String, String)]) -> InlineKeyboardMarkup {
    let row = buttons
        .iter()
        .map(|(text, data)| InlineKeyboardButton {
            text: text.clone(),
            callback_data: data.clone(),
        })
        .collect();

    InlineKeyboardMarkup {
        inline_keyboard: vec![row],
    }
}
