//! Test fixtures and data generators
//!
//! Provides chats, users and inbound events for integration tests.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use woxl_bot::handlers::ChatDirectory;
use woxl_bot::protocol::{IncomingCallback, IncomingMessage, Sender};
use woxl_bot::telegram::TelegramError;
use woxl_core::{ChatId, UserId};

/// Counter for unique test data
static COUNTER: AtomicI64 = AtomicI64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> i64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Fresh supergroup id
pub fn unique_chat() -> ChatId {
    ChatId::new(-1_000_000_000_000 - unique_suffix())
}

/// Chat member with a display name
pub fn user(id: i64, name: &str) -> Sender {
    Sender::new(id, name)
}

/// Plain text message
pub fn message(chat_id: ChatId, from: &Sender, text: &str) -> IncomingMessage {
    IncomingMessage {
        chat_id,
        message_id: unique_suffix(),
        from: from.clone(),
        text: text.to_string(),
        reply_to: None,
    }
}

/// Text message replying to something `to` wrote
pub fn reply(chat_id: ChatId, from: &Sender, to: &Sender, text: &str) -> IncomingMessage {
    IncomingMessage {
        reply_to: Some(to.clone()),
        ..message(chat_id, from, text)
    }
}

/// Button press on a bot message
pub fn callback(chat_id: ChatId, from: &Sender, message_id: i64, data: &str) -> IncomingCallback {
    IncomingCallback {
        id: format!("cb{}", unique_suffix()),
        chat_id,
        message_id,
        from: from.clone(),
        data: data.to_string(),
    }
}

/// Chat directory answering from fixed data
#[derive(Debug, Clone, Default)]
pub struct FakeDirectory {
    pub creator: Option<UserId>,
    pub fail: bool,
}

impl FakeDirectory {
    pub fn with_creator(id: i64) -> Self {
        Self {
            creator: Some(UserId::new(id)),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            creator: None,
            fail: true,
        }
    }
}

#[async_trait]
impl ChatDirectory for FakeDirectory {
    async fn chat_creator(&self, _chat_id: ChatId) -> Result<Option<UserId>, TelegramError> {
        if self.fail {
            return Err(TelegramError::Api {
                code: Some(403),
                description: "Forbidden: bot is not a member of the chat".to_string(),
            });
        }
        Ok(self.creator)
    }
}
