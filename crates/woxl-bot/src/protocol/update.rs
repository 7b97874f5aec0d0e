//! Transport-free views of Telegram updates
//!
//! Handlers see only what they act on: chat, message, sender and the replied
//! message's author. Service messages and updates without a sender are
//! dropped during conversion.

use woxl_core::{ChatId, UserId};

use crate::telegram::types::{CallbackQuery, ChatMemberUpdated, Message, User};

/// Author of a message or button press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: UserId,
    /// Telegram display name, used when no nick is set
    pub display_name: String,
}

impl Sender {
    pub fn new(id: i64, display_name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            display_name: display_name.into(),
        }
    }
}

impl From<&User> for Sender {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.full_name())
    }
}

/// Text message addressed to the bot
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub chat_id: ChatId,
    pub message_id: i64,
    pub from: Sender,
    pub text: String,
    pub reply_to: Option<Sender>,
}

impl IncomingMessage {
    /// `None` for messages without text or sender
    pub fn from_telegram(message: &Message) -> Option<Self> {
        let from = message.from.as_ref()?;
        let text = message.text.as_ref()?;

        Some(Self {
            chat_id: ChatId::new(message.chat.id),
            message_id: message.message_id,
            from: Sender::from(from),
            text: text.clone(),
            reply_to: message
                .reply_to_message
                .as_ref()
                .and_then(|reply| reply.from.as_ref())
                .map(Sender::from),
        })
    }

    pub fn has_reply(&self) -> bool {
        self.reply_to.is_some()
    }
}

/// Inline button press on one of the bot's messages
#[derive(Debug, Clone)]
pub struct IncomingCallback {
    pub id: String,
    pub chat_id: ChatId,
    pub message_id: i64,
    pub from: Sender,
    pub data: String,
}

impl IncomingCallback {
    /// `None` when the originating message is unknown (too old) or data is absent
    pub fn from_telegram(query: &CallbackQuery) -> Option<Self> {
        let message = query.message.as_ref()?;
        let data = query.data.as_ref()?;

        Some(Self {
            id: query.id.clone(),
            chat_id: ChatId::new(message.chat.id),
            message_id: message.message_id,
            from: Sender::from(&query.from),
            data: data.clone(),
        })
    }
}

/// The bot's own membership in a chat changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotMembership {
    pub chat_id: ChatId,
    /// Whether the bot can now see the chat
    pub present: bool,
}

impl BotMembership {
    pub fn from_telegram(change: &ChatMemberUpdated) -> Self {
        Self {
            chat_id: ChatId::new(change.chat.id),
            present: change.new_chat_member.is_present(),
        }
    }
}
