//! Replies produced by handlers, delivered by the runtime

use woxl_core::ChatId;

use crate::telegram::types::InlineKeyboardMarkup;

/// Something to show in a chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// New HTML message, optionally replying to `reply_to`
    Send {
        chat_id: ChatId,
        reply_to: Option<i64>,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    },
    /// Replace the text of a message the bot sent
    Edit {
        chat_id: ChatId,
        message_id: i64,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    },
}

impl Outbound {
    /// Plain reply to a message
    pub fn reply(chat_id: ChatId, message_id: i64, text: impl Into<String>) -> Self {
        Self::Send {
            chat_id,
            reply_to: Some(message_id),
            text: text.into(),
            keyboard: None,
        }
    }

    #[must_use]
    pub fn with_keyboard(mut self, markup: InlineKeyboardMarkup) -> Self {
        match &mut self {
            Self::Send { keyboard, .. } | Self::Edit { keyboard, .. } => *keyboard = Some(markup),
        }
        self
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Send { text, .. } | Self::Edit { text, .. } => text,
        }
    }

    pub fn keyboard(&self) -> Option<&InlineKeyboardMarkup> {
        match self {
            Self::Send { keyboard, .. } | Self::Edit { keyboard, .. } => keyboard.as_ref(),
        }
    }
}
