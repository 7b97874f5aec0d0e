//! Nick entity - a per-chat display name chosen by the user

use chrono::{DateTime, Utc};

use crate::value_objects::{ChatId, UserId};

/// Maximum nickname length, in characters
pub const MAX_NICK_LEN: usize = 64;

/// Nickname, unique per (chat, user); latest write wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nick {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub nick: String,
    pub updated_at: DateTime<Utc>,
}

impl Nick {
    pub fn new(chat_id: ChatId, user_id: UserId, nick: String) -> Self {
        Self {
            chat_id,
            user_id,
            nick,
            updated_at: Utc::now(),
        }
    }
}
