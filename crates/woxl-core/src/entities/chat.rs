//! Chat entity - root for all per-chat data

use chrono::{DateTime, Utc};

use crate::value_objects::ChatId;

/// A chat the bot has seen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    pub id: ChatId,
    pub created_at: DateTime<Utc>,
}

impl Chat {
    pub fn new(id: ChatId) -> Self {
        Self {
            id,
            created_at: Utc::now(),
        }
    }
}
