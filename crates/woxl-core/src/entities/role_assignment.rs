//! Role assignment entity - a user's role level within one chat

use chrono::{DateTime, Utc};

use crate::value_objects::{ChatId, RoleLevel, UserId};

/// Role assignment, unique per (chat, user)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub level: RoleLevel,
    /// Who granted the role (`None` for the join-time owner bootstrap)
    pub assigned_by: Option<UserId>,
    pub reason: Option<String>,
    pub assigned_at: DateTime<Utc>,
}

impl RoleAssignment {
    /// Create a new RoleAssignment stamped with the current time
    pub fn new(
        chat_id: ChatId,
        user_id: UserId,
        level: RoleLevel,
        assigned_by: Option<UserId>,
        reason: Option<String>,
    ) -> Self {
        Self {
            chat_id,
            user_id,
            level,
            assigned_by,
            reason,
            assigned_at: Utc::now(),
        }
    }

    /// Owner assignment created when the bot joins a chat
    pub fn owner(chat_id: ChatId, user_id: UserId) -> Self {
        Self::new(chat_id, user_id, RoleLevel::Owner, None, None)
    }

    #[inline]
    pub fn is_owner(&self) -> bool {
        self.level.is_owner()
    }

    /// Change the level, refreshing the timestamp
    pub fn set_level(&mut self, level: RoleLevel) {
        self.level = level;
        self.assigned_at = Utc::now();
    }
}
