//! Warn entity - a disciplinary record attached to a user within a chat
//!
//! Warns are never deleted. Revoking flips `active` to false, and an expired
//! warn stays active; only the remaining-time display changes.

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::{ChatId, Remaining, UserId};

/// Stored warn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warn {
    pub id: i64,
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub issued_by: Option<UserId>,
    pub reason: Option<String>,
    /// Expiry; `None` means the warn never expires
    pub until: Option<DateTime<Utc>>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Warn {
    /// Time left relative to `now`
    pub fn remaining(&self, now: DateTime<Utc>) -> Remaining {
        Remaining::until(self.until, now)
    }

    /// Whether the expiry has passed; says nothing about `active`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.remaining(now), Remaining::Expired)
    }
}

/// Warn about to be stored (id assigned by the repository)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWarn {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub issued_by: Option<UserId>,
    pub reason: Option<String>,
    pub until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl NewWarn {
    /// Build a warn issued at `now`; expiry is `now + duration` when given
    pub fn issued_at(
        now: DateTime<Utc>,
        chat_id: ChatId,
        user_id: UserId,
        issued_by: UserId,
        reason: Option<String>,
        duration: Option<Duration>,
    ) -> Self {
        Self {
            chat_id,
            user_id,
            issued_by: Some(issued_by),
            reason,
            until: duration.and_then(|d| now.checked_add_signed(d)),
            created_at: now,
        }
    }

    /// Attach the repository-assigned id
    pub fn into_warn(self, id: i64) -> Warn {
        Warn {
            id,
            chat_id: self.chat_id,
            user_id: self.user_id,
            issued_by: self.issued_by,
            reason: self.reason,
            until: self.until,
            active: true,
            created_at: self.created_at,
        }
    }
}
