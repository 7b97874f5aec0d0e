//! Warn entity <-> model mapper

use woxl_core::{ChatId, UserId, Warn};

use crate::models::WarnModel;

impl From<WarnModel> for Warn {
    fn from(model: WarnModel) -> Self {
        Warn {
            id: model.id,
            chat_id: ChatId::new(model.chat_id),
            user_id: UserId::new(model.user_id),
            issued_by: model.issued_by.map(UserId::new),
            reason: model.reason,
            until: model.until,
            active: model.active,
            created_at: model.created_at,
        }
    }
}
