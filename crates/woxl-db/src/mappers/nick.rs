//! Nick entity <-> model mapper

use woxl_core::{ChatId, Nick, UserId};

use crate::models::NickModel;

impl From<NickModel> for Nick {
    fn from(model: NickModel) -> Self {
        Nick {
            chat_id: ChatId::new(model.chat_id),
            user_id: UserId::new(model.user_id),
            nick: model.nick,
            updated_at: model.updated_at,
        }
    }
}
