//! Chat entity <-> model mapper

use woxl_core::{Chat, ChatId};

use crate::models::ChatModel;

impl From<ChatModel> for Chat {
    fn from(model: ChatModel) -> Self {
        Chat {
            id: ChatId::new(model.id),
            created_at: model.created_at,
        }
    }
}
