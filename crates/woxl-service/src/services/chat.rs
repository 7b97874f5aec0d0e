//! Chat service
//!
//! Chats are registered lazily before anything is stored against them.

use tracing::{info, instrument};
use woxl_core::ChatId;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Chat registry service
pub struct ChatService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChatService<'a> {
    /// Create a new ChatService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register the chat if it is new
    #[instrument(skip(self))]
    pub async fn ensure(&self, chat_id: ChatId) -> ServiceResult<()> {
        self.ctx.chat_repo().ensure(chat_id).await?;
        Ok(())
    }

    /// Register the chat, logging when it was not known before
    #[instrument(skip(self))]
    pub async fn register(&self, chat_id: ChatId) -> ServiceResult<bool> {
        let known = self.ctx.chat_repo().exists(chat_id).await?;
        if !known {
            self.ctx.chat_repo().ensure(chat_id).await?;
            info!(chat_id = %chat_id, "Chat registered");
        }
        Ok(!known)
    }
}
