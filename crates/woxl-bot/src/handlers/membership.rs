//! Bot membership changes
//!
//! When the bot lands in a chat, the chat is registered and its creator
//! becomes the owner (level 5). Nothing is sent to the chat.

use async_trait::async_trait;
use tracing::{info, instrument, warn};
use woxl_core::{ChatId, UserId};
use woxl_service::{ChatService, RoleService, ServiceContext};

use crate::protocol::update::BotMembership;
use crate::telegram::{TelegramApi, TelegramError};

/// Source of chat ownership information
#[async_trait]
pub trait ChatDirectory: Send + Sync {
    /// The chat's creator, if the bot can see one
    async fn chat_creator(&self, chat_id: ChatId) -> Result<Option<UserId>, TelegramError>;
}

#[async_trait]
impl ChatDirectory for TelegramApi {
    async fn chat_creator(&self, chat_id: ChatId) -> Result<Option<UserId>, TelegramError> {
        let admins = self.get_chat_administrators(chat_id.into_inner()).await?;
        Ok(admins
            .iter()
            .find(|member| member.is_creator())
            .map(|member| UserId::new(member.user.id)))
    }
}

/// Register the chat and bootstrap its owner; failures are logged only
#[instrument(skip(ctx, directory), fields(chat_id = %change.chat_id))]
pub async fn on_bot_membership(ctx: &ServiceContext, directory: &dyn ChatDirectory, change: &BotMembership) {
    if !change.present {
        info!("Bot left the chat");
        return;
    }

    if let Err(e) = ChatService::new(ctx).register(change.chat_id).await {
        warn!(error = %e, "Could not register chat");
        return;
    }

    let creator = match directory.chat_creator(change.chat_id).await {
        Ok(Some(creator)) => creator,
        Ok(None) => {
            warn!("Chat has no visible creator, owner not assigned");
            return;
        }
        Err(e) => {
            warn!(error = %e, "Could not get chat administrators");
            return;
        }
    };

    if let Err(e) = RoleService::new(ctx).bootstrap_owner(change.chat_id, creator).await {
        warn!(error = %e, user_id = %creator, "Could not assign chat owner");
    }
}
