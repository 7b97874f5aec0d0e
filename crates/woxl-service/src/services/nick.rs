//! Nick service

use std::collections::HashMap;

use tracing::{info, instrument};
use validator::Validate;
use woxl_core::{ChatId, Nick, UserId};

use crate::dto::SetNickRequest;

use super::chat::ChatService;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Nickname service
pub struct NickService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NickService<'a> {
    /// Create a new NickService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Set a user's nickname in a chat; the latest write wins
    #[instrument(skip(self, request))]
    pub async fn set(&self, chat_id: ChatId, user_id: UserId, request: SetNickRequest) -> ServiceResult<Nick> {
        request.validate()?;
        ChatService::new(self.ctx).ensure(chat_id).await?;

        let nick = Nick::new(chat_id, user_id, request.nick);
        self.ctx.nick_repo().upsert(&nick).await?;

        info!(chat_id = %chat_id, user_id = %user_id, "Nick set");
        Ok(nick)
    }

    /// A user's nickname, if set
    #[instrument(skip(self))]
    pub async fn get(&self, chat_id: ChatId, user_id: UserId) -> ServiceResult<Option<Nick>> {
        Ok(self.ctx.nick_repo().find(chat_id, user_id).await?)
    }

    /// Nicknames for several users, keyed by user
    #[instrument(skip(self, user_ids), fields(count = user_ids.len()))]
    pub async fn lookup(&self, chat_id: ChatId, user_ids: &[UserId]) -> ServiceResult<HashMap<UserId, String>> {
        let nicks = self.ctx.nick_repo().find_many(chat_id, user_ids).await?;
        Ok(nicks.into_iter().map(|n| (n.user_id, n.nick)).collect())
    }
}
