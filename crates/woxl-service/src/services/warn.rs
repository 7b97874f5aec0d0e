//! Warn service
//!
//! Issuing and revoking need any assigned role; listing is open.

use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;
use woxl_core::{ChatId, DomainError, NewWarn, Page, PageRequest, UserId, Warn};

use crate::dto::IssueWarnRequest;

use super::chat::ChatService;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::permission::PermissionService;

/// Warn service
pub struct WarnService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> WarnService<'a> {
    /// Create a new WarnService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Issue an active warn; expiry is now + duration when one is given
    #[instrument(skip(self, request))]
    pub async fn issue(
        &self,
        chat_id: ChatId,
        actor_id: UserId,
        target_id: UserId,
        request: IssueWarnRequest,
    ) -> ServiceResult<Warn> {
        request.validate()?;
        PermissionService::new(self.ctx)
            .require_any_role(chat_id, actor_id)
            .await?;
        ChatService::new(self.ctx).ensure(chat_id).await?;

        let new_warn = NewWarn::issued_at(
            Utc::now(),
            chat_id,
            target_id,
            actor_id,
            request.reason.clone(),
            request.duration(),
        );
        let warn = self.ctx.warn_repo().create(&new_warn).await?;

        info!(
            chat_id = %chat_id,
            user_id = %target_id,
            warn_id = warn.id,
            until = ?warn.until,
            "Warn issued"
        );
        Ok(warn)
    }

    /// Deactivate all active warns of a user, returning how many changed
    #[instrument(skip(self))]
    pub async fn revoke_active(
        &self,
        chat_id: ChatId,
        actor_id: UserId,
        target_id: UserId,
    ) -> ServiceResult<u64> {
        PermissionService::new(self.ctx)
            .require_any_role(chat_id, actor_id)
            .await?;

        let changed = self
            .ctx
            .warn_repo()
            .deactivate_active(chat_id, target_id)
            .await?;
        if changed == 0 {
            return Err(DomainError::WarnNotFound(target_id).into());
        }

        info!(chat_id = %chat_id, user_id = %target_id, changed, "Warns revoked");
        Ok(changed)
    }

    /// One page of active warns, newest first
    ///
    /// The page is clamped into `1..=last`; an empty chat has one empty page.
    #[instrument(skip(self))]
    pub async fn list_active(&self, chat_id: ChatId, page: u32) -> ServiceResult<Page<Warn>> {
        let total = self.ctx.warn_repo().count_active(chat_id).await?;
        let request = PageRequest::new(page, self.ctx.warns_page_size()).clamp_to(total);

        let items = if total == 0 {
            Vec::new()
        } else {
            self.ctx
                .warn_repo()
                .find_active(chat_id, request.offset(), request.limit())
                .await?
        };

        Ok(Page::new(items, request, total))
    }
}
