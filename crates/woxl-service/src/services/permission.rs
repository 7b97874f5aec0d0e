//! Permission service
//!
//! Authority is the caller's role level in the chat. Owners (level 5) manage
//! roles; any assigned level may issue and revoke warns.

use tracing::{debug, instrument};
use woxl_core::{ChatId, DomainError, RoleLevel, UserId};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Permission service for access control
pub struct PermissionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PermissionService<'a> {
    /// Create a new PermissionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Current role level of a user, if any
    #[instrument(skip(self))]
    pub async fn level_of(&self, chat_id: ChatId, user_id: UserId) -> ServiceResult<Option<RoleLevel>> {
        let assignment = self.ctx.role_repo().find(chat_id, user_id).await?;
        Ok(assignment.map(|a| a.level))
    }

    /// Fail with `Unauthorized` unless the user holds at least `required`
    #[instrument(skip(self))]
    pub async fn require_level(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        required: RoleLevel,
    ) -> ServiceResult<RoleLevel> {
        match self.level_of(chat_id, user_id).await? {
            Some(level) if level.at_least(required) => Ok(level),
            actual => {
                debug!(?actual, %required, "Permission denied");
                Err(DomainError::Unauthorized { required }.into())
            }
        }
    }

    /// Role management is reserved for the owner
    pub async fn require_owner(&self, chat_id: ChatId, user_id: UserId) -> ServiceResult<()> {
        self.require_level(chat_id, user_id, RoleLevel::Owner).await?;
        Ok(())
    }

    /// Any assigned role
    pub async fn require_any_role(&self, chat_id: ChatId, user_id: UserId) -> ServiceResult<RoleLevel> {
        self.require_level(chat_id, user_id, RoleLevel::MIN).await
    }
}
