//! Role service
//!
//! Grants, revokes and moves role levels. Every mutation is owner-only except
//! the join-time bootstrap, which runs without an acting user.

use tracing::{info, instrument};
use validator::Validate;
use woxl_core::{ChatId, DomainError, RoleAssignment, RoleStep, UserId};

use crate::dto::{AssignRoleRequest, RoleChange, RoleRoster};

use super::chat::ChatService;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::permission::PermissionService;

/// Role service
pub struct RoleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoleService<'a> {
    /// Create a new RoleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Assign a role, overwriting any previous one
    #[instrument(skip(self, request), fields(level = %request.level))]
    pub async fn assign(
        &self,
        chat_id: ChatId,
        actor_id: UserId,
        target_id: UserId,
        request: AssignRoleRequest,
    ) -> ServiceResult<RoleAssignment> {
        request.validate()?;
        PermissionService::new(self.ctx)
            .require_owner(chat_id, actor_id)
            .await?;
        ChatService::new(self.ctx).ensure(chat_id).await?;

        let assignment = RoleAssignment::new(
            chat_id,
            target_id,
            request.level,
            Some(actor_id),
            request.reason,
        );
        self.ctx.role_repo().upsert(&assignment).await?;

        info!(chat_id = %chat_id, user_id = %target_id, level = %assignment.level, "Role assigned");
        Ok(assignment)
    }

    /// Remove a role, returning the assignment that was removed
    #[instrument(skip(self))]
    pub async fn revoke(
        &self,
        chat_id: ChatId,
        actor_id: UserId,
        target_id: UserId,
    ) -> ServiceResult<RoleAssignment> {
        PermissionService::new(self.ctx)
            .require_owner(chat_id, actor_id)
            .await?;

        let removed = self
            .ctx
            .role_repo()
            .delete(chat_id, target_id)
            .await?
            .ok_or(DomainError::RoleNotFound(target_id))?;

        info!(chat_id = %chat_id, user_id = %target_id, level = %removed.level, "Role revoked");
        Ok(removed)
    }

    /// Raise a role by one level
    pub async fn promote(
        &self,
        chat_id: ChatId,
        actor_id: UserId,
        target_id: UserId,
    ) -> ServiceResult<RoleChange> {
        self.step(chat_id, actor_id, target_id, RoleStep::Promote).await
    }

    /// Lower a role by one level
    pub async fn demote(
        &self,
        chat_id: ChatId,
        actor_id: UserId,
        target_id: UserId,
    ) -> ServiceResult<RoleChange> {
        self.step(chat_id, actor_id, target_id, RoleStep::Demote).await
    }

    #[instrument(skip(self))]
    async fn step(
        &self,
        chat_id: ChatId,
        actor_id: UserId,
        target_id: UserId,
        step: RoleStep,
    ) -> ServiceResult<RoleChange> {
        PermissionService::new(self.ctx)
            .require_owner(chat_id, actor_id)
            .await?;

        let (old, new) = self.ctx.role_repo().step(chat_id, target_id, step).await?;

        info!(chat_id = %chat_id, user_id = %target_id, %old, %new, "Role level changed");
        Ok(RoleChange {
            user_id: target_id,
            old,
            new,
        })
    }

    /// Everyone with a role, grouped by level from 5 down to 1
    #[instrument(skip(self))]
    pub async fn list(&self, chat_id: ChatId) -> ServiceResult<RoleRoster> {
        let assignments = self.ctx.role_repo().find_by_chat(chat_id).await?;
        Ok(RoleRoster::from_assignments(assignments))
    }

    /// Make `user_id` the owner of a chat the bot just joined
    #[instrument(skip(self))]
    pub async fn bootstrap_owner(&self, chat_id: ChatId, user_id: UserId) -> ServiceResult<RoleAssignment> {
        ChatService::new(self.ctx).ensure(chat_id).await?;

        let assignment = RoleAssignment::owner(chat_id, user_id);
        self.ctx.role_repo().upsert(&assignment).await?;

        info!(chat_id = %chat_id, user_id = %user_id, "Chat owner bootstrapped");
        Ok(assignment)
    }
}
