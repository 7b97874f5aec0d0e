//! PostgreSQL implementation of RoleAssignmentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use woxl_core::{
    ChatId, DomainError, RepoResult, RoleAssignment, RoleAssignmentRepository, RoleLevel,
    RoleStep, UserId,
};

use crate::models::RoleAssignmentModel;

use super::error::{map_db_error, map_fk_violation};

/// PostgreSQL implementation of RoleAssignmentRepository
#[derive(Clone)]
pub struct PgRoleAssignmentRepository {
    pool: PgPool,
}

impl PgRoleAssignmentRepository {
    /// Create a new PgRoleAssignmentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleAssignmentRepository for PgRoleAssignmentRepository {
    #[instrument(skip(self))]
    async fn find(&self, chat_id: ChatId, user_id: UserId) -> RepoResult<Option<RoleAssignment>> {
        let result = sqlx::query_as::<_, RoleAssignmentModel>(
            r"
            SELECT chat_id, user_id, role_level, assigned_by, reason, assigned_at
            FROM role_assignments
            WHERE chat_id = $1 AND user_id = $2
            ",
        )
        .bind(chat_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(RoleAssignment::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_chat(&self, chat_id: ChatId) -> RepoResult<Vec<RoleAssignment>> {
        let results = sqlx::query_as::<_, RoleAssignmentModel>(
            r"
            SELECT chat_id, user_id, role_level, assigned_by, reason, assigned_at
            FROM role_assignments
            WHERE chat_id = $1
            ORDER BY role_level DESC, assigned_at ASC
            ",
        )
        .bind(chat_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(RoleAssignment::try_from).collect()
    }

    #[instrument(
        skip(self, assignment),
        fields(chat_id = %assignment.chat_id, user_id = %assignment.user_id, level = %assignment.level)
    )]
    async fn upsert(&self, assignment: &RoleAssignment) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO role_assignments (chat_id, user_id, role_level, assigned_by, reason, assigned_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (chat_id, user_id) DO UPDATE SET
                role_level = EXCLUDED.role_level,
                assigned_by = EXCLUDED.assigned_by,
                reason = EXCLUDED.reason,
                assigned_at = EXCLUDED.assigned_at
            ",
        )
        .bind(assignment.chat_id.into_inner())
        .bind(assignment.user_id.into_inner())
        .bind(assignment.level.as_i16())
        .bind(assignment.assigned_by.map(UserId::into_inner))
        .bind(&assignment.reason)
        .bind(assignment.assigned_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_fk_violation(e, || {
                DomainError::ValidationError(format!(
                    "chat {} is not registered",
                    assignment.chat_id
                ))
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, chat_id: ChatId, user_id: UserId) -> RepoResult<Option<RoleAssignment>> {
        let result = sqlx::query_as::<_, RoleAssignmentModel>(
            r"
            DELETE FROM role_assignments
            WHERE chat_id = $1 AND user_id = $2
            RETURNING chat_id, user_id, role_level, assigned_by, reason, assigned_at
            ",
        )
        .bind(chat_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(RoleAssignment::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn step(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        step: RoleStep,
    ) -> RepoResult<(RoleLevel, RoleLevel)> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock the row so concurrent steps on the same user serialize.
        let current = sqlx::query_scalar::<_, i16>(
            r"
            SELECT role_level
            FROM role_assignments
            WHERE chat_id = $1 AND user_id = $2
            FOR UPDATE
            ",
        )
        .bind(chat_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::RoleNotFound(user_id))?;

        let old = RoleLevel::try_from(current)?;
        let new = step.apply(old)?;

        sqlx::query(
            r"
            UPDATE role_assignments
            SET role_level = $3, assigned_at = NOW()
            WHERE chat_id = $1 AND user_id = $2
            ",
        )
        .bind(chat_id.into_inner())
        .bind(user_id.into_inner())
        .bind(new.as_i16())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(old = %old, new = %new, "Role level changed");
        Ok((old, new))
    }
}
