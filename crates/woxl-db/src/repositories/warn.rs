//! PostgreSQL implementation of WarnRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use woxl_core::{ChatId, DomainError, NewWarn, RepoResult, UserId, Warn, WarnRepository};

use crate::models::WarnModel;

use super::error::{map_db_error, map_fk_violation, to_i64};

/// PostgreSQL implementation of WarnRepository
#[derive(Clone)]
pub struct PgWarnRepository {
    pool: PgPool,
}

impl PgWarnRepository {
    /// Create a new PgWarnRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WarnRepository for PgWarnRepository {
    #[instrument(skip(self, warn), fields(chat_id = %warn.chat_id, user_id = %warn.user_id))]
    async fn create(&self, warn: &NewWarn) -> RepoResult<Warn> {
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO warns (chat_id, user_id, issued_by, reason, until, active, created_at)
            VALUES ($1, $2, $3, $4, $5, TRUE, $6)
            RETURNING id
            ",
        )
        .bind(warn.chat_id.into_inner())
        .bind(warn.user_id.into_inner())
        .bind(warn.issued_by.map(UserId::into_inner))
        .bind(&warn.reason)
        .bind(warn.until)
        .bind(warn.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_fk_violation(e, || {
                DomainError::ValidationError(format!("chat {} is not registered", warn.chat_id))
            })
        })?;

        Ok(warn.clone().into_warn(id))
    }

    #[instrument(skip(self))]
    async fn count_active(&self, chat_id: ChatId) -> RepoResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM warns WHERE chat_id = $1 AND active
            ",
        )
        .bind(chat_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    #[instrument(skip(self))]
    async fn find_active(&self, chat_id: ChatId, offset: u64, limit: u64) -> RepoResult<Vec<Warn>> {
        let results = sqlx::query_as::<_, WarnModel>(
            r"
            SELECT id, chat_id, user_id, issued_by, reason, until, active, created_at
            FROM warns
            WHERE chat_id = $1 AND active
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(chat_id.into_inner())
        .bind(to_i64(limit))
        .bind(to_i64(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Warn::from).collect())
    }

    #[instrument(skip(self))]
    async fn deactivate_active(&self, chat_id: ChatId, user_id: UserId) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE warns SET active = FALSE
            WHERE chat_id = $1 AND user_id = $2 AND active
            ",
        )
        .bind(chat_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
