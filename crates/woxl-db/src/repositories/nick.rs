//! PostgreSQL implementation of NickRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use woxl_core::{ChatId, DomainError, Nick, NickRepository, RepoResult, UserId};

use crate::models::NickModel;

use super::error::{map_db_error, map_fk_violation};

/// PostgreSQL implementation of NickRepository
#[derive(Clone)]
pub struct PgNickRepository {
    pool: PgPool,
}

impl PgNickRepository {
    /// Create a new PgNickRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NickRepository for PgNickRepository {
    #[instrument(skip(self))]
    async fn find(&self, chat_id: ChatId, user_id: UserId) -> RepoResult<Option<Nick>> {
        let result = sqlx::query_as::<_, NickModel>(
            r"
            SELECT chat_id, user_id, nick, updated_at
            FROM nicks
            WHERE chat_id = $1 AND user_id = $2
            ",
        )
        .bind(chat_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Nick::from))
    }

    #[instrument(skip(self, user_ids), fields(count = user_ids.len()))]
    async fn find_many(&self, chat_id: ChatId, user_ids: &[UserId]) -> RepoResult<Vec<Nick>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = user_ids.iter().map(|id| id.into_inner()).collect();
        let results = sqlx::query_as::<_, NickModel>(
            r"
            SELECT chat_id, user_id, nick, updated_at
            FROM nicks
            WHERE chat_id = $1 AND user_id = ANY($2)
            ",
        )
        .bind(chat_id.into_inner())
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Nick::from).collect())
    }

    #[instrument(skip(self, nick), fields(chat_id = %nick.chat_id, user_id = %nick.user_id))]
    async fn upsert(&self, nick: &Nick) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO nicks (chat_id, user_id, nick, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (chat_id, user_id)
            DO UPDATE SET nick = EXCLUDED.nick, updated_at = EXCLUDED.updated_at
            ",
        )
        .bind(nick.chat_id.into_inner())
        .bind(nick.user_id.into_inner())
        .bind(&nick.nick)
        .bind(nick.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_fk_violation(e, || {
                DomainError::ValidationError(format!("chat {} is not registered", nick.chat_id))
            })
        })?;

        Ok(())
    }
}
