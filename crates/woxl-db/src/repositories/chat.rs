//! PostgreSQL implementation of ChatRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use woxl_core::{ChatId, ChatRepository, RepoResult};

use super::error::map_db_error;

/// PostgreSQL implementation of ChatRepository
#[derive(Clone)]
pub struct PgChatRepository {
    pool: PgPool,
}

impl PgChatRepository {
    /// Create a new PgChatRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRepository for PgChatRepository {
    #[instrument(skip(self))]
    async fn ensure(&self, id: ChatId) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO chats (id) VALUES ($1)
            ON CONFLICT (id) DO NOTHING
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: ChatId) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM chats WHERE id = $1)
            ",
        )
        .bind(id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }
}
