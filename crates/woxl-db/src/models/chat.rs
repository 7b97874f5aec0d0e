//! Chat database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for chats table
#[derive(Debug, Clone, FromRow)]
pub struct ChatModel {
    pub id: i64,
    pub created_at: DateTime<Utc>,
}
