//! Nick database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for nicks table
#[derive(Debug, Clone, FromRow)]
pub struct NickModel {
    pub chat_id: i64,
    pub user_id: i64,
    pub nick: String,
    pub updated_at: DateTime<Utc>,
}
