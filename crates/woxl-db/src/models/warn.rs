//! Warn database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for warns table
#[derive(Debug, Clone, FromRow)]
pub struct WarnModel {
    pub id: i64,
    pub chat_id: i64,
    pub user_id: i64,
    pub issued_by: Option<i64>,
    pub reason: Option<String>,
    pub until: Option<DateTime<Utc>>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
