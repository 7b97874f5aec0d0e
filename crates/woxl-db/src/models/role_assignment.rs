//! Role assignment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for role_assignments table
#[derive(Debug, Clone, FromRow)]
pub struct RoleAssignmentModel {
    pub chat_id: i64,
    pub user_id: i64,
    pub role_level: i16,
    pub assigned_by: Option<i64>,
    pub reason: Option<String>,
    pub assigned_at: DateTime<Utc>,
}
