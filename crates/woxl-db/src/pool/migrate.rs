//! Schema bootstrap
//!
//! The schema is plain SQL with `IF NOT EXISTS` guards, so it is applied on
//! every start.

use sqlx::PgPool;
use tracing::info;

/// Full schema, idempotent
pub const SCHEMA: &str = include_str!("../../migrations/0001_init.sql");

/// Apply the schema to the connected database
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    info!("Database schema is up to date");
    Ok(())
}
