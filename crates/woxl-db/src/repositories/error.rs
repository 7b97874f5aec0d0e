//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use woxl_core::DomainError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for a foreign key violation and return the given error or fallback
pub fn map_fk_violation<F>(e: SqlxError, on_fk: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_fk();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Row counts come back as u64 but LIMIT/OFFSET bind as BIGINT
pub fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
