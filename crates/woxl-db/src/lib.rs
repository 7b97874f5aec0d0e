//! # woxl-db
//!
//! Database layer implementing the `woxl-core` repository traits with
//! PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and schema bootstrap
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use woxl_db::{create_pool, run_migrations, PoolConfig, PgWarnRepository};
//!
//! async fn example(url: String) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::new(url)).await?;
//!     run_migrations(&pool).await?;
//!     let warns = PgWarnRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgChatRepository, PgNickRepository, PgRoleAssignmentRepository, PgWarnRepository,
};
