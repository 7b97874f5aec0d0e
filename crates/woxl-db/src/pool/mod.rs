//! PostgreSQL pool creation and schema setup.

mod migrate;
mod postgres;

pub use migrate::{run_migrations, SCHEMA};
pub use postgres::{create_pool, PoolConfig};

pub use sqlx::postgres::PgPool;
