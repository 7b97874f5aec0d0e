//! Process configuration read from the environment.

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, BotConfig, ConfigError, DatabaseConfig, Environment, PaginationConfig,
};
