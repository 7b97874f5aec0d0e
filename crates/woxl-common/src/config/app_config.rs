//! Application configuration structs
//!
//! Loads configuration from environment variables and an optional `.env` file.

use serde::Deserialize;
use std::{env, str::FromStr};

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub pagination: PaginationConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Telegram Bot API configuration
#[derive(Clone, Deserialize)]
pub struct BotConfig {
    pub token: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Long-poll timeout passed to `getUpdates`
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
}

// The token is a credential; keep it out of logs.
impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish()
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Listing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_warns_page_size")]
    pub warns_page_size: u32,
}

// Default value functions
fn default_app_name() -> String {
    "woxl".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_warns_page_size() -> u32 {
    10
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    /// or a present variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };

        let env = match lookup("APP_ENV") {
            Some(raw) => {
                Environment::parse(&raw).ok_or(ConfigError::InvalidValue("APP_ENV", raw))?
            }
            None => default_env(),
        };

        let warns_page_size =
            parsed(&lookup, "WARNS_PAGE_SIZE")?.unwrap_or_else(default_warns_page_size);
        if warns_page_size == 0 {
            return Err(ConfigError::InvalidValue(
                "WARNS_PAGE_SIZE",
                warns_page_size.to_string(),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            bot: BotConfig {
                token: required("BOT_TOKEN")?,
                api_url: lookup("TELEGRAM_API_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(default_api_url),
                poll_timeout_secs: parsed(&lookup, "BOT_POLL_TIMEOUT_SECS")?
                    .unwrap_or_else(default_poll_timeout),
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parsed(&lookup, "DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: parsed(&lookup, "DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
            },
            pagination: PaginationConfig { warns_page_size },
        })
    }
}

fn parsed<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
