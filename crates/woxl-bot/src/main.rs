//! Woxl bot entry point
//!
//! Run with:
//! ```bash
//! cargo run -p woxl-bot
//! ```
//!
//! Configuration is loaded from environment variables.

use tracing::{error, info};
use woxl_common::{try_init_tracing_with_config, AppConfig, AppResult, TracingConfig};

#[tokio::main]
async fn main() {
    // Load configuration before tracing so the log format follows APP_ENV
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = %e, code = e.error_code(), "Bot stopped with an error");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> AppResult<()> {
    info!(
        name = %config.app.name,
        env = ?config.app.env,
        api_url = %config.bot.api_url,
        "Starting Woxl bot..."
    );

    woxl_bot::run(config).await
}
