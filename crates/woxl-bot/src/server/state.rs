//! Bot state
//!
//! Shared by every update task: the services, the Bot API client and the
//! configuration.

use std::sync::Arc;

use woxl_common::AppConfig;
use woxl_service::ServiceContext;

use crate::handlers::Dispatcher;
use crate::telegram::TelegramApi;

/// State shared across all update tasks
#[derive(Clone)]
pub struct BotState {
    /// Service context containing all repositories
    service_context: Arc<ServiceContext>,
    /// Telegram Bot API client
    api: Arc<TelegramApi>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl BotState {
    /// Create a new BotState
    pub fn new(service_context: ServiceContext, api: TelegramApi, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            api: Arc::new(api),
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the Bot API client
    pub fn api(&self) -> &Arc<TelegramApi> {
        &self.api
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Dispatcher over the shared service context
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(Arc::clone(&self.service_context))
    }
}

impl std::fmt::Debug for BotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotState")
            .field("service_context", &"ServiceContext")
            .field("api", &"TelegramApi")
            .field("config", &"AppConfig")
            .finish()
    }
}
