//! Service context - dependency container for services
//!
//! Holds the repositories and listing settings shared by every request.

use std::sync::Arc;

use woxl_core::{
    ChatRepository, NickRepository, RoleAssignmentRepository, WarnRepository, DEFAULT_PER_PAGE,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cloning is cheap; every repository sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    chat_repo: Arc<dyn ChatRepository>,
    role_repo: Arc<dyn RoleAssignmentRepository>,
    nick_repo: Arc<dyn NickRepository>,
    warn_repo: Arc<dyn WarnRepository>,

    // Settings
    warns_page_size: u32,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        chat_repo: Arc<dyn ChatRepository>,
        role_repo: Arc<dyn RoleAssignmentRepository>,
        nick_repo: Arc<dyn NickRepository>,
        warn_repo: Arc<dyn WarnRepository>,
        warns_page_size: u32,
    ) -> Self {
        Self {
            chat_repo,
            role_repo,
            nick_repo,
            warn_repo,
            warns_page_size: warns_page_size.max(1),
        }
    }

    // === Repositories ===

    /// Get the chat repository
    pub fn chat_repo(&self) -> &dyn ChatRepository {
        self.chat_repo.as_ref()
    }

    /// Get the role assignment repository
    pub fn role_repo(&self) -> &dyn RoleAssignmentRepository {
        self.role_repo.as_ref()
    }

    /// Get the nick repository
    pub fn nick_repo(&self) -> &dyn NickRepository {
        self.nick_repo.as_ref()
    }

    /// Get the warn repository
    pub fn warn_repo(&self) -> &dyn WarnRepository {
        self.warn_repo.as_ref()
    }

    // === Settings ===

    /// Warns shown per list page
    pub fn warns_page_size(&self) -> u32 {
        self.warns_page_size
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("warns_page_size", &self.warns_page_size)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    chat_repo: Option<Arc<dyn ChatRepository>>,
    role_repo: Option<Arc<dyn RoleAssignmentRepository>>,
    nick_repo: Option<Arc<dyn NickRepository>>,
    warn_repo: Option<Arc<dyn WarnRepository>>,
    warns_page_size: u32,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            chat_repo: None,
            role_repo: None,
            nick_repo: None,
            warn_repo: None,
            warns_page_size: DEFAULT_PER_PAGE,
        }
    }

    pub fn chat_repo(mut self, repo: Arc<dyn ChatRepository>) -> Self {
        self.chat_repo = Some(repo);
        self
    }

    pub fn role_repo(mut self, repo: Arc<dyn RoleAssignmentRepository>) -> Self {
        self.role_repo = Some(repo);
        self
    }

    pub fn nick_repo(mut self, repo: Arc<dyn NickRepository>) -> Self {
        self.nick_repo = Some(repo);
        self
    }

    pub fn warn_repo(mut self, repo: Arc<dyn WarnRepository>) -> Self {
        self.warn_repo = Some(repo);
        self
    }

    pub fn warns_page_size(mut self, size: u32) -> Self {
        self.warns_page_size = size;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.chat_repo
                .ok_or_else(|| ServiceError::validation("chat_repo is required"))?,
            self.role_repo
                .ok_or_else(|| ServiceError::validation("role_repo is required"))?,
            self.nick_repo
                .ok_or_else(|| ServiceError::validation("nick_repo is required"))?,
            self.warn_repo
                .ok_or_else(|| ServiceError::validation("warn_repo is required"))?,
            self.warns_page_size,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
