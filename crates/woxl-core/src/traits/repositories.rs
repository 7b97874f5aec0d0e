//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Implementations must make every method a
//! single atomic step with respect to the (chat, user) row it touches.

use async_trait::async_trait;

use crate::entities::{NewWarn, Nick, RoleAssignment, Warn};
use crate::error::DomainError;
use crate::value_objects::{ChatId, RoleLevel, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Chat Repository
// ============================================================================

#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Register a chat; no-op if it already exists
    async fn ensure(&self, id: ChatId) -> RepoResult<()>;

    /// Check if a chat is registered
    async fn exists(&self, id: ChatId) -> RepoResult<bool>;
}

// ============================================================================
// Role Assignment Repository
// ============================================================================

/// Direction of a one-level role change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleStep {
    Promote,
    Demote,
}

impl RoleStep {
    /// Apply this step to a level
    pub fn apply(self, level: RoleLevel) -> Result<RoleLevel, DomainError> {
        match self {
            Self::Promote => level.promoted(),
            Self::Demote => level.demoted(),
        }
    }
}

#[async_trait]
pub trait RoleAssignmentRepository: Send + Sync {
    /// Find a user's assignment in a chat
    async fn find(&self, chat_id: ChatId, user_id: UserId) -> RepoResult<Option<RoleAssignment>>;

    /// List all assignments in a chat (highest level first)
    async fn find_by_chat(&self, chat_id: ChatId) -> RepoResult<Vec<RoleAssignment>>;

    /// Insert or overwrite the assignment for (chat, user)
    async fn upsert(&self, assignment: &RoleAssignment) -> RepoResult<()>;

    /// Remove an assignment, returning the removed record if there was one
    async fn delete(&self, chat_id: ChatId, user_id: UserId) -> RepoResult<Option<RoleAssignment>>;

    /// Move a user's level by one step, returning `(old, new)`
    ///
    /// Fails with `RoleNotFound` when the user has no role and with
    /// `AlreadyAtBound` when the step would leave 1..=5.
    async fn step(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        step: RoleStep,
    ) -> RepoResult<(RoleLevel, RoleLevel)>;
}

// ============================================================================
// Nick Repository
// ============================================================================

#[async_trait]
pub trait NickRepository: Send + Sync {
    /// Find a user's nickname in a chat
    async fn find(&self, chat_id: ChatId, user_id: UserId) -> RepoResult<Option<Nick>>;

    /// Find nicknames for several users at once (missing users are skipped)
    async fn find_many(&self, chat_id: ChatId, user_ids: &[UserId]) -> RepoResult<Vec<Nick>>;

    /// Insert or overwrite the nickname for (chat, user)
    async fn upsert(&self, nick: &Nick) -> RepoResult<()>;
}

// ============================================================================
// Warn Repository
// ============================================================================

#[async_trait]
pub trait WarnRepository: Send + Sync {
    /// Store a new active warn
    async fn create(&self, warn: &NewWarn) -> RepoResult<Warn>;

    /// Count active warns in a chat
    async fn count_active(&self, chat_id: ChatId) -> RepoResult<u64>;

    /// List active warns in a chat, newest first
    async fn find_active(&self, chat_id: ChatId, offset: u64, limit: u64) -> RepoResult<Vec<Warn>>;

    /// Deactivate every active warn of a user, returning how many changed
    async fn deactivate_active(&self, chat_id: ChatId, user_id: UserId) -> RepoResult<u64>;
}
