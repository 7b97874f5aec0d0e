//! # woxl-core
//!
//! Domain layer containing entities, value objects, and repository traits for
//! the chat moderation bot. This crate has zero dependencies on infrastructure
//! (database, Telegram transport, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Chat, NewWarn, Nick, RoleAssignment, Warn, MAX_NICK_LEN};
pub use error::DomainError;
pub use traits::{
    ChatRepository, NickRepository, RepoResult, RoleAssignmentRepository, RoleStep,
    WarnRepository,
};
pub use value_objects::{
    parse_duration, ChatId, IdParseError, Page, PageRequest, Remaining, RoleLevel, UserId,
    DEFAULT_PER_PAGE,
};
