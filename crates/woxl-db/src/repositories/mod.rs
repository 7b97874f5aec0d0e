//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in woxl-core.

mod chat;
mod error;
mod nick;
mod role_assignment;
mod warn;

pub use chat::PgChatRepository;
pub use nick::PgNickRepository;
pub use role_assignment::PgRoleAssignmentRepository;
pub use warn::PgWarnRepository;
