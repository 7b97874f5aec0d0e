//! Database models - SQLx-compatible structs for PostgreSQL tables

mod chat;
mod nick;
mod role_assignment;
mod warn;

pub use chat::ChatModel;
pub use nick::NickModel;
pub use role_assignment::RoleAssignmentModel;
pub use warn::WarnModel;
