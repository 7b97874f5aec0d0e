//! Domain entities - core business objects

mod chat;
mod nick;
mod role_assignment;
mod warn;

pub use chat::Chat;
pub use nick::{Nick, MAX_NICK_LEN};
pub use role_assignment::RoleAssignment;
pub use warn::{NewWarn, Warn};
