//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of one
//! request.

pub mod chat;
pub mod context;
pub mod error;
pub mod nick;
pub mod permission;
pub mod role;
pub mod warn;

// Re-export all services for convenience
pub use chat::ChatService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use nick::NickService;
pub use permission::PermissionService;
pub use role::RoleService;
pub use warn::WarnService;
