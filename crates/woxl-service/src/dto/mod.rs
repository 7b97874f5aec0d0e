//! Data transfer objects
//!
//! - Request DTOs carry validated user input into services
//! - Response DTOs shape service results for rendering

pub mod requests;
pub mod responses;

pub use requests::{AssignRoleRequest, IssueWarnRequest, SetNickRequest};
pub use responses::{RoleChange, RoleGroup, RoleRoster};
