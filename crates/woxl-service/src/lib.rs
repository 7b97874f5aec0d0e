//! # woxl-service
//!
//! Application layer: authorization rules and the role, warn, nick and chat
//! use cases, written against the `woxl-core` repository traits.

pub mod dto;
pub mod services;

pub use dto::{AssignRoleRequest, IssueWarnRequest, RoleChange, RoleGroup, RoleRoster, SetNickRequest};
pub use services::{
    ChatService, NickService, PermissionService, RoleService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, WarnService,
};
