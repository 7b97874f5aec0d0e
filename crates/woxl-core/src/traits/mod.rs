//! Repository traits

mod repositories;

pub use repositories::{
    ChatRepository, NickRepository, RepoResult, RoleAssignmentRepository, RoleStep,
    WarnRepository,
};
