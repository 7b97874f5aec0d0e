//! RoleAssignment entity <-> model mapper

use woxl_core::{ChatId, DomainError, RoleAssignment, RoleLevel, UserId};

use crate::models::RoleAssignmentModel;

/// The column has a CHECK constraint, but a level outside 1..=5 still
/// surfaces as `InvalidRoleLevel` instead of being clamped.
impl TryFrom<RoleAssignmentModel> for RoleAssignment {
    type Error = DomainError;

    fn try_from(model: RoleAssignmentModel) -> Result<Self, Self::Error> {
        Ok(RoleAssignment {
            chat_id: ChatId::new(model.chat_id),
            user_id: UserId::new(model.user_id),
            level: RoleLevel::try_from(model.role_level)?,
            assigned_by: model.assigned_by.map(UserId::new),
            reason: model.reason,
            assigned_at: model.assigned_at,
        })
    }
}
