//! Response DTOs for role listings and level changes

use woxl_core::{RoleAssignment, RoleLevel, UserId};

/// Members holding one role level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGroup {
    pub level: RoleLevel,
    pub members: Vec<RoleAssignment>,
}

/// All role levels of a chat, highest first; empty levels are kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRoster {
    pub groups: Vec<RoleGroup>,
}

impl RoleRoster {
    /// Group assignments under every level from 5 down to 1
    pub fn from_assignments(assignments: Vec<RoleAssignment>) -> Self {
        let mut groups: Vec<RoleGroup> = RoleLevel::DESCENDING
            .iter()
            .map(|&level| RoleGroup {
                level,
                members: Vec::new(),
            })
            .collect();

        for assignment in assignments {
            if let Some(group) = groups.iter_mut().find(|g| g.level == assignment.level) {
                group.members.push(assignment);
            }
        }

        Self { groups }
    }

    /// Every user id on the roster
    pub fn user_ids(&self) -> Vec<UserId> {
        self.groups
            .iter()
            .flat_map(|g| g.members.iter().map(|m| m.user_id))
            .collect()
    }

    /// Number of members across all levels
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.members.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of a promote or demote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleChange {
    pub user_id: UserId,
    pub old: RoleLevel,
    pub new: RoleLevel,
}
