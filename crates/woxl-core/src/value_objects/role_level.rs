//! Role levels - the five-step moderation hierarchy
//!
//! Higher level = more authority. Level 5 (owner) is the only level allowed to
//! grant, revoke, promote, or demote other members.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Moderation role level (1..=5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
#[repr(i16)]
pub enum RoleLevel {
    JuniorModerator = 1,
    Moderator = 2,
    JuniorAdmin = 3,
    Admin = 4,
    Owner = 5,
}

impl RoleLevel {
    /// Lowest level, the minimum needed to issue warns
    pub const MIN: Self = Self::JuniorModerator;

    /// Highest level
    pub const MAX: Self = Self::Owner;

    /// All levels, highest first (display order)
    pub const DESCENDING: [Self; 5] = [
        Self::Owner,
        Self::Admin,
        Self::JuniorAdmin,
        Self::Moderator,
        Self::JuniorModerator,
    ];

    /// Create a `RoleLevel` from a raw integer value
    #[must_use]
    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            1 => Some(Self::JuniorModerator),
            2 => Some(Self::Moderator),
            3 => Some(Self::JuniorAdmin),
            4 => Some(Self::Admin),
            5 => Some(Self::Owner),
            _ => None,
        }
    }

    /// Get the raw integer value
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        self as i16
    }

    /// Title shown in chat replies
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::JuniorModerator => "🌱 Мл. модератор",
            Self::Moderator => "🧩 Модератор",
            Self::JuniorAdmin => "🔰 Мл. администратор",
            Self::Admin => "🛡 Администратор",
            Self::Owner => "👑 Владелец",
        }
    }

    /// English name, used in logs
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::JuniorModerator => "Junior Moderator",
            Self::Moderator => "Moderator",
            Self::JuniorAdmin => "Junior Admin",
            Self::Admin => "Admin",
            Self::Owner => "Owner",
        }
    }

    #[inline]
    pub fn is_owner(self) -> bool {
        self == Self::Owner
    }

    /// Check if this level satisfies a required minimum
    #[inline]
    pub fn at_least(self, required: RoleLevel) -> bool {
        self >= required
    }

    /// One level up
    ///
    /// # Errors
    /// Returns `DomainError::AlreadyAtBound` when already at the owner level.
    pub fn promoted(self) -> Result<Self, DomainError> {
        Self::from_i16(self.as_i16() + 1).ok_or(DomainError::AlreadyAtBound { level: self })
    }

    /// One level down
    ///
    /// # Errors
    /// Returns `DomainError::AlreadyAtBound` when already at the lowest level.
    pub fn demoted(self) -> Result<Self, DomainError> {
        Self::from_i16(self.as_i16() - 1).ok_or(DomainError::AlreadyAtBound { level: self })
    }
}

impl TryFrom<i16> for RoleLevel {
    type Error = DomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::from_i16(value).ok_or(DomainError::InvalidRoleLevel(value))
    }
}

impl From<RoleLevel> for i16 {
    fn from(level: RoleLevel) -> Self {
        level.as_i16()
    }
}

impl fmt::Display for RoleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i16())
    }
}
