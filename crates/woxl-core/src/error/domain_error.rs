//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{RoleLevel, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Role assignment not found for user {0}")]
    RoleNotFound(UserId),

    #[error("No active warns for user {0}")]
    WarnNotFound(UserId),

    #[error("Nick not found for user {0}")]
    NickNotFound(UserId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Could not resolve target user")]
    InvalidTarget,

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid role level: {0}")]
    InvalidRoleLevel(i16),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Requires role level {required} or higher")]
    Unauthorized { required: RoleLevel },

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Role level {level} is already at the bound")]
    AlreadyAtBound { level: RoleLevel },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for logs
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::RoleNotFound(_) => "UNKNOWN_ROLE",
            Self::WarnNotFound(_) => "UNKNOWN_WARN",
            Self::NickNotFound(_) => "UNKNOWN_NICK",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidTarget => "INVALID_TARGET",
            Self::InvalidDuration(_) => "INVALID_DURATION",
            Self::InvalidRoleLevel(_) => "INVALID_ROLE_LEVEL",

            // Authorization
            Self::Unauthorized { .. } => "UNAUTHORIZED",

            // Business Rules
            Self::AlreadyAtBound { .. } => "ALREADY_AT_BOUND",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RoleNotFound(_) | Self::WarnNotFound(_) | Self::NickNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidTarget
                | Self::InvalidDuration(_)
                | Self::InvalidRoleLevel(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Check if this error comes from infrastructure rather than user input
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::DatabaseError(_) | Self::InternalError(_))
    }
}
