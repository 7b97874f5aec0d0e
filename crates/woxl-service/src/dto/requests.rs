//! Request DTOs for moderation commands
//!
//! Requests are built by the bot from parsed commands and validated with
//! `validator` before any repository is touched.

use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidationError};
use woxl_core::{RoleLevel, MAX_NICK_LEN};

/// Trim free text and drop it when nothing is left
pub fn normalize_reason(reason: Option<String>) -> Option<String> {
    reason
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
}

// ============================================================================
// Role Requests
// ============================================================================

/// Grant or overwrite a role
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AssignRoleRequest {
    pub level: RoleLevel,
    pub reason: Option<String>,
}

impl AssignRoleRequest {
    pub fn new(level: RoleLevel, reason: Option<String>) -> Self {
        Self {
            level,
            reason: normalize_reason(reason),
        }
    }
}

// ============================================================================
// Warn Requests
// ============================================================================

/// Issue a warn
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IssueWarnRequest {
    pub reason: Option<String>,

    /// Expiry offset in seconds; `None` means the warn never expires
    #[validate(range(min = 1, message = "Срок предупреждения должен быть больше нуля."))]
    pub duration_secs: Option<i64>,
}

impl IssueWarnRequest {
    pub fn new(reason: Option<String>, duration: Option<chrono::Duration>) -> Self {
        Self {
            reason: normalize_reason(reason),
            duration_secs: duration.map(|d| d.num_seconds()),
        }
    }

    pub fn duration(&self) -> Option<chrono::Duration> {
        self.duration_secs.and_then(chrono::Duration::try_seconds)
    }
}

// ============================================================================
// Nick Requests
// ============================================================================

/// Set the caller's nickname
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetNickRequest {
    #[validate(custom(function = "validate_nick"))]
    pub nick: String,
}

fn validate_nick(nick: &str) -> Result<(), ValidationError> {
    let message = if nick.is_empty() {
        "Ник не может быть пустым."
    } else if nick.chars().count() > MAX_NICK_LEN {
        "Ник должен быть не длиннее 64 символов."
    } else {
        return Ok(());
    };
    Err(ValidationError::new("nick").with_message(Cow::Borrowed(message)))
}

impl SetNickRequest {
    pub fn new(nick: &str) -> Self {
        Self {
            nick: nick.trim().to_string(),
        }
    }
}
