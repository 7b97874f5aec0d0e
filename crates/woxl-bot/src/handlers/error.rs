//! Handler error type
//!
//! Every failure ends as a chat reply. [`HandlerError::reply_text`] picks the
//! user-facing message; infrastructure failures get a generic one and are
//! logged at `error`.

use std::fmt;

use tracing::error;
use woxl_core::{DomainError, RoleLevel};
use woxl_service::ServiceError;

use crate::telegram::TelegramError;

const TARGET_HINT: &str =
    "Не удалось определить пользователя. Ответьте на сообщение пользователя или укажите его id.";
const GENERIC_FAILURE: &str = "Произошла ошибка. Попробуйте позже.";
const NOT_ALLOWED: &str = "Недостаточно прав для этой команды.";

/// Error raised while handling one update
#[derive(Debug)]
pub enum HandlerError {
    /// Service-layer failure
    Service(ServiceError),

    /// Domain rule raised by the handler itself (target resolution)
    Domain(DomainError),

    /// Bot API call failed
    Telegram(TelegramError),

    /// Malformed command; the message is the usage hint
    Usage(&'static str),

    /// Permission denied with a command-specific message
    Denied(&'static str),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service(e) => write!(f, "{e}"),
            Self::Domain(e) => write!(f, "{e}"),
            Self::Telegram(e) => write!(f, "{e}"),
            Self::Usage(msg) => write!(f, "Usage: {msg}"),
            Self::Denied(msg) => write!(f, "Denied: {msg}"),
        }
    }
}

impl std::error::Error for HandlerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Service(e) => Some(e),
            Self::Domain(e) => Some(e),
            Self::Telegram(e) => Some(e),
            Self::Usage(_) | Self::Denied(_) => None,
        }
    }
}

impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

impl From<DomainError> for HandlerError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<TelegramError> for HandlerError {
    fn from(err: TelegramError) -> Self {
        Self::Telegram(err)
    }
}

impl HandlerError {
    fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Service(e) => e.as_domain(),
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the failure came from the environment rather than the user
    pub fn is_infrastructure(&self) -> bool {
        match self {
            Self::Service(e) => !e.is_user_error(),
            Self::Domain(e) => e.is_infrastructure(),
            Self::Telegram(_) => true,
            Self::Usage(_) | Self::Denied(_) => false,
        }
    }

    /// Text sent back to the chat
    pub fn reply_text(&self) -> String {
        match self {
            Self::Usage(msg) | Self::Denied(msg) => return (*msg).to_string(),
            _ if self.is_infrastructure() => {
                error!(error = %self, "Command failed");
                return GENERIC_FAILURE.to_string();
            }
            _ => {}
        }

        if let Self::Service(ServiceError::Validation(msg)) = self {
            return msg.clone();
        }

        match self.as_domain() {
            Some(DomainError::InvalidTarget) => TARGET_HINT.to_string(),
            Some(DomainError::RoleNotFound(_)) => "У пользователя нет роли в этой группе.".to_string(),
            Some(DomainError::WarnNotFound(_)) => "У пользователя нет активных предупреждений.".to_string(),
            Some(DomainError::NickNotFound(_)) => "У пользователя нет ника.".to_string(),
            Some(DomainError::AlreadyAtBound { level }) if *level == RoleLevel::MAX => {
                "Нельзя повысить выше существующей роли.".to_string()
            }
            Some(DomainError::AlreadyAtBound { .. }) => "Нельзя понизить ниже минимальной роли.".to_string(),
            Some(DomainError::Unauthorized { .. }) => NOT_ALLOWED.to_string(),
            Some(DomainError::ValidationError(msg)) => msg.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Replace `Unauthorized` with a command-specific denial
pub trait OrDenied<T> {
    fn or_denied(self, message: &'static str) -> HandlerResult<T>;
}

impl<T> OrDenied<T> for Result<T, ServiceError> {
    fn or_denied(self, message: &'static str) -> HandlerResult<T> {
        self.map_err(|e| match e.as_domain() {
            Some(DomainError::Unauthorized { .. }) => HandlerError::Denied(message),
            _ => HandlerError::Service(e),
        })
    }
}

/// Result type for handlers
pub type HandlerResult<T> = Result<T, HandlerError>;
