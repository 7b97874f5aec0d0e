//! Command handlers
//!
//! [`Dispatcher`] turns one inbound event into at most one reply. Each
//! handler calls the services and renders the result; errors are converted
//! into reply text at this boundary so nothing propagates to the runtime.

pub mod error;
pub mod membership;
pub mod nicks;
pub mod roles;
pub mod start;
pub mod warns;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};
use woxl_core::{ChatId, DomainError};
use woxl_service::{NickService, ServiceContext};

use crate::protocol::{CallbackData, Command, IncomingCallback, IncomingMessage, Outbound, Sender, TargetArg};
use crate::render::mention;

pub use error::{HandlerError, HandlerResult};
pub use membership::{on_bot_membership, ChatDirectory};

/// Resolve a command target to a user.
///
/// The replied-to author wins; otherwise only a numeric id works.
pub fn resolve_target(target: &TargetArg, msg: &IncomingMessage) -> Result<Sender, DomainError> {
    match target {
        TargetArg::Reply => msg.reply_to.clone().ok_or(DomainError::InvalidTarget),
        TargetArg::Id(id) => Ok(Sender {
            id: *id,
            display_name: id.to_string(),
        }),
        TargetArg::Username(_) | TargetArg::Unresolved => Err(DomainError::InvalidTarget),
    }
}

/// Mention of a user by nick, falling back to the Telegram name
pub async fn user_link(ctx: &ServiceContext, chat_id: ChatId, user: &Sender) -> HandlerResult<String> {
    let nick = NickService::new(ctx).get(chat_id, user.id).await?;
    let name = nick.as_ref().map_or(user.display_name.as_str(), |n| n.nick.as_str());
    Ok(mention(user.id, name))
}

/// Answer to a button press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackOutcome {
    /// Toast shown to the presser
    pub notice: Option<String>,
    /// Replacement for the message that carried the button
    pub edit: Option<Outbound>,
}

/// Routes inbound events to handlers
#[derive(Debug, Clone)]
pub struct Dispatcher {
    ctx: Arc<ServiceContext>,
    now: Option<DateTime<Utc>>,
}

impl Dispatcher {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx, now: None }
    }

    /// Render remaining times against a fixed instant instead of the clock
    #[must_use]
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }

    pub fn context(&self) -> &ServiceContext {
        &self.ctx
    }

    /// Handle a text message; `None` when it is not a command
    #[instrument(skip_all, fields(chat_id = %msg.chat_id, user_id = %msg.from.id))]
    pub async fn on_message(&self, msg: &IncomingMessage) -> Option<Outbound> {
        let command = Command::parse(&msg.text, msg.has_reply())?;
        debug!(?command, "Command parsed");

        let ctx = self.ctx.as_ref();
        let result = match &command {
            Command::Start => start::start(ctx, msg).await,
            Command::ListAdmins => roles::list(ctx, msg).await,
            Command::AssignRole {
                level,
                target,
                reason,
            } => roles::assign(ctx, msg, *level, target, reason.clone()).await,
            Command::RevokeRole { target } => roles::revoke(ctx, msg, target).await,
            Command::Promote { target } => roles::promote(ctx, msg, target).await,
            Command::Demote { target } => roles::demote(ctx, msg, target).await,
            Command::SetNick { nick } => nicks::set(ctx, msg, nick.as_deref()).await,
            Command::ShowNick { target } => nicks::show(ctx, msg, target.as_ref()).await,
            Command::IssueWarn {
                target,
                duration,
                reason,
            } => warns::issue(ctx, msg, target, *duration, reason.clone()).await,
            Command::RevokeWarns { target } => warns::revoke(ctx, msg, target).await,
            Command::ListWarns => warns::list(ctx, msg, self.now()).await,
        };

        Some(result.unwrap_or_else(|e| {
            debug!(error = %e, "Command rejected");
            Outbound::reply(msg.chat_id, msg.message_id, e.reply_text())
        }))
    }

    /// Handle an inline button press
    #[instrument(skip_all, fields(chat_id = %callback.chat_id, user_id = %callback.from.id))]
    pub async fn on_callback(&self, callback: &IncomingCallback) -> CallbackOutcome {
        let Some(data) = CallbackData::parse(&callback.data) else {
            debug!(data = %callback.data, "Unknown callback payload ignored");
            return CallbackOutcome {
                notice: None,
                edit: None,
            };
        };

        let result = match data {
            CallbackData::Warns { page } => {
                warns::show_page(&self.ctx, callback.chat_id, callback.message_id, page, self.now()).await
            }
        };

        match result {
            Ok(edit) => CallbackOutcome {
                notice: None,
                edit: Some(edit),
            },
            Err(e) => {
                warn!(error = %e, "Callback failed");
                CallbackOutcome {
                    notice: Some(e.reply_text()),
                    edit: None,
                }
            }
        }
    }
}
