//! Nickname commands

use woxl_core::DomainError;
use woxl_service::{NickService, ServiceContext, SetNickRequest};

use crate::protocol::{IncomingMessage, Outbound, TargetArg};
use crate::render::mention;

use super::error::{HandlerError, HandlerResult};
use super::resolve_target;

const USAGE: &str = "Использование: ник [новое имя]";

pub async fn set(ctx: &ServiceContext, msg: &IncomingMessage, nick: Option<&str>) -> HandlerResult<Outbound> {
    let nick = nick.ok_or(HandlerError::Usage(USAGE))?;

    let saved = NickService::new(ctx)
        .set(msg.chat_id, msg.from.id, SetNickRequest::new(nick))
        .await?;

    Ok(Outbound::reply(
        msg.chat_id,
        msg.message_id,
        format!("✅ Имя изменено на {}!", mention(saved.user_id, &saved.nick)),
    ))
}

/// Show the caller's nick, or another user's when a target is given
pub async fn show(ctx: &ServiceContext, msg: &IncomingMessage, target: Option<&TargetArg>) -> HandlerResult<Outbound> {
    let nicks = NickService::new(ctx);

    let text = match target {
        None => match nicks.get(msg.chat_id, msg.from.id).await? {
            Some(nick) => format!("🍊 Вас зовут {}.", mention(nick.user_id, &nick.nick)),
            None => "У вас нет ника. Установите с помощью: ник [имя]".to_string(),
        },
        Some(target) => {
            let target = resolve_target(target, msg)?;
            match nicks.get(msg.chat_id, target.id).await? {
                Some(nick) => format!("Это пользователь {}.", mention(nick.user_id, &nick.nick)),
                None => return Err(DomainError::NickNotFound(target.id).into()),
            }
        }
    };

    Ok(Outbound::reply(msg.chat_id, msg.message_id, text))
}
