//! Role commands: list, assign, revoke, promote, demote

use std::collections::HashMap;

use woxl_core::RoleLevel;
use woxl_service::{AssignRoleRequest, NickService, RoleService, ServiceContext};

use crate::protocol::{IncomingMessage, Outbound, TargetArg};
use crate::render::admin_list;

use super::error::{HandlerResult, OrDenied};
use super::{resolve_target, user_link};

const ONLY_OWNER_ASSIGNS: &str = "Только Владелец может выдавать админов.";
const ONLY_OWNER_REVOKES: &str = "Только Владелец может снимать админов.";
const ONLY_OWNER_MOVES: &str = "Только Владелец может повышать/понижать.";

fn role_line(level: RoleLevel) -> String {
    format!("{} [{}]", level.title(), level)
}

/// Everyone with a role, grouped by level
pub async fn list(ctx: &ServiceContext, msg: &IncomingMessage) -> HandlerResult<Outbound> {
    let roster = RoleService::new(ctx).list(msg.chat_id).await?;
    let names: HashMap<_, _> = NickService::new(ctx)
        .lookup(msg.chat_id, &roster.user_ids())
        .await?;

    Ok(Outbound::Send {
        chat_id: msg.chat_id,
        reply_to: None,
        text: admin_list(&roster, &names),
        keyboard: None,
    })
}

pub async fn assign(
    ctx: &ServiceContext,
    msg: &IncomingMessage,
    level: RoleLevel,
    target: &TargetArg,
    reason: Option<String>,
) -> HandlerResult<Outbound> {
    let target = resolve_target(target, msg)?;
    let assignment = RoleService::new(ctx)
        .assign(msg.chat_id, msg.from.id, target.id, AssignRoleRequest::new(level, reason))
        .await
        .or_denied(ONLY_OWNER_ASSIGNS)?;

    let link = user_link(ctx, msg.chat_id, &target).await?;
    Ok(Outbound::reply(
        msg.chat_id,
        msg.message_id,
        format!(
            "➕ {link} назначен на роль: {}\nС большой силой приходит большая ответственность.",
            role_line(assignment.level)
        ),
    ))
}

pub async fn revoke(ctx: &ServiceContext, msg: &IncomingMessage, target: &TargetArg) -> HandlerResult<Outbound> {
    let target = resolve_target(target, msg)?;
    let removed = RoleService::new(ctx)
        .revoke(msg.chat_id, msg.from.id, target.id)
        .await
        .or_denied(ONLY_OWNER_REVOKES)?;

    let link = user_link(ctx, msg.chat_id, &target).await?;
    Ok(Outbound::reply(
        msg.chat_id,
        msg.message_id,
        format!(
            "➖ {link} снят с роли: {}\nСпасибо за вклад в управление чатом.",
            role_line(removed.level)
        ),
    ))
}

pub async fn promote(ctx: &ServiceContext, msg: &IncomingMessage, target: &TargetArg) -> HandlerResult<Outbound> {
    let target = resolve_target(target, msg)?;
    let change = RoleService::new(ctx)
        .promote(msg.chat_id, msg.from.id, target.id)
        .await
        .or_denied(ONLY_OWNER_MOVES)?;

    let link = user_link(ctx, msg.chat_id, &target).await?;
    Ok(Outbound::reply(
        msg.chat_id,
        msg.message_id,
        format!(
            "⬆️ {link} повышен до: {}\nДоверие растёт — ответственность тоже.",
            role_line(change.new)
        ),
    ))
}

pub async fn demote(ctx: &ServiceContext, msg: &IncomingMessage, target: &TargetArg) -> HandlerResult<Outbound> {
    let target = resolve_target(target, msg)?;
    let change = RoleService::new(ctx)
        .demote(msg.chat_id, msg.from.id, target.id)
        .await
        .or_denied(ONLY_OWNER_MOVES)?;

    let link = user_link(ctx, msg.chat_id, &target).await?;
    Ok(Outbound::reply(
        msg.chat_id,
        msg.message_id,
        format!(
            "⬇️ {link} понижен до: {}\nРоль изменена, но вклад всё ещё ценится.",
            role_line(change.new)
        ),
    ))
}
