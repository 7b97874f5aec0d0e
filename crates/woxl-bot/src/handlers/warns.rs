//! Warn commands: issue, revoke, list and page navigation

use chrono::{DateTime, Duration, Utc};
use woxl_core::ChatId;
use woxl_service::{IssueWarnRequest, NickService, ServiceContext, WarnService};

use crate::protocol::callback::WARNS_PREFIX;
use crate::protocol::{IncomingMessage, Outbound, TargetArg};
use crate::render::{escape_html, format_until, page_keyboard, warn_list};

use super::error::{HandlerResult, OrDenied};
use super::{resolve_target, user_link};

const ROLE_REQUIRED: &str = "Выдавать и снимать предупреждения могут только участники с ролью.";

pub async fn issue(
    ctx: &ServiceContext,
    msg: &IncomingMessage,
    target: &TargetArg,
    duration: Option<Duration>,
    reason: Option<String>,
) -> HandlerResult<Outbound> {
    let target = resolve_target(target, msg)?;
    let warn = WarnService::new(ctx)
        .issue(msg.chat_id, msg.from.id, target.id, IssueWarnRequest::new(reason, duration))
        .await
        .or_denied(ROLE_REQUIRED)?;

    let link = user_link(ctx, msg.chat_id, &target).await?;
    let until = warn.until.map_or_else(|| "без срока".to_string(), format_until);
    let reason = warn
        .reason
        .as_deref()
        .map_or_else(|| "Причина не указана".to_string(), escape_html);

    Ok(Outbound::reply(
        msg.chat_id,
        msg.message_id,
        format!("⚠️ {link} получил предупреждение до {until} за: {reason}."),
    ))
}

pub async fn revoke(ctx: &ServiceContext, msg: &IncomingMessage, target: &TargetArg) -> HandlerResult<Outbound> {
    let target = resolve_target(target, msg)?;
    WarnService::new(ctx)
        .revoke_active(msg.chat_id, msg.from.id, target.id)
        .await
        .or_denied(ROLE_REQUIRED)?;

    let link = user_link(ctx, msg.chat_id, &target).await?;
    Ok(Outbound::reply(
        msg.chat_id,
        msg.message_id,
        format!("✅ С {link} было снято предупреждение."),
    ))
}

/// Rendered page plus the page actually shown (after clamping)
pub async fn render_page(
    ctx: &ServiceContext,
    chat_id: ChatId,
    page: u32,
    now: DateTime<Utc>,
) -> HandlerResult<(String, u32)> {
    let page = WarnService::new(ctx).list_active(chat_id, page).await?;
    let user_ids: Vec<_> = page.items.iter().map(|w| w.user_id).collect();
    let names = NickService::new(ctx).lookup(chat_id, &user_ids).await?;

    Ok((warn_list(&page, &names, now), page.page))
}

/// First page of the active warn list, as a new message
pub async fn list(ctx: &ServiceContext, msg: &IncomingMessage, now: DateTime<Utc>) -> HandlerResult<Outbound> {
    let (text, page) = render_page(ctx, msg.chat_id, 1, now).await?;

    Ok(Outbound::Send {
        chat_id: msg.chat_id,
        reply_to: Some(msg.message_id),
        text,
        keyboard: Some(page_keyboard(WARNS_PREFIX, page)),
    })
}

/// Another page, replacing the list message in place
pub async fn show_page(
    ctx: &ServiceContext,
    chat_id: ChatId,
    message_id: i64,
    page: u32,
    now: DateTime<Utc>,
) -> HandlerResult<Outbound> {
    let (text, page) = render_page(ctx, chat_id, page, now).await?;

    Ok(Outbound::Edit {
        chat_id,
        message_id,
        text,
        keyboard: Some(page_keyboard(WARNS_PREFIX, page)),
    })
}
