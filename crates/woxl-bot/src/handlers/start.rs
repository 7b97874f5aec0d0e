//! `/start` greeting

use woxl_service::{ChatService, ServiceContext};

use crate::protocol::{IncomingMessage, Outbound};
use crate::render::escape_html;

use super::error::HandlerResult;

pub fn greeting(name: &str) -> String {
    format!(
        "🍊 Привет, {}. Вы подключились к Woxl -- Чат менеджер.\n\
         Я Вокс, бот для поддержки порядка, контроля нарушений и администрирования.",
        escape_html(name)
    )
}

/// Greet the sender and register the chat
pub async fn start(ctx: &ServiceContext, msg: &IncomingMessage) -> HandlerResult<Outbound> {
    ChatService::new(ctx).register(msg.chat_id).await?;

    Ok(Outbound::Send {
        chat_id: msg.chat_id,
        reply_to: None,
        text: greeting(&msg.from.display_name),
        keyboard: None,
    })
}
