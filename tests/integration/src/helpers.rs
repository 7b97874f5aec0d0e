//! Test harness for driving the dispatcher
//!
//! [`TestBot`] wires the services to a [`MemoryStore`] and feeds inbound
//! events straight into the dispatcher, the way the runtime does after
//! decoding a Telegram update.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use woxl_bot::handlers::{CallbackOutcome, Dispatcher};
use woxl_bot::protocol::{IncomingMessage, Outbound, Sender};
use woxl_core::{ChatId, RoleLevel, UserId};
use woxl_service::{AssignRoleRequest, RoleService, ServiceContext, ServiceContextBuilder};

use crate::fixtures::{callback, message, reply, unique_chat};
use crate::memory::MemoryStore;

/// Page size used by the harness
pub const TEST_PAGE_SIZE: u32 = 10;

/// Build a service context over an in-memory store
pub fn memory_context(store: &Arc<MemoryStore>, page_size: u32) -> Result<ServiceContext> {
    let ctx = ServiceContextBuilder::new()
        .chat_repo(store.clone())
        .role_repo(store.clone())
        .nick_repo(store.clone())
        .warn_repo(store.clone())
        .warns_page_size(page_size)
        .build()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(ctx)
}

/// One chat served by the dispatcher over an in-memory store
pub struct TestBot {
    pub store: Arc<MemoryStore>,
    pub ctx: Arc<ServiceContext>,
    pub chat: ChatId,
    now: Option<DateTime<Utc>>,
}

impl TestBot {
    /// Start a bot in a fresh chat
    pub fn start() -> Result<Self> {
        Self::with_page_size(TEST_PAGE_SIZE)
    }

    pub fn with_page_size(page_size: u32) -> Result<Self> {
        let store = Arc::new(MemoryStore::new());
        let ctx = Arc::new(memory_context(&store, page_size)?);
        Ok(Self {
            store,
            ctx,
            chat: unique_chat(),
            now: None,
        })
    }

    /// Render remaining times as of `now`
    pub fn at(&mut self, now: DateTime<Utc>) -> &mut Self {
        self.now = Some(now);
        self
    }

    pub fn dispatcher(&self) -> Dispatcher {
        let dispatcher = Dispatcher::new(Arc::clone(&self.ctx));
        match self.now {
            Some(now) => dispatcher.at(now),
            None => dispatcher,
        }
    }

    /// Make `user` the chat owner, as the join bootstrap does
    pub async fn bootstrap_owner(&self, user: &Sender) -> Result<()> {
        RoleService::new(&self.ctx)
            .bootstrap_owner(self.chat, user.id)
            .await?;
        Ok(())
    }

    /// Grant a role directly through the service, acting as `owner`
    pub async fn grant(&self, owner: &Sender, target: &Sender, level: RoleLevel) -> Result<()> {
        RoleService::new(&self.ctx)
            .assign(self.chat, owner.id, target.id, AssignRoleRequest::new(level, None))
            .await?;
        Ok(())
    }

    /// Current level of a user, if any
    pub async fn level_of(&self, user: UserId) -> Result<Option<RoleLevel>> {
        Ok(woxl_service::PermissionService::new(&self.ctx)
            .level_of(self.chat, user)
            .await?)
    }

    pub async fn dispatch(&self, msg: &IncomingMessage) -> Option<Outbound> {
        self.dispatcher().on_message(msg).await
    }

    /// Send a plain message
    pub async fn send(&self, from: &Sender, text: &str) -> Option<Outbound> {
        self.dispatch(&message(self.chat, from, text)).await
    }

    /// Send a message replying to `to`
    pub async fn send_reply(&self, from: &Sender, to: &Sender, text: &str) -> Option<Outbound> {
        self.dispatch(&reply(self.chat, from, to, text)).await
    }

    /// Reply text of a command that must produce one
    pub async fn say(&self, from: &Sender, text: &str) -> String {
        reply_text(self.send(from, text).await)
    }

    pub async fn say_reply(&self, from: &Sender, to: &Sender, text: &str) -> String {
        reply_text(self.send_reply(from, to, text).await)
    }

    /// Press an inline button on message `message_id`
    pub async fn press(&self, from: &Sender, message_id: i64, data: &str) -> CallbackOutcome {
        self.dispatcher()
            .on_callback(&callback(self.chat, from, message_id, data))
            .await
    }
}

/// Text of a reply, panicking when there is none
pub fn reply_text(outbound: Option<Outbound>) -> String {
    match outbound {
        Some(out) => out.text().to_string(),
        None => panic!("expected a reply"),
    }
}

/// Callback data of every button in the reply keyboard
pub fn button_targets(outbound: &Outbound) -> Vec<String> {
    outbound
        .keyboard()
        .map(|kb| {
            kb.inline_keyboard
                .iter()
                .flatten()
                .map(|b| b.callback_data.clone())
                .collect()
        })
        .unwrap_or_default()
}
