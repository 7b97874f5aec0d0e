//! Telegram Bot API transport: HTTP client, long-poll loop and wire types.

pub mod api;
pub mod poller;
pub mod types;

pub use api::{build_keyboard, TelegramApi, TelegramError};
pub use poller::poll_loop;
