//! # woxl-bot
//!
//! Telegram moderation bot: long-polling transport, text command protocol,
//! handlers on top of `woxl-service`, HTML rendering and the runtime that
//! ties them together.

pub mod handlers;
pub mod protocol;
pub mod render;
pub mod server;
pub mod telegram;

pub use server::run;
