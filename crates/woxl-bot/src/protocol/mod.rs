//! Inbound protocol: text commands, callback payloads and the transport-free
//! view of Telegram updates the handlers work with.

pub mod callback;
pub mod command;
pub mod outbound;
pub mod update;

pub use callback::CallbackData;
pub use command::{Command, TargetArg};
pub use outbound::Outbound;
pub use update::{BotMembership, IncomingCallback, IncomingMessage, Sender};
