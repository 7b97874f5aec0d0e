//! HTML rendering of bot replies and navigation keyboards.

pub mod format;
pub mod keyboard;

pub use format::{admin_list, escape_html, format_remaining, format_until, mention, warn_list};
pub use keyboard::page_keyboard;
