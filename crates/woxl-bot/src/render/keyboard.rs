//! Pagination keyboards

use crate::telegram::{build_keyboard, types::InlineKeyboardMarkup};

/// Previous/next buttons for a paged list.
///
/// The previous button never points below page 1. The next button is not
/// bounded here; the list clamps pages past the end.
pub fn page_keyboard(prefix: &str, page: u32) -> InlineKeyboardMarkup {
    let prev = page.saturating_sub(1).max(1);
    let next = page.saturating_add(1);

    build_keyboard(&[
        ("⬅️".to_string(), format!("{prefix}:{prev}")),
        ("➡️".to_string(), format!("{prefix}:{next}")),
    ])
}
