//! Reply text formatting.
//!
//! Replies use Telegram's HTML parse mode. Anything typed by users (nicks,
//! display names, reasons) goes through [`escape_html`] before it is placed
//! into markup.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use woxl_core::{Page, Remaining, UserId, Warn};
use woxl_service::RoleRoster;

const NO_REASON: &str = "Причина не указана";

/// Escape the characters HTML parse mode treats as markup.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Clickable link to a user's profile
pub fn mention(user_id: UserId, name: &str) -> String {
    format!(r#"<a href="tg://user?id={user_id}">{}</a>"#, escape_html(name))
}

/// Mention using the nick when known, the bare id otherwise
fn mention_known(user_id: UserId, names: &HashMap<UserId, String>) -> String {
    match names.get(&user_id) {
        Some(name) => mention(user_id, name),
        None => mention(user_id, &user_id.to_string()),
    }
}

/// Time left on a warn, largest unit first.
///
/// Seconds only appear when the remainder is under a minute.
pub fn format_remaining(remaining: Remaining) -> String {
    let left = match remaining {
        Remaining::NoLimit => return "без срока".to_string(),
        Remaining::Expired => return "закончено".to_string(),
        Remaining::Left(left) => left.num_seconds(),
    };

    let days = left / 86_400;
    let hours = left % 86_400 / 3_600;
    let minutes = left % 3_600 / 60;

    let parts: Vec<String> = [(days, "д"), (hours, "ч"), (minutes, "м")]
        .into_iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, unit)| format!("{n}{unit}"))
        .collect();

    if parts.is_empty() {
        format!("{left}с")
    } else {
        parts.join(" ")
    }
}

/// Absolute expiry as shown in the warn reply
pub fn format_until(until: DateTime<Utc>) -> String {
    until.format("%H:%M:%S %d.%m.%Y").to_string()
}

/// Roster grouped by level, highest first; empty levels read "(пусто)"
pub fn admin_list(roster: &RoleRoster, names: &HashMap<UserId, String>) -> String {
    let mut lines = vec!["🍊 Список администраторов".to_string(), String::new()];

    for group in &roster.groups {
        lines.push(format!("[{}] {}", group.level, group.level.title()));
        if group.members.is_empty() {
            lines.push("(пусто)".to_string());
        } else {
            lines.extend(
                group
                    .members
                    .iter()
                    .map(|m| mention_known(m.user_id, names)),
            );
        }
        lines.push(String::new());
    }

    lines.join("\n").trim_end().to_string()
}

/// One page of active warns with global numbering
pub fn warn_list(page: &Page<Warn>, names: &HashMap<UserId, String>, now: DateTime<Utc>) -> String {
    let mut lines = vec![
        "⚠️ Активные предупреждения в чате".to_string(),
        String::new(),
        format!("┌─ Всего активных предупреждений: {}", page.total),
        "├─ Список предупреждений:".to_string(),
    ];

    let first = page.first_index();
    for (index, warn) in (first..).zip(&page.items) {
        let reason = warn
            .reason
            .as_deref()
            .map_or_else(|| NO_REASON.to_string(), escape_html);
        lines.push(format!(
            "│   {index}. {} наказан за {reason} до ({})",
            mention_known(warn.user_id, names),
            format_remaining(warn.remaining(now)),
        ));
    }

    lines.push(format!("└─ Страница: {}", page.page));
    lines.join("\n")
}
