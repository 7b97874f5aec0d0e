//! Warn duration parsing
//!
//! Accepts `<integer><unit>` tokens such as `10m`, `2ч`, `1mon`. Units are
//! accepted in Latin and Cyrillic spelling. Month and year are fixed at 30 and
//! 365 days; no calendar arithmetic is involved.

use chrono::{Duration, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Seconds per unit for every accepted unit spelling
fn unit_seconds(unit: &str) -> Option<i64> {
    match unit {
        "s" | "с" => Some(1),
        "m" | "м" => Some(MINUTE),
        "h" | "ч" => Some(HOUR),
        "d" | "д" => Some(DAY),
        "w" | "н" => Some(WEEK),
        "mon" | "мес" => Some(MONTH),
        "y" | "g" | "г" => Some(YEAR),
        _ => None,
    }
}

/// Parse a duration token.
///
/// Returns `None` for anything that is not a well-formed duration (unknown
/// unit, missing number, overflow). A duration that would push an expiry
/// starting now past the last representable timestamp is an overflow too.
/// Callers treat `None` as "no duration" rather than an error.
pub fn parse_duration(text: &str) -> Option<Duration> {
    let s = text.trim().to_lowercase();
    let split = s.find(|c: char| !c.is_ascii_digit())?;
    let (number, unit) = s.split_at(split);
    if number.is_empty() {
        return None;
    }

    let amount: i64 = number.parse().ok()?;
    let seconds = amount.checked_mul(unit_seconds(unit.trim_start())?)?;
    let duration = Duration::try_seconds(seconds)?;
    Utc::now().checked_add_signed(duration)?;
    Some(duration)
}
