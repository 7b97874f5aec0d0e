//! Inline button payloads: `<list-kind>:<page>`

use std::fmt;

/// Prefix of warn list navigation buttons
pub const WARNS_PREFIX: &str = "warns";

/// A decoded button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackData {
    /// Show a page of the active warn list
    Warns { page: u32 },
}

impl CallbackData {
    /// Decode a payload; unknown list kinds yield `None`.
    ///
    /// A page that is missing, unparsable or below 1 becomes page 1. A page
    /// too large for `u32` saturates; the list clamps it to the last page.
    pub fn parse(data: &str) -> Option<Self> {
        let (kind, page) = data.split_once(':').unwrap_or((data, ""));
        let page = parse_page(page);

        match kind {
            WARNS_PREFIX => Some(Self::Warns { page }),
            _ => None,
        }
    }
}

fn parse_page(raw: &str) -> u32 {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return 1;
    }
    raw.parse::<u64>()
        .map_or(u32::MAX, |page| u32::try_from(page).unwrap_or(u32::MAX))
        .max(1)
}

impl fmt::Display for CallbackData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warns { page } => write!(f, "{WARNS_PREFIX}:{page}"),
        }
    }
}
