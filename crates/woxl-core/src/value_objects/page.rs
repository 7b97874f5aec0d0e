//! Page-number pagination and remaining-time values for list replies

use chrono::{DateTime, Duration, Utc};

/// Default page size for list replies
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Requested page (1-based) and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Create a page request; page and size are raised to at least 1
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Number of pages for `total` items (an empty list still has one page)
    pub fn total_pages(&self, total: u64) -> u32 {
        let pages = total.div_ceil(u64::from(self.per_page)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Clamp the requested page into `1..=total_pages`
    #[must_use]
    pub fn clamp_to(&self, total: u64) -> Self {
        Self {
            page: self.page.clamp(1, self.total_pages(total)),
            per_page: self.per_page,
        }
    }

    /// Row offset of the first item on this page
    #[inline]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    #[inline]
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Page actually returned (after clamping)
    pub page: u32,
    pub per_page: u32,
    /// Total number of items across all pages
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page,
            per_page: request.per_page,
            total,
        }
    }

    pub fn total_pages(&self) -> u32 {
        PageRequest::new(self.page, self.per_page).total_pages(self.total)
    }

    /// 1-based position of the first item on this page within the full list
    pub fn first_index(&self) -> u64 {
        PageRequest::new(self.page, self.per_page).offset() + 1
    }

    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages()
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}

/// Time left on a warn relative to some instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    /// No expiry was set
    NoLimit,
    /// Expiry is at or before now
    Expired,
    /// Strictly positive time left
    Left(Duration),
}

impl Remaining {
    pub fn until(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        match expires_at {
            None => Self::NoLimit,
            Some(until) => {
                let left = until - now;
                if left.num_seconds() <= 0 {
                    Self::Expired
                } else {
                    Self::Left(left)
                }
            }
        }
    }
}
