use serde::{Deserialize, Serialize};

/// Default page size for collection views.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: usize = 100;

/// Pagination parameters for a computed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of items to return.
    pub limit: usize,
    /// Offset for pagination (0-based).
    pub offset: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl Pagination {
    /// Clamps the limit to `1..=MAX_PAGE_SIZE`.
    pub fn new(limit: Option<usize>, offset: Option<usize>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            offset: offset.unwrap_or(0),
        }
    }

    /// 1-based page number with a fixed page size.
    pub fn page(number: usize, size: usize) -> Self {
        let size = size.clamp(1, MAX_PAGE_SIZE);
        Self {
            limit: size,
            offset: number.saturating_sub(1).saturating_mul(size),
        }
    }

    /// The same window with the limit forced into `1..=MAX_PAGE_SIZE`.
    /// Literal or deserialized values may carry any limit.
    pub fn clamped(self) -> Self {
        Self {
            limit: self.limit.clamp(1, MAX_PAGE_SIZE),
            offset: self.offset,
        }
    }

    /// The following page.
    pub fn next(self) -> Self {
        let this = self.clamped();
        Self {
            limit: this.limit,
            offset: this.offset.saturating_add(this.limit),
        }
    }

    /// Back to the first page, keeping the page size.
    pub fn first(self) -> Self {
        Self {
            limit: self.limit,
            offset: 0,
        }
    }
}

/// One page of a computed sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of items across all pages.
    pub total: usize,
    pub pagination: Pagination,
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            pagination: self.pagination,
            has_more: self.has_more,
        }
    }
}
