//! Page-number pagination primitives shared by list endpoints.
//!
//! A [`PageRequest`] carries the validated `page`/`perPage` pair supplied by a
//! client. Adapters translate it into an offset and limit, then wrap the
//! fetched slice and total match count in a [`Page`] envelope that reports
//! how many pages exist.
//!
//! # Examples
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(Some(2), Some(10)).expect("valid request");
//! assert_eq!(request.offset(), 10);
//!
//! let page = Page::new(vec!["k"; 5], 15, request);
//! assert_eq!(page.pages(), 2);
//! assert_eq!(page.current_page(), 2);
//! ```

use serde::{Deserialize, Serialize};

/// Page returned when the client omits `page`.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the client omits `perPage`.
pub const DEFAULT_PER_PAGE: u32 = 10;
/// Largest page size served; larger requests are clamped.
pub const MAX_PER_PAGE: u32 = 100;

/// Validation failures for [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("perPage must be at least 1")]
    ZeroPerPage,
}

/// Validated page-number request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Build a request from optional client values.
    ///
    /// Missing values fall back to [`DEFAULT_PAGE`] and [`DEFAULT_PER_PAGE`].
    /// `per_page` above [`MAX_PER_PAGE`] is clamped.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when either value is zero.
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Result<Self, PageRequestError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if per_page == 0 {
            return Err(PageRequestError::ZeroPerPage);
        }
        Ok(Self {
            page,
            per_page: per_page.min(MAX_PER_PAGE),
        })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of rows to skip before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Maximum number of rows in this page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }
}

/// One page of results plus the counts clients need to navigate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    total: u64,
    pages: u64,
    current_page: u32,
}

impl<T> Page<T> {
    /// Wrap a fetched slice with the total number of matching rows.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            pages: total.div_ceil(request.limit()),
            current_page: request.page(),
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Total rows matching the query across all pages.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Number of pages available at the requested size.
    #[must_use]
    pub const fn pages(&self) -> u64 {
        self.pages
    }

    /// Page number this envelope holds.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Consume the envelope, returning the items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Convert each item while keeping the counts.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            pages: self.pages,
            current_page: self.current_page,
        }
    }
}
