//! Response envelopes returned by the backend.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Pagination metadata of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(alias = "limit", default = "default_page_size")]
    pub page_size: u32,
    #[serde(alias = "items", alias = "total", default)]
    pub total_items: u64,
    #[serde(alias = "pages", default)]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_items: 0,
            total_pages: 0,
        }
    }
}

impl Pagination {
    pub fn new(page: u32, page_size: u32, total_items: u64) -> Self {
        Self {
            page,
            page_size,
            total_items,
            total_pages: pages_for(total_items, page_size),
        }
    }

    /// Page (1-based) an item at zero-based `index` lands on.
    pub fn page_of_index(&self, index: u64) -> Option<u32> {
        if self.page_size == 0 {
            return None;
        }
        u32::try_from(index / u64::from(self.page_size) + 1).ok()
    }

    /// Whether an item added at the end of the list belongs on the page
    /// currently held.
    pub fn accepts_appended(&self) -> bool {
        self.page_of_index(self.total_items) == Some(self.page)
    }

    pub fn record_added(&mut self) {
        self.total_items += 1;
        self.total_pages = pages_for(self.total_items, self.page_size);
    }

    pub fn record_removed(&mut self) {
        self.total_items = self.total_items.saturating_sub(1);
        self.total_pages = pages_for(self.total_items, self.page_size);
    }
}

fn pages_for(total_items: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_items.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// `{ "data": [...], "meta_data": {...} }`
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default, alias = "pagination")]
    pub meta_data: Option<Pagination>,
}

/// `{ "data": {...}, "message": "..." }`
#[derive(Debug, Clone, Deserialize)]
pub struct ItemResponse<T> {
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of mutations that only acknowledge, and of error responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}
