//! Paging
//!
//! One-based page requests and the `{ total, rows }` shape the grid widgets read.

use serde::Serialize;

use crate::error::{ConsoleError, ConsoleResult};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 500;

/// Validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Build from optional query values; `page` is one-based
    pub fn new(page: Option<u32>, size: Option<u32>) -> ConsoleResult<Self> {
        let page = page.unwrap_or(1);
        let size = size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page == 0 {
            return Err(ConsoleError::InvalidPaging("page starts at 1".to_string()));
        }
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(ConsoleError::InvalidPaging(format!(
                "rows must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok(Self { page, size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of items before this page
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.size as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus the overall count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub total_count: u64,
    pub results: Vec<T>,
}

impl<T: Clone> Page<T> {
    /// Slice a full in-memory listing
    pub fn slice(items: &[T], request: &PageRequest) -> Self {
        let results = items
            .iter()
            .skip(request.offset())
            .take(request.size() as usize)
            .cloned()
            .collect();
        Self {
            total_count: items.len() as u64,
            results,
        }
    }
}

/// Grid payload: `{ "total": n, "rows": [...] }`
#[derive(Debug, Clone, Serialize)]
pub struct GridPage<T> {
    pub total: u64,
    pub rows: Vec<T>,
}

impl<T> From<Page<T>> for GridPage<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            total: page.total_count,
            rows: page.results,
        }
    }
}
