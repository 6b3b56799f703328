/// Pagination primitives
///
/// Pages are 1-based on the wire; `PageRequest::offset` converts to the
/// 0-based row offset the store needs.

use serde::{Deserialize, Serialize};

/// Requested page (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Number of rows to skip
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.size)
    }
}

/// One page of results plus totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let total_pages = if request.size == 0 {
            0
        } else {
            total_elements.div_ceil(u64::from(request.size)) as u32
        };

        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
        }
    }
}
