//! Offset pagination: one materialized page plus metadata

use serde::Serialize;

/// Pagination metadata computed from the pre-pagination total count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Total number of items after filtering, before slicing
    pub total_count: usize,

    /// Number of items per page
    pub page_size: usize,

    /// Current page number (starts at 1)
    pub current_page: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether a page exists after the current one
    pub has_next: bool,

    /// Whether a page exists before the current one
    pub has_previous: bool,
}

impl PageMeta {
    /// Compute metadata from the raw figures.
    ///
    /// `page_size` is forced to at least 1 to avoid division by zero; the
    /// request layer clamps it before it reaches this point.
    pub fn new(total_count: usize, current_page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_count.div_ceil(page_size);

        Self {
            total_count,
            page_size,
            current_page,
            total_pages,
            has_next: current_page < total_pages,
            has_previous: current_page > 1,
        }
    }
}

/// One materialized page of an ordered result set
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: usize, current_page: usize, page_size: usize) -> Self {
        Self {
            items,
            meta: PageMeta::new(total_count, current_page, page_size),
        }
    }

    /// Transform the items while keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Upstream paging limits applied to client-supplied parameters
#[derive(Debug, Clone, Copy)]
pub struct PagingPolicy {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for PagingPolicy {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 20,
        }
    }
}

impl PagingPolicy {
    /// Resolve a requested page size against this policy
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size)
    }
}
