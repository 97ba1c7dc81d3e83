use serde::{Deserialize, Serialize};

/// One page of a paginated listing.
///
/// `page` is 1-based. Repositories clamp out-of-range requests to the last
/// page rather than returning an empty page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// An empty first page, used when a listing has no rows at all.
    pub fn empty(page_size: u64) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            page_size,
            total_items: 0,
            total_pages: 0,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Map the items while keeping the page geometry.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_navigation_flags() {
        let page = Page {
            items: vec![1, 2, 3],
            page: 2,
            page_size: 3,
            total_items: 8,
            total_pages: 3,
        };

        assert!(page.has_prev());
        assert!(page.has_next());

        let last = Page { page: 3, ..page };
        assert!(!last.has_next());
    }

    #[test]
    fn test_empty_page() {
        let page: Page<u32> = Page::empty(10);
        assert!(page.items.is_empty());
        assert!(!page.has_prev());
        assert!(!page.has_next());
    }
}
