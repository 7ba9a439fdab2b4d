use serde::{Deserialize, Serialize};

/// Fixed listing page size.
pub const PER_PAGE: u64 = 20;

/// Highest page a listing will ask a store for. Offsets stay well inside
/// `u64` and `usize` on 64-bit targets.
pub const MAX_PAGE: u64 = u32::MAX as u64;

/// A 1-based page number, clamped to `1..=MAX_PAGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest(u64);

impl PageRequest {
    pub fn new(page: u64) -> Self {
        Self(page.clamp(1, MAX_PAGE))
    }

    pub fn number(self) -> u64 {
        self.0
    }

    /// Zero-based page index, for stores that count from zero.
    pub fn index(self) -> u64 {
        self.0 - 1
    }

    pub fn offset(self) -> u64 {
        self.index().saturating_mul(PER_PAGE)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self(1)
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.number(),
            per_page: PER_PAGE,
            total,
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.per_page)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_zero_is_first_page() {
        let request = PageRequest::new(0);
        assert_eq!(request.number(), 1);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_offset_uses_fixed_page_size() {
        assert_eq!(PageRequest::new(3).offset(), 40);
    }

    #[test]
    fn test_huge_page_is_clamped() {
        let request = PageRequest::new(u64::MAX);
        assert_eq!(request.number(), MAX_PAGE);
        assert_eq!(request.offset(), (MAX_PAGE - 1) * PER_PAGE);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page: Page<u8> = Page::new(vec![], PageRequest::new(1), 41);
        assert_eq!(page.total_pages(), 3);
    }
}
