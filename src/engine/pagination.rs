//! Fixed-size page slicing.

use serde::Serialize;

pub const PAGE_SIZE: usize = 20;

/// A 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest(u32);

impl PageRequest {
    pub const FIRST: PageRequest = PageRequest(1);

    pub fn new(page: u32) -> Option<PageRequest> {
        (page >= 1).then_some(PageRequest(page))
    }

    pub fn number(self) -> u32 {
        self.0
    }

    pub fn start_index(self) -> usize {
        (self.0 as usize - 1) * PAGE_SIZE
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::FIRST
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Whether items exist past this page, judged on the unsliced sequence.
    pub has_more: bool,
    pub total: usize,
}

pub fn paginate<T>(items: Vec<T>, page: PageRequest) -> Page<T> {
    let total = items.len();
    let start = page.start_index();
    let end = start.saturating_add(PAGE_SIZE);
    let items = items.into_iter().skip(start).take(PAGE_SIZE).collect();
    Page {
        items,
        has_more: end < total,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_rejects_zero() {
        assert!(PageRequest::new(0).is_none());
        assert_eq!(PageRequest::new(3).map(PageRequest::number), Some(3));
        assert_eq!(PageRequest::default(), PageRequest::FIRST);
    }

    #[test]
    fn test_first_page() {
        let page = paginate((0..45).collect::<Vec<i32>>(), PageRequest::FIRST);
        assert_eq!(page.items, (0..20).collect::<Vec<_>>());
        assert!(page.has_more);
        assert_eq!(page.total, 45);
    }

    #[test]
    fn test_last_partial_page() {
        let page = paginate((0..45).collect::<Vec<i32>>(), PageRequest::new(3).unwrap());
        assert_eq!(page.items, (40..45).collect::<Vec<_>>());
        assert!(!page.has_more);
    }

    #[test]
    fn test_exact_multiple_has_no_more() {
        let page = paginate((0..40).collect::<Vec<i32>>(), PageRequest::new(2).unwrap());
        assert_eq!(page.items.len(), 20);
        assert!(!page.has_more);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let page = paginate((0..5).collect::<Vec<i32>>(), PageRequest::new(9).unwrap());
        assert!(page.items.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn test_pages_concatenate_to_the_sequence() {
        for len in [0usize, 1, 19, 20, 21, 59, 60, 61, 137] {
            let sequence: Vec<usize> = (0..len).collect();
            let mut rebuilt = Vec::new();
            let mut number = 1;
            loop {
                let page = paginate(sequence.clone(), PageRequest::new(number).unwrap());
                rebuilt.extend(page.items);
                if !page.has_more {
                    break;
                }
                number += 1;
            }
            assert_eq!(rebuilt, sequence, "len = {}", len);
        }
    }
}
