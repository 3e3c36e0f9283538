//! Pagination envelope returned by listing endpoints.

use serde::{Deserialize, Serialize};

/// Cursor block inside a page response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pageable {
    /// Zero-based index of this page.
    pub page_number: u32,
    /// Requested page size.
    pub page_size: u32,
}

/// One page of results.
///
/// Listing endpoints wrap their items in this envelope; `last` drives
/// incremental loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The items on this page.
    pub content: Vec<T>,
    /// Where this page sits in the result set.
    pub pageable: Pageable,
    /// Total items across all pages.
    pub total_elements: u64,
    /// Total number of pages.
    pub total_pages: u32,
    /// True when this is the final page.
    pub last: bool,
    /// True when this is the first page.
    pub first: bool,
    /// True when this page holds no items.
    pub empty: bool,
}

impl<T> Page<T> {
    /// True when another page follows this one.
    pub fn has_more(&self) -> bool {
        !self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_envelope() {
        let json = r#"{
            "content": ["a", "b"],
            "pageable": { "pageNumber": 0, "pageSize": 10 },
            "totalElements": 12,
            "totalPages": 2,
            "last": false,
            "first": true,
            "empty": false
        }"#;
        let page: Page<String> = serde_json::from_str(json).unwrap();
        assert_eq!(page.content, vec!["a", "b"]);
        assert_eq!(page.pageable.page_number, 0);
        assert!(page.has_more());
    }

    #[test]
    fn last_page_has_no_more() {
        let page = Page::<String> {
            content: vec![],
            pageable: Pageable {
                page_number: 1,
                page_size: 10,
            },
            total_elements: 12,
            total_pages: 2,
            last: true,
            first: false,
            empty: true,
        };
        assert!(!page.has_more());
    }
}
