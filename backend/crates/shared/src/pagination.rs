//! Page-based listing
//!
//! [`paginate`] is the only place page arithmetic happens. Listing endpoints
//! decode `page` / `size` with [`PageQuery`], hand the resulting
//! [`PageRequest`] to storage as `LIMIT` / `OFFSET`, and wrap the rows and the
//! total count in a [`Page`] envelope.
//!
//! The rows and the count come from two separate queries, so a concurrent
//! insert or delete between them can make `totalItems` disagree with `data`.

use serde::{Deserialize, Serialize};

/// Page size used when the `size` query parameter is absent
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on the page size a client can request
pub const MAX_PAGE_SIZE: i64 = 100;

/// Navigation metadata derived from page number, page size and total count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page_number: i64,
    pub page_size: i64,
    pub offset: i64,
    pub total_pages: i64,
    pub next_page: Option<i64>,
    pub prev_page: Option<i64>,
}

/// Compute offset and neighbouring pages.
///
/// Non-positive page numbers and page sizes are treated as 1, a negative
/// total as 0. Never fails.
///
/// ```
/// use kernel::pagination::paginate;
///
/// let info = paginate(2, 10, 25);
/// assert_eq!(info.offset, 10);
/// assert_eq!(info.total_pages, 3);
/// assert_eq!(info.next_page, Some(3));
/// assert_eq!(info.prev_page, Some(1));
/// ```
pub fn paginate(page_number: i64, page_size: i64, total_items: i64) -> PageInfo {
    let page_number = page_number.max(1);
    let page_size = page_size.max(1);
    let total_items = total_items.max(0);

    let offset = (page_number - 1).saturating_mul(page_size);
    let total_pages = total_items / page_size + i64::from(total_items % page_size != 0);

    PageInfo {
        page_number,
        page_size,
        offset,
        total_pages,
        next_page: (page_number < total_pages).then(|| page_number + 1),
        prev_page: (page_number > 1).then(|| page_number - 1),
    }
}

/// Raw `page` / `size` query parameters
///
/// Kept as strings so that `?page=abc` is coerced instead of rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub size: Option<String>,
}

impl PageQuery {
    pub fn resolve(&self) -> PageRequest {
        let page_number = match self.page.as_deref() {
            None => 1,
            Some(raw) => parse_positive(raw),
        };
        let page_size = match self.size.as_deref() {
            None => DEFAULT_PAGE_SIZE,
            Some(raw) => parse_positive(raw),
        };
        PageRequest::new(page_number, page_size)
    }
}

fn parse_positive(raw: &str) -> i64 {
    raw.trim().parse::<i64>().ok().filter(|n| *n > 0).unwrap_or(1)
}

/// A validated page request: both fields are at least 1 and the size is capped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: i64,
    page_size: i64,
}

impl PageRequest {
    pub fn new(page_number: i64, page_size: i64) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// SQL `LIMIT`
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// SQL `OFFSET`
    pub fn offset(&self) -> i64 {
        paginate(self.page_number, self.page_size, 0).offset
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// Listing response envelope
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page_number: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
    pub next_page: Option<i64>,
    pub prev_page: Option<i64>,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, request: PageRequest, total_items: i64) -> Self {
        let info = paginate(request.page_number(), request.page_size(), total_items);
        Self {
            data,
            page_number: info.page_number,
            page_size: info.page_size,
            total_items: total_items.max(0),
            total_pages: info.total_pages,
            next_page: info.next_page,
            prev_page: info.prev_page,
        }
    }

    /// Convert the rows while keeping the navigation metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
            next_page: self.next_page,
            prev_page: self.prev_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page() {
        let info = paginate(2, 10, 25);
        assert_eq!(info.offset, 10);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.next_page, Some(3));
        assert_eq!(info.prev_page, Some(1));
    }

    #[test]
    fn test_single_partial_page() {
        let info = paginate(1, 10, 5);
        assert_eq!(info.offset, 0);
        assert_eq!(info.total_pages, 1);
        assert_eq!(info.next_page, None);
        assert_eq!(info.prev_page, None);
    }

    #[test]
    fn test_last_page_has_no_next() {
        let info = paginate(3, 10, 25);
        assert_eq!(info.offset, 20);
        assert_eq!(info.next_page, None);
        assert_eq!(info.prev_page, Some(2));
    }

    #[test]
    fn test_empty_listing_has_zero_pages() {
        let info = paginate(1, 10, 0);
        assert_eq!(info.total_pages, 0);
        assert_eq!(info.next_page, None);
        assert_eq!(info.prev_page, None);
    }

    #[test]
    fn test_exact_multiple() {
        assert_eq!(paginate(1, 10, 30).total_pages, 3);
        assert_eq!(paginate(1, 10, 31).total_pages, 4);
    }

    #[test]
    fn test_non_positive_inputs_behave_as_one() {
        for (page, size) in [(0, 0), (-1, 0), (0, -5), (-7, -7)] {
            assert_eq!(paginate(page, size, 25), paginate(1, 1, 25), "({page}, {size})");
        }
        assert_eq!(paginate(-3, 10, 25), paginate(1, 10, 25));
        assert_eq!(paginate(2, 0, 25), paginate(2, 1, 25));
    }

    #[test]
    fn test_huge_page_number_does_not_overflow() {
        let info = paginate(i64::MAX, MAX_PAGE_SIZE, 10);
        assert_eq!(info.offset, i64::MAX);
        assert_eq!(info.next_page, None);
    }

    #[test]
    fn test_query_defaults() {
        let request = PageQuery::default().resolve();
        assert_eq!(request.page_number(), 1);
        assert_eq!(request.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_query_coerces_garbage_to_one() {
        let query = PageQuery {
            page: Some("abc".into()),
            size: Some("-20".into()),
        };
        let request = query.resolve();
        assert_eq!(request.page_number(), 1);
        assert_eq!(request.page_size(), 1);
    }

    #[test]
    fn test_query_caps_page_size() {
        let query = PageQuery {
            page: Some("3".into()),
            size: Some("100000".into()),
        };
        let request = query.resolve();
        assert_eq!(request.limit(), MAX_PAGE_SIZE);
        assert_eq!(request.offset(), 2 * MAX_PAGE_SIZE);
    }

    #[test]
    fn test_envelope_serialization() {
        let page = Page::new(vec!["a", "b", "c", "d", "e"], PageRequest::new(3, 10), 25);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["pageNumber"], 3);
        assert_eq!(json["pageSize"], 10);
        assert_eq!(json["totalItems"], 25);
        assert_eq!(json["totalPages"], 3);
        assert!(json["nextPage"].is_null());
        assert_eq!(json["prevPage"], 2);
        assert_eq!(json["data"].as_array().unwrap().len(), 5);
    }
}
