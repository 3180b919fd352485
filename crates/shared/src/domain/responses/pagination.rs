use crate::domain::requests::MAX_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl Pagination {
    /// Resolves a raw page request against the item count.
    ///
    /// A page that is not an integer becomes the first page; an integer
    /// outside `1..=total_pages` becomes the last page. An empty listing
    /// still has one (empty) page. `page_size` is clamped to
    /// `1..=MAX_PAGE_SIZE`.
    pub fn resolve(raw_page: Option<&str>, page_size: i64, total_items: i64) -> Self {
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let total_items = total_items.max(0);
        let remainder = i64::from(total_items % page_size != 0);
        let total_pages = (total_items / page_size + remainder).max(1);

        let page = match raw_page.and_then(|p| p.trim().parse::<i64>().ok()) {
            None => 1,
            Some(p) if (1..=total_pages).contains(&p) => p,
            Some(_) => total_pages,
        };

        Self {
            page,
            page_size,
            total_items,
            total_pages,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_integer_page_falls_back_to_first() {
        assert_eq!(Pagination::resolve(Some("abc"), 2, 9).page, 1);
        assert_eq!(Pagination::resolve(None, 2, 9).page, 1);
    }

    #[test]
    fn out_of_range_page_falls_back_to_last() {
        let pagination = Pagination::resolve(Some("42"), 2, 9);

        assert_eq!(pagination.total_pages, 5);
        assert_eq!(pagination.page, 5);
        assert_eq!(pagination.offset(), 8);
        assert_eq!(Pagination::resolve(Some("0"), 2, 9).page, 5);
    }

    #[test]
    fn empty_listing_has_one_page() {
        let pagination = Pagination::resolve(Some("3"), 2, 0);

        assert_eq!(pagination.total_pages, 1);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn huge_page_size_is_clamped() {
        let pagination = Pagination::resolve(Some("3"), i64::MAX, 5);

        assert_eq!(pagination.page_size, MAX_PAGE_SIZE);
        assert_eq!(pagination.total_pages, 1);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn huge_item_count_does_not_overflow() {
        let pagination = Pagination::resolve(Some("-1"), MAX_PAGE_SIZE, i64::MAX);

        assert_eq!(pagination.total_pages, i64::MAX / MAX_PAGE_SIZE + 1);
        assert_eq!(pagination.page, pagination.total_pages);
        assert!(pagination.offset() < i64::MAX);
    }
}
