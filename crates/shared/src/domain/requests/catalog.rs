use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

pub const DEFAULT_PAGE_SIZE: i64 = 2;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
pub struct FindAllProducts {
    /// Case-insensitive search over product name and description.
    #[serde(default)]
    pub q: Option<String>,

    /// Raw page number. Anything that is not an integer resolves to page 1.
    #[serde(default)]
    pub page: Option<String>,

    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl FindAllProducts {
    pub fn search(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    pub fn page_size(&self) -> i64 {
        if self.page_size > 0 {
            self.page_size.min(MAX_PAGE_SIZE)
        } else {
            DEFAULT_PAGE_SIZE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::responses::Pagination;

    #[test]
    fn page_size_from_query_is_bounded() {
        let huge = FindAllProducts {
            page_size: i64::MAX,
            ..Default::default()
        };
        let negative = FindAllProducts {
            page_size: -4,
            ..Default::default()
        };

        assert_eq!(huge.page_size(), MAX_PAGE_SIZE);
        assert_eq!(negative.page_size(), DEFAULT_PAGE_SIZE);

        let pagination = Pagination::resolve(Some("3"), huge.page_size(), 5);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.offset(), 0);
    }
}
