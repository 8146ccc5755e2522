use serde::Serialize;

use super::engine::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// One window of a filtered query. `total` counts every match of the
/// filter, independent of the window, so `items.len() <= page_size`
/// and all pages of the same query report the same total.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> i64 {
        if self.page_size <= 0 {
            return 0;
        }
        (self.total + self.page_size - 1) / self.page_size
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
        }
    }

    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(Page { items, page: self.page, page_size: self.page_size, total: self.total })
    }
}

/// Non-positive page numbers and sizes clamp to 1; absent values take
/// the defaults.
pub(crate) fn normalize_window(page: Option<i64>, page_size: Option<i64>) -> (i64, i64) {
    (page.unwrap_or(DEFAULT_PAGE).max(1), page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_defaults_and_clamps() {
        assert_eq!(normalize_window(None, None), (1, 10));
        assert_eq!(normalize_window(Some(3), Some(25)), (3, 25));
        assert_eq!(normalize_window(Some(0), Some(0)), (1, 1));
        assert_eq!(normalize_window(Some(-4), Some(-1)), (1, 1));
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::<()> { items: vec![], page: 1, page_size: 10, total: 31 };
        assert_eq!(page.total_pages(), 4);
        let page = Page::<()> { items: vec![], page: 1, page_size: 10, total: 30 };
        assert_eq!(page.total_pages(), 3);
        let page = Page::<()> { items: vec![], page: 1, page_size: 10, total: 0 };
        assert_eq!(page.total_pages(), 0);
    }

    #[test]
    fn map_preserves_the_window() {
        let page = Page { items: vec![1, 2], page: 2, page_size: 2, total: 5 };
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20]);
        assert_eq!(mapped.page, 2);
        assert_eq!(mapped.total, 5);
    }
}
