// ==========================================
// Club Attendance - page/limit slicing
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// Slice `items` into a 1-based page.
///
/// # Arguments
/// - page: 1-based; 0 is treated as 1
/// - limit: clamped to `1..=max_limit`
///
/// A page past the end yields no items but keeps the totals.
pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize, max_limit: usize) -> Page<T> {
    let page = page.max(1);
    let limit = limit.clamp(1, max_limit.max(1));
    let total = items.len();
    let total_pages = total.div_ceil(limit);

    let items: Vec<T> = items
        .into_iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .collect();

    Page {
        items,
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page() {
        let page = paginate((1..=45).collect(), 2, 20, 100);
        assert_eq!(page.items.first(), Some(&21));
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.has_next);
        assert!(page.pagination.has_prev);
    }

    #[test]
    fn test_limits_are_clamped() {
        let page = paginate((1..=10).collect::<Vec<i32>>(), 0, 500, 4);
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.limit, 4);
        assert_eq!(page.items, vec![1, 2, 3, 4]);

        let page = paginate((1..=10).collect::<Vec<i32>>(), 1, 0, 100);
        assert_eq!(page.pagination.limit, 1);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = paginate(vec!['a', 'b'], 5, 20, 100);
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total, 2);
        assert!(!page.pagination.has_next);
    }
}
