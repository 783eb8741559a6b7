//! Page arithmetic and result metadata

use serde::Serialize;

/// One page of a filtered, ordered result set
///
/// `total` counts every match before slicing; `pages` is at least 1 even
/// for an empty result; `page_of` is the page actually returned, clamped
/// into `[1, pages]`; `size` is the number of records in this page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPage<T> {
    pub records: Vec<T>,
    pub total: usize,
    pub page_of: usize,
    pub pages: usize,
    pub size: usize,
}

/// Slice an ordered match list into the requested page
pub(crate) fn paginate<T>(matches: Vec<T>, page: usize, limit: usize) -> ResultPage<T> {
    let limit = limit.max(1);
    let total = matches.len();
    let pages = total.div_ceil(limit).max(1);
    let page_of = page.clamp(1, pages);

    let records: Vec<T> = matches
        .into_iter()
        .skip((page_of - 1) * limit)
        .take(limit)
        .collect();
    let size = records.len();

    ResultPage {
        records,
        total,
        page_of,
        pages,
        size,
    }
}
