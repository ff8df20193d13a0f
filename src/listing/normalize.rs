//! Normalization of the backend's inconsistent page shapes.
//!
//! Some endpoints report an exact item count, others only the number of pages
//! and the page size. Everything is turned into `(items, TotalCount)` here.

use serde::Serialize;

/// One page as a [`super::PageSource`] received it, before normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct RawPage<T> {
    pub items: Vec<T>,
    pub total_count: Option<usize>,
    pub total_pages: Option<usize>,
    pub items_per_page: Option<usize>,
}

impl<T> RawPage<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            total_count: None,
            total_pages: None,
            items_per_page: None,
        }
    }

    pub fn total_count(mut self, total: Option<usize>) -> Self {
        self.total_count = total;
        self
    }

    pub fn total_pages(mut self, pages: Option<usize>) -> Self {
        self.total_pages = pages;
        self
    }

    pub fn items_per_page(mut self, per_page: Option<usize>) -> Self {
        self.items_per_page = per_page;
        self
    }
}

/// Number of records matching the applied filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TotalCount {
    Exact(usize),
    /// Upper bound derived from `pages × page size`.
    Approximate(usize),
}

impl TotalCount {
    pub fn value(self) -> usize {
        match self {
            TotalCount::Exact(n) | TotalCount::Approximate(n) => n,
        }
    }

    pub fn is_approximate(self) -> bool {
        matches!(self, TotalCount::Approximate(_))
    }
}

impl Default for TotalCount {
    fn default() -> Self {
        TotalCount::Exact(0)
    }
}

/// Normalized page handed to the list controller.
#[derive(Clone, Debug, PartialEq)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: TotalCount,
}

/// Derives the total count.
///
/// An explicit item count wins. Otherwise `total_pages × items_per_page` is
/// used as an approximation, with `requested_page_size` standing in for a
/// missing page size. With neither, the page's own length is all we know.
pub fn normalize<T>(raw: RawPage<T>, requested_page_size: usize) -> PageResponse<T> {
    let total = match (raw.total_count, raw.total_pages) {
        (Some(count), _) => TotalCount::Exact(count),
        (None, Some(pages)) if pages > 0 => {
            let per_page = raw
                .items_per_page
                .filter(|n| *n > 0)
                .unwrap_or(requested_page_size);
            TotalCount::Approximate(pages.saturating_mul(per_page))
        }
        _ => TotalCount::Exact(raw.items.len()),
    };

    PageResponse {
        items: raw.items,
        total,
    }
}

/// Text such as `11–20 of 42` or `11–20 of approx. 60`.
pub fn displayed_rows_label(
    page_index: usize,
    page_size: usize,
    item_count: usize,
    total: TotalCount,
) -> String {
    let total_text = match total {
        TotalCount::Exact(n) => n.to_string(),
        TotalCount::Approximate(n) => format!("approx. {n}"),
    };
    if item_count == 0 {
        return format!("0–0 of {total_text}");
    }
    let from = page_index.saturating_mul(page_size).saturating_add(1);
    let to = from.saturating_add(item_count - 1);
    format!("{from}–{to} of {total_text}")
}
