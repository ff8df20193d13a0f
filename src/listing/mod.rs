//! Paginated-list controller shared by every listing screen.
//!
//! A [`ListController`] owns the page index, page size, filter draft, applied
//! filters, loading/error flags and the current page of records. Screens only
//! provide a [`PageSource`] that knows how to turn a [`PageRequest`] into a
//! backend call.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::pagination::page_window;
use crate::repository::errors::RepositoryResult;

pub mod confirm;
pub mod mutation;
pub mod normalize;

pub use normalize::{PageResponse, RawPage, TotalCount, displayed_rows_label, normalize};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;
/// Highest 0-based page index a screen may ask for.
pub const MAX_PAGE_INDEX: usize = 100_000;
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];

/// Filter key holding the sort column.
pub const SORT_FIELD_KEY: &str = "sortBy";
/// Filter key holding the sort direction flag.
pub const SORT_DESC_KEY: &str = "isDesc";

/// Records with a stable identity used for table keys and in-place patches.
pub trait Identified {
    fn identity(&self) -> String;
}

/// Value of a single filter control.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterValue {
    #[default]
    Empty,
    Text(String),
    Number(i64),
    Flag(bool),
}

impl FilterValue {
    /// Interprets raw form input: blank is empty, then bool, integer, text.
    pub fn from_input(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return FilterValue::Empty;
        }
        match trimmed {
            "true" => return FilterValue::Flag(true),
            "false" => return FilterValue::Flag(false),
            _ => {}
        }
        match trimmed.parse::<i64>() {
            Ok(number) => FilterValue::Number(number),
            Err(_) => FilterValue::Text(trimmed.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FilterValue::Empty)
    }

    /// Query-string rendering; `None` for empty values so they are omitted.
    pub fn as_query_value(&self) -> Option<String> {
        match self {
            FilterValue::Empty => None,
            FilterValue::Text(text) => Some(text.clone()),
            FilterValue::Number(number) => Some(number.to_string()),
            FilterValue::Flag(flag) => Some(flag.to_string()),
        }
    }
}

/// Mapping of filter name to value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters(BTreeMap<String, FilterValue>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: FilterValue) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: FilterValue) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key)
    }

    /// Non-empty value of `key` rendered for a query string.
    pub fn query_value(&self, key: &str) -> Option<String> {
        self.get(key).and_then(FilterValue::as_query_value)
    }

    pub fn number(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            FilterValue::Number(number) => Some(*number),
            FilterValue::Text(text) => text.parse().ok(),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            FilterValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Shallow merge: every key of `patch` overwrites the same key here.
    pub fn merge(&mut self, patch: Filters) {
        self.0.extend(patch.0);
    }

    /// `true` when there are no keys at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `true` when every value is empty.
    pub fn is_blank(&self) -> bool {
        self.0.values().all(FilterValue::is_empty)
    }

    /// Non-empty pairs, for templates and query building.
    pub fn active(&self) -> impl Iterator<Item = (&str, String)> {
        self.0
            .iter()
            .filter_map(|(key, value)| value.as_query_value().map(|v| (key.as_str(), v)))
    }
}

impl FromIterator<(String, FilterValue)> for Filters {
    fn from_iter<I: IntoIterator<Item = (String, FilterValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Everything a source needs to fetch one page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// 0-based page index as the console tracks it.
    pub page_index: usize,
    pub page_size: usize,
    pub filters: Filters,
}

impl PageRequest {
    /// 1-based page number expected by the backend.
    pub fn page_number(&self) -> usize {
        self.page_index.saturating_add(1)
    }
}

/// Fetches one page of `T` records for a request.
#[async_trait]
pub trait PageSource<T: Send>: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> RepositoryResult<RawPage<T>>;
}

/// Serializable part of a controller, persisted between page loads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListState {
    pub page_index: usize,
    pub page_size: usize,
    pub draft: Filters,
    pub applied: Filters,
    pub defaults: Filters,
}

impl ListState {
    pub fn new(page_size: usize, defaults: Filters) -> Self {
        Self {
            page_index: 0,
            page_size: clamp_page_size(page_size),
            draft: defaults.clone(),
            applied: defaults.clone(),
            defaults,
        }
    }
}

fn clamp_page_size(size: usize) -> usize {
    size.clamp(1, MAX_PAGE_SIZE)
}

fn clamp_page_index(index: usize) -> usize {
    index.min(MAX_PAGE_INDEX)
}

/// Fetch lifecycle for one listing screen.
#[derive(Debug)]
pub struct ListController<T> {
    state: ListState,
    items: Vec<T>,
    total: TotalCount,
    in_flight: usize,
    error: Option<String>,
}

impl<T> ListController<T> {
    pub fn new(page_size: usize) -> Self {
        Self::from_state(ListState::new(page_size, Filters::new()))
    }

    /// Controller whose reset target is `defaults` instead of an empty mapping.
    pub fn with_defaults(page_size: usize, defaults: Filters) -> Self {
        Self::from_state(ListState::new(page_size, defaults))
    }

    pub fn from_state(mut state: ListState) -> Self {
        state.page_index = clamp_page_index(state.page_index);
        state.page_size = clamp_page_size(state.page_size);
        Self {
            state,
            items: Vec::new(),
            total: TotalCount::default(),
            in_flight: 0,
            error: None,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn into_state(self) -> ListState {
        self.state
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total(&self) -> TotalCount {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn page_index(&self) -> usize {
        self.state.page_index
    }

    pub fn page_size(&self) -> usize {
        self.state.page_size
    }

    pub fn draft(&self) -> &Filters {
        &self.state.draft
    }

    pub fn applied(&self) -> &Filters {
        &self.state.applied
    }

    /// Shallow-merges `patch` into the draft. Applied filters are untouched.
    pub fn set_filter_draft(&mut self, patch: Filters) {
        self.state.draft.merge(patch);
    }

    /// Promotes the draft to the applied filters and returns to the first page.
    pub fn apply_filters(&mut self) {
        self.state.applied = self.state.draft.clone();
        self.state.page_index = 0;
    }

    /// Restores draft and applied filters to the defaults, first page.
    pub fn reset_filters(&mut self) {
        self.state.draft = self.state.defaults.clone();
        self.state.applied = self.state.defaults.clone();
        self.state.page_index = 0;
    }

    pub fn set_page(&mut self, index: usize) {
        self.state.page_index = clamp_page_index(index);
    }

    /// Changes the page size; always returns to the first page.
    pub fn set_page_size(&mut self, size: usize) {
        self.state.page_size = clamp_page_size(size);
        self.state.page_index = 0;
    }

    /// Sorts by `field`, flipping the direction when it is already the sort column.
    ///
    /// Counts as an explicit submission: draft and applied both change.
    pub fn sort_by(&mut self, field: &str) {
        let same_field = self.state.applied.query_value(SORT_FIELD_KEY).as_deref() == Some(field);
        let descending = if same_field {
            !self.state.applied.flag(SORT_DESC_KEY).unwrap_or(true)
        } else {
            true
        };
        let patch = Filters::new()
            .with(SORT_FIELD_KEY, FilterValue::Text(field.to_string()))
            .with(SORT_DESC_KEY, FilterValue::Flag(descending));
        self.state.draft.merge(patch.clone());
        self.state.applied.merge(patch);
        self.state.page_index = 0;
    }

    /// Snapshot of what the next fetch will ask for.
    pub fn request(&self) -> PageRequest {
        PageRequest {
            page_index: self.state.page_index,
            page_size: self.state.page_size,
            filters: self.state.applied.clone(),
        }
    }

    /// Marks a fetch as started and returns its request.
    ///
    /// Concurrent fetches are neither merged nor cancelled.
    pub fn begin_fetch(&mut self) -> PageRequest {
        self.in_flight += 1;
        self.error = None;
        self.request()
    }

    /// Stores the outcome of a fetch started with [`Self::begin_fetch`].
    ///
    /// Whichever call comes last wins, regardless of issue order. Items and
    /// total are replaced together; a failure clears both.
    pub fn finish_fetch(&mut self, request: &PageRequest, result: RepositoryResult<RawPage<T>>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match result {
            Ok(raw) => {
                let page = normalize(raw, request.page_size);
                self.items = page.items;
                self.total = page.total;
                self.error = None;
            }
            Err(err) => {
                self.items = Vec::new();
                self.total = TotalCount::Exact(0);
                self.error = Some(err.user_message("Failed to load data."));
            }
        }
    }

    /// Issues one request through `source` and stores the result.
    pub async fn fetch<S>(&mut self, source: &S)
    where
        S: PageSource<T> + ?Sized,
        T: Send,
    {
        let request = self.begin_fetch();
        let result = source.fetch_page(&request).await;
        self.finish_fetch(&request, result);
    }

    /// Text such as `1–20 of approx. 60` for the current page.
    pub fn rows_label(&self) -> String {
        displayed_rows_label(
            self.state.page_index,
            self.state.page_size,
            self.items.len(),
            self.total,
        )
    }

    /// Number of pages implied by the total count.
    pub fn page_count(&self) -> usize {
        self.total.value().div_ceil(self.state.page_size)
    }
}

impl<T: Identified> ListController<T> {
    /// Updates the row with the given identity in place. Returns whether it was found.
    pub fn patch_item<F>(&mut self, identity: &str, patch: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        match self
            .items
            .iter_mut()
            .find(|item| item.identity() == identity)
        {
            Some(item) => {
                patch(item);
                true
            }
            None => false,
        }
    }
}

/// Template-facing snapshot of a controller.
#[derive(Debug, Serialize)]
pub struct ListView<'a, T: Serialize> {
    pub items: &'a [T],
    pub page_index: usize,
    pub page_size: usize,
    pub page_size_options: &'static [usize],
    pub total: usize,
    pub approximate: bool,
    pub rows_label: String,
    pub loading: bool,
    pub error: Option<&'a str>,
    pub draft: BTreeMap<&'a str, String>,
    pub applied: BTreeMap<&'a str, String>,
    /// Page links as 0-based indexes; `None` marks a gap.
    pub pages: Vec<Option<usize>>,
}

impl<'a, T: Serialize> ListView<'a, T> {
    pub fn new(list: &'a ListController<T>) -> Self {
        Self {
            items: list.items(),
            page_index: list.page_index(),
            page_size: list.page_size(),
            page_size_options: &PAGE_SIZE_OPTIONS,
            total: list.total().value(),
            approximate: list.total().is_approximate(),
            rows_label: list.rows_label(),
            loading: list.is_loading(),
            error: list.error(),
            draft: list.draft().active().collect(),
            applied: list.applied().active().collect(),
            pages: page_window(list.page_count(), list.page_index()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: u32,
        status: &'static str,
    }

    impl Identified for Row {
        fn identity(&self) -> String {
            self.id.to_string()
        }
    }

    fn rows(ids: &[u32]) -> Vec<Row> {
        ids.iter()
            .map(|id| Row {
                id: *id,
                status: "pending",
            })
            .collect()
    }

    fn text(value: &str) -> FilterValue {
        FilterValue::Text(value.to_string())
    }

    #[test]
    fn draft_changes_do_not_reach_the_request() {
        let mut list: ListController<Row> = ListController::new(10);
        let before = list.request();

        list.set_filter_draft(Filters::new().with("email", text("ann@")));
        list.set_filter_draft(Filters::new().with("role", text("Admin")));

        assert_eq!(list.request(), before);
        assert_eq!(list.draft().query_value("email").as_deref(), Some("ann@"));
        assert!(list.applied().is_empty());
    }

    #[test]
    fn apply_promotes_draft_and_resets_page() {
        let mut list: ListController<Row> = ListController::new(10);
        list.set_page(4);
        list.set_filter_draft(Filters::new().with("email", text("ann@")));

        list.apply_filters();

        let request = list.request();
        assert_eq!(request.page_index, 0);
        assert_eq!(request.filters.query_value("email").as_deref(), Some("ann@"));
    }

    #[test]
    fn page_size_change_returns_to_first_page() {
        let mut list: ListController<Row> = ListController::new(10);
        list.set_page(3);

        list.set_page_size(50);

        assert_eq!(list.request().page_index, 0);
        assert_eq!(list.request().page_size, 50);
    }

    #[test]
    fn page_size_is_clamped() {
        let mut list: ListController<Row> = ListController::new(0);
        assert_eq!(list.page_size(), 1);
        list.set_page_size(10_000);
        assert_eq!(list.page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn page_index_is_bounded() {
        let mut list: ListController<Row> = ListController::new(10);
        list.set_page(usize::MAX);

        assert_eq!(list.page_index(), MAX_PAGE_INDEX);
        assert_eq!(list.request().page_number(), MAX_PAGE_INDEX + 1);

        let request = list.begin_fetch();
        list.finish_fetch(&request, Ok(RawPage::new(rows(&[1]))));
        assert!(list.rows_label().starts_with("1000001–1000001 of"));
    }

    #[test]
    fn restored_state_is_bounded() {
        let mut state = ListState::new(10, Filters::new());
        state.page_index = usize::MAX;

        let list: ListController<Row> = ListController::from_state(state);

        assert_eq!(list.page_index(), MAX_PAGE_INDEX);
    }

    #[test]
    fn reset_clears_filters_and_page() {
        let mut list: ListController<Row> = ListController::new(10);
        list.set_filter_draft(Filters::new().with("role", text("User")));
        list.apply_filters();
        list.set_page(2);

        list.reset_filters();

        assert!(list.applied().is_empty());
        assert!(list.draft().is_empty());
        assert_eq!(list.request().page_index, 0);
    }

    #[test]
    fn reset_restores_screen_defaults() {
        let defaults = Filters::new()
            .with(SORT_FIELD_KEY, text("CreateAt"))
            .with(SORT_DESC_KEY, FilterValue::Flag(true));
        let mut list: ListController<Row> = ListController::with_defaults(20, defaults.clone());
        list.sort_by("Status");

        list.reset_filters();

        assert_eq!(list.applied(), &defaults);
    }

    #[test]
    fn sort_toggles_direction_on_same_field() {
        let mut list: ListController<Row> = ListController::new(20);
        list.set_page(5);

        list.sort_by("CreateAt");
        assert_eq!(list.applied().flag(SORT_DESC_KEY), Some(true));
        assert_eq!(list.page_index(), 0);

        list.sort_by("CreateAt");
        assert_eq!(list.applied().flag(SORT_DESC_KEY), Some(false));

        list.sort_by("Status");
        assert_eq!(list.applied().flag(SORT_DESC_KEY), Some(true));
        assert_eq!(list.draft(), list.applied());
    }

    #[test]
    fn failure_clears_previous_rows() {
        let mut list: ListController<Row> = ListController::new(10);
        let request = list.begin_fetch();
        list.finish_fetch(&request, Ok(RawPage::new(rows(&[1, 2])).total_count(Some(2))));
        assert_eq!(list.items().len(), 2);

        let request = list.begin_fetch();
        assert!(list.is_loading());
        list.finish_fetch(&request, Err(RepositoryError::Network("timeout".into())));

        assert!(list.items().is_empty());
        assert_eq!(list.total(), TotalCount::Exact(0));
        assert!(list.error().is_some());
        assert!(!list.is_loading());
    }

    #[test]
    fn last_resolved_response_wins() {
        let mut list: ListController<Row> = ListController::new(10);

        let request_a = list.begin_fetch();
        list.set_filter_draft(Filters::new().with("email", text("b@")));
        list.apply_filters();
        let request_b = list.begin_fetch();
        assert_ne!(request_a, request_b);

        list.finish_fetch(&request_b, Ok(RawPage::new(rows(&[20])).total_count(Some(1))));
        assert!(list.is_loading());
        list.finish_fetch(&request_a, Ok(RawPage::new(rows(&[1, 2, 3])).total_count(Some(3))));

        let ids: Vec<u32> = list.items().iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(!list.is_loading());
    }

    #[test]
    fn patch_updates_only_matching_row() {
        let mut list: ListController<Row> = ListController::new(10);
        let request = list.begin_fetch();
        list.finish_fetch(&request, Ok(RawPage::new(rows(&[1, 2]))));

        assert!(list.patch_item("2", |row| row.status = "approved"));
        assert!(!list.patch_item("9", |row| row.status = "approved"));

        assert_eq!(list.items()[0].status, "pending");
        assert_eq!(list.items()[1].status, "approved");
    }

    #[test]
    fn filter_input_parsing() {
        assert_eq!(FilterValue::from_input("  "), FilterValue::Empty);
        assert_eq!(FilterValue::from_input("12"), FilterValue::Number(12));
        assert_eq!(FilterValue::from_input("true"), FilterValue::Flag(true));
        assert_eq!(FilterValue::from_input(" a@b "), text("a@b"));
        assert_eq!(FilterValue::Empty.as_query_value(), None);
    }

    #[test]
    fn state_survives_serialization() {
        let mut list: ListController<Row> = ListController::new(10);
        list.set_filter_draft(Filters::new().with("status", FilterValue::Number(1)));
        list.set_page(2);

        let json = serde_json::to_string(list.state()).unwrap();
        let restored: ListController<Row> =
            ListController::from_state(serde_json::from_str(&json).unwrap());

        assert_eq!(restored.state(), list.state());
    }
}
