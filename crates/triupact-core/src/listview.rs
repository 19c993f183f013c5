//! Generic filter, sort, and paginate projection for list views.
//!
//! # Design
//! - `project` is pure: the same inputs always yield the same page.
//! - `ListViewState` owns the user-controlled inputs and keeps the page clamped.
//! - Resources plug in through `ListSpec`; records through `Listable`.

use std::rc::Rc;

use crate::pagination::{PageNav, clamp_page, total_pages};
use crate::record::{CanonicalRecord, FieldValue};
use crate::sort::{SortMode, sort_records};

/// Page sizes offered in every list view.
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [5, 10, 20, 50, 100];

/// Anything a list view can filter and sort.
pub trait Listable {
    /// Field value by canonical name.
    fn field(&self, name: &str) -> Option<&FieldValue>;

    /// Lower-cased text searched when the scope covers every field, skipping
    /// the fields named in `except`.
    fn search_text(&self, except: &[&str]) -> String;
}

impl Listable for CanonicalRecord {
    fn field(&self, name: &str) -> Option<&FieldValue> {
        self.get(name)
    }

    fn search_text(&self, except: &[&str]) -> String {
        let mut json = self.to_json();
        if let Some(map) = json.as_object_mut() {
            map.retain(|key, _| !except.contains(&key.as_str()));
        }
        json.to_string().to_lowercase()
    }
}

/// Fields a free-text query is matched against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchScope {
    /// Only the named canonical fields.
    Fields(&'static [&'static str]),
    /// The serialised text of the whole record minus derived helper fields.
    AllFields {
        /// Fields left out of the searched text.
        except: &'static [&'static str],
    },
}

/// Per-resource list configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListSpec {
    /// Query scope.
    pub search: SearchScope,
    /// Sort menu; the first entry is the default.
    pub sort_modes: &'static [SortMode],
    /// Initial page size.
    pub default_page_size: usize,
}

impl ListSpec {
    /// Default sort mode.
    #[must_use]
    pub fn default_sort(&self) -> Option<&'static SortMode> {
        self.sort_modes.first()
    }

    /// Look up a sort mode by key.
    #[must_use]
    pub fn sort_mode(&self, key: &str) -> Option<&'static SortMode> {
        self.sort_modes.iter().find(|mode| mode.key == key)
    }
}

/// Case-insensitive substring match of an already lower-cased needle.
#[must_use]
pub fn matches_query<T: Listable>(record: &T, scope: SearchScope, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    match scope {
        SearchScope::Fields(fields) => fields.iter().any(|name| {
            record
                .field(name)
                .is_some_and(|value| value.as_text().to_lowercase().contains(needle))
        }),
        SearchScope::AllFields { except } => record.search_text(except).contains(needle),
    }
}

/// One projected page plus its metadata.
#[derive(Debug, PartialEq)]
pub struct ListPage<'a, T> {
    /// Rows on the current page.
    pub rows: Vec<&'a T>,
    /// Records matching the query.
    pub total: usize,
    /// Records before filtering.
    pub raw_total: usize,
    /// Page count, at least one.
    pub total_pages: usize,
    /// Clamped 1-based page.
    pub current_page: usize,
    /// 1-based index of the first row, 0 when empty.
    pub range_start: usize,
    /// 1-based index of the last row, 0 when empty.
    pub range_end: usize,
}

impl<T> ListPage<'_, T> {
    /// Navigation model for the pagination control.
    #[must_use]
    pub fn nav(&self) -> PageNav {
        PageNav::new(self.current_page, self.total_pages)
    }

    /// `showing a-b of n` text, noting the unfiltered count when it differs.
    #[must_use]
    pub fn summary(&self) -> String {
        let base = format!(
            "showing {}-{} of {}",
            self.range_start, self.range_end, self.total
        );
        if self.raw_total == self.total {
            base
        } else {
            format!("{base} (filtered from {})", self.raw_total)
        }
    }
}

/// Filter, sort, and slice `records` into one page.
#[must_use]
pub fn project<'a, T: Listable>(
    records: &'a [T],
    scope: SearchScope,
    query: &str,
    sort: Option<&SortMode>,
    page_size: usize,
    current_page: usize,
) -> ListPage<'a, T> {
    let needle = query.trim().to_lowercase();
    let filtered: Vec<&T> = records
        .iter()
        .filter(|record| matches_query(*record, scope, &needle))
        .collect();
    let ordered = match sort {
        Some(mode) => sort_records(filtered, mode),
        None => filtered,
    };

    let page_size = page_size.max(1);
    let total = ordered.len();
    let total_pages = total_pages(total, page_size);
    let current_page = clamp_page(current_page, total_pages);
    let start = (current_page - 1) * page_size;
    let rows: Vec<&T> = ordered.into_iter().skip(start).take(page_size).collect();
    let (range_start, range_end) = if total == 0 {
        (0, 0)
    } else {
        (start + 1, start + rows.len())
    };

    ListPage {
        rows,
        total,
        raw_total: records.len(),
        total_pages,
        current_page,
        range_start,
        range_end,
    }
}

/// User-controlled inputs of one list view over a fetched record set.
#[derive(Debug)]
pub struct ListViewState<T> {
    spec: &'static ListSpec,
    records: Rc<Vec<T>>,
    query: String,
    sort: Option<&'static SortMode>,
    page_size: usize,
    current_page: usize,
}

impl<T> Clone for ListViewState<T> {
    fn clone(&self) -> Self {
        Self {
            spec: self.spec,
            records: Rc::clone(&self.records),
            query: self.query.clone(),
            sort: self.sort,
            page_size: self.page_size,
            current_page: self.current_page,
        }
    }
}

impl<T> PartialEq for ListViewState<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.records, &other.records)
            && self.query == other.query
            && self.sort == other.sort
            && self.page_size == other.page_size
            && self.current_page == other.current_page
    }
}

impl<T: Listable> ListViewState<T> {
    /// Empty state using the list defaults.
    #[must_use]
    pub fn new(spec: &'static ListSpec) -> Self {
        Self {
            spec,
            records: Rc::new(Vec::new()),
            query: String::new(),
            sort: spec.default_sort(),
            page_size: spec.default_page_size.max(1),
            current_page: 1,
        }
    }

    /// Replace the record set wholesale, keeping the page in range.
    pub fn replace_records(&mut self, records: Vec<T>) {
        self.records = Rc::new(records);
        self.reclamp();
    }

    /// Change the query; always returns to the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.current_page = 1;
    }

    /// Select a sort mode by key. Unknown keys are ignored.
    pub fn set_sort(&mut self, key: &str) -> bool {
        match self.spec.sort_mode(key) {
            Some(mode) => {
                self.sort = Some(mode);
                true
            }
            None => false,
        }
    }

    /// Change the page size, keeping the current page in range. Zero is ignored.
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 {
            return;
        }
        self.page_size = page_size;
        self.reclamp();
    }

    /// Jump to a page, clamped to the available range.
    pub fn go_to(&mut self, page: usize) {
        self.current_page = page;
        self.reclamp();
    }

    /// Current projection.
    #[must_use]
    pub fn project(&self) -> ListPage<'_, T> {
        project(
            &self.records,
            self.spec.search,
            &self.query,
            self.sort,
            self.page_size,
            self.current_page,
        )
    }

    fn reclamp(&mut self) {
        let needle = self.query.trim().to_lowercase();
        let matching = self
            .records
            .iter()
            .filter(|record| matches_query(*record, self.spec.search, &needle))
            .count();
        self.current_page = clamp_page(self.current_page, total_pages(matching, self.page_size));
    }

    /// Active query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Active sort mode.
    #[must_use]
    pub const fn sort(&self) -> Option<&'static SortMode> {
        self.sort
    }

    /// Active page size.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Clamped 1-based page.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Fetched records, unfiltered.
    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// List configuration.
    #[must_use]
    pub const fn spec(&self) -> &'static ListSpec {
        self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortKind;

    static SORTS: [SortMode; 2] = [
        SortMode::asc("name-asc", "Name (A-Z)", "name", SortKind::Text),
        SortMode::desc("id-desc", "ID (high-low)", "id", SortKind::Numeric),
    ];
    static SPEC: ListSpec = ListSpec {
        search: SearchScope::Fields(&["name", "code"]),
        sort_modes: &SORTS,
        default_page_size: 3,
    };

    fn record(id: i64, name: &str) -> CanonicalRecord {
        CanonicalRecord::new(FieldValue::from(id)).with_field("name", name)
    }

    fn numbered(count: i64) -> Vec<CanonicalRecord> {
        (1..=count).map(|id| record(id, &format!("item{id}"))).collect()
    }

    fn ids<T: Listable>(page: &ListPage<'_, T>) -> Vec<String> {
        page.rows
            .iter()
            .map(|row| row.field("id").map(FieldValue::as_text).unwrap_or_default())
            .collect()
    }

    #[test]
    fn empty_records_yield_single_empty_page() {
        let records: Vec<CanonicalRecord> = Vec::new();
        let page = project(&records, SPEC.search, "", SPEC.default_sort(), 5, 4);
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
        assert!(page.rows.is_empty());
        assert_eq!((page.range_start, page.range_end), (0, 0));
    }

    #[test]
    fn seven_records_in_pages_of_three() {
        let records = numbered(7);
        let first = project(&records, SPEC.search, "", SPEC.default_sort(), 3, 1);
        assert_eq!(first.total_pages, 3);
        assert_eq!(ids(&first), vec!["1", "2", "3"]);
        assert_eq!((first.range_start, first.range_end), (1, 3));

        let last = project(&records, SPEC.search, "", SPEC.default_sort(), 3, 3);
        assert_eq!(ids(&last), vec!["7"]);
        assert_eq!((last.range_start, last.range_end), (7, 7));
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let records = numbered(7);
        let page = project(&records, SPEC.search, "", None, 3, 99);
        assert_eq!(page.current_page, 3);
        let page = project(&records, SPEC.search, "", None, 3, 0);
        assert_eq!(page.current_page, 1);
    }

    #[test]
    fn page_slices_cover_every_record_once() {
        for count in 0..30_i64 {
            let records = numbered(count);
            for size in 1..8_usize {
                let first = project(&records, SPEC.search, "", None, size, 1);
                let expected_pages = usize::try_from(count)
                    .unwrap_or_default()
                    .div_ceil(size)
                    .max(1);
                assert_eq!(first.total_pages, expected_pages);
                let covered: usize = (1..=first.total_pages)
                    .map(|page| project(&records, SPEC.search, "", None, size, page).rows.len())
                    .sum();
                assert_eq!(covered, usize::try_from(count).unwrap_or_default());
            }
        }
    }

    #[test]
    fn query_matches_case_insensitively() {
        let records = vec![record(1, "Bangkok Dept"), record(2, "Chon Buri")];
        let page = project(&records, SPEC.search, "bangkok", None, 5, 1);
        assert_eq!(ids(&page), vec!["1"]);
        assert_eq!(page.raw_total, 2);
        assert_eq!(page.summary(), "showing 1-1 of 1 (filtered from 2)");
    }

    #[test]
    fn query_ignores_fields_outside_scope() {
        let records = vec![record(1, "Alpha").with_field("email", "bangkok@example.com")];
        let page = project(&records, SPEC.search, "bangkok", None, 5, 1);
        assert!(page.rows.is_empty());
        let everything = SearchScope::AllFields { except: &[] };
        let page = project(&records, everything, "BANGKOK", None, 5, 1);
        assert_eq!(page.rows.len(), 1);
    }

    #[test]
    fn changing_query_resets_to_first_page() {
        let mut state = ListViewState::new(&SPEC);
        state.replace_records(numbered(10));
        state.go_to(3);
        assert_eq!(state.current_page(), 3);
        state.set_query("item");
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.query(), "item");
    }

    #[test]
    fn page_size_change_reclamps() {
        let mut state = ListViewState::new(&SPEC);
        state.replace_records(numbered(10));
        state.go_to(4);
        assert_eq!(state.current_page(), 4);
        state.set_page_size(5);
        assert_eq!(state.current_page(), 2);
        state.set_page_size(0);
        assert_eq!(state.page_size(), 5);
    }

    #[test]
    fn refetch_with_fewer_records_reclamps() {
        let mut state = ListViewState::new(&SPEC);
        state.replace_records(numbered(10));
        state.go_to(4);
        state.replace_records(numbered(2));
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.project().rows.len(), 2);
    }

    #[test]
    fn unknown_sort_keys_are_ignored() {
        let mut state: ListViewState<CanonicalRecord> = ListViewState::new(&SPEC);
        assert_eq!(state.sort().map(|mode| mode.key), Some("name-asc"));
        assert!(!state.set_sort("bogus"));
        assert!(state.set_sort("id-desc"));
        state.replace_records(numbered(4));
        assert_eq!(ids(&state.project()), vec!["4", "3", "2"]);
    }

    #[test]
    fn cloned_state_shares_records() {
        let mut state = ListViewState::new(&SPEC);
        state.replace_records(numbered(3));
        let copy = state.clone();
        assert_eq!(copy, state);
        state.set_query("x");
        assert_ne!(copy, state);
    }
}
