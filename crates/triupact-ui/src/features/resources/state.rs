//! Resource page state: one list-view controller plus fetch status.
//!
//! # Design
//! - A failed fetch empties the record set; the error shows inline beside it.
//! - Table cells are rendered here so the view only lays out strings.

use std::rc::Rc;

use triupact_core::listview::ListPage;
use triupact_core::pagination::PageNav;
use triupact_core::resources::{ColumnView, Resource, ResourceSpec};
use triupact_core::{CanonicalRecord, ListViewState};
use yew::functional::Reducible;

use crate::features::LoadStatus;

/// List view over one resource.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceState {
    /// Resource being listed.
    pub resource: Resource,
    /// Query, sort, page, and records.
    pub view: ListViewState<CanonicalRecord>,
    /// Fetch status.
    pub status: LoadStatus,
    /// Retry counter.
    pub reload: u32,
}

impl ResourceState {
    /// Empty, loading view with the resource defaults.
    #[must_use]
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            view: ListViewState::new(&resource.spec().list),
            status: LoadStatus::Loading,
            reload: 0,
        }
    }

    /// Static configuration of the resource.
    #[must_use]
    pub const fn spec(&self) -> &'static ResourceSpec {
        self.resource.spec()
    }

    /// Rendered table for the current page.
    #[must_use]
    pub fn table(&self) -> TableModel {
        let columns = self.spec().columns_for(self.view.records());
        let page = self.view.project();
        TableModel::from_page(columns, &page)
    }
}

/// Resource page transitions.
#[derive(Clone, Debug, PartialEq)]
pub enum ResourceAction {
    /// Records arrived.
    Loaded(Vec<CanonicalRecord>),
    /// The fetch failed.
    Failed(String),
    /// Query changed; back to page 1.
    Search(String),
    /// Sort mode picked by key.
    Sort(String),
    /// Page size picked from the menu.
    PageSize(usize),
    /// Page requested; clamped on projection.
    Page(usize),
    /// Fetch again.
    Retry,
}

impl Reducible for ResourceState {
    type Action = ResourceAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ResourceAction::Loaded(records) => {
                next.view.replace_records(records);
                next.status = LoadStatus::Ready;
            }
            ResourceAction::Failed(message) => {
                next.view.replace_records(Vec::new());
                next.status = LoadStatus::Failed(message);
            }
            ResourceAction::Search(query) => next.view.set_query(query),
            ResourceAction::Sort(key) => {
                if !next.view.set_sort(&key) {
                    return self;
                }
            }
            ResourceAction::PageSize(size) => next.view.set_page_size(size),
            ResourceAction::Page(page) => next.view.go_to(page),
            ResourceAction::Retry => {
                next.status = LoadStatus::Loading;
                next.reload = next.reload.wrapping_add(1);
            }
        }
        Rc::new(next)
    }
}

/// Strings for one rendered page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableModel {
    /// Column headers and formats.
    pub columns: Vec<ColumnView>,
    /// Row key and cells.
    pub rows: Vec<(String, Vec<String>)>,
    /// `showing a-b of n` line.
    pub summary: String,
    /// Navigation affordances.
    pub nav: PageNav,
    /// Matches before paging.
    pub total: usize,
    /// Records before filtering.
    pub raw_total: usize,
}

impl TableModel {
    fn from_page(columns: Vec<ColumnView>, page: &ListPage<'_, CanonicalRecord>) -> Self {
        let rows = page
            .rows
            .iter()
            .map(|record| {
                let cells = columns
                    .iter()
                    .map(|column| ResourceSpec::render_cell(record, column))
                    .collect();
                (record.id().as_text(), cells)
            })
            .collect();
        Self {
            columns,
            rows,
            summary: page.summary(),
            nav: page.nav(),
            total: page.total,
            raw_total: page.raw_total,
        }
    }

    /// Empty-state headline when there is nothing to show.
    #[must_use]
    pub const fn empty_message(&self) -> Option<&'static str> {
        if self.total > 0 {
            None
        } else if self.raw_total == 0 {
            Some("No records")
        } else {
            Some("No records match the search")
        }
    }
}
