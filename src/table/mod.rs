//! Tabular data view controller.
//!
//! Given an entry collection and a [`TableViewState`], produces the ordered
//! list of rows to show on the current page plus pagination and selection
//! summaries. The pipeline is always filter → sort → paginate.
//!
//! - [`column`]: column definitions and the [`TableRow`] accessor trait
//! - [`state`]: sorting, filter, visibility, selection, expansion, page cursor
//! - [`view`]: the pure derivation ([`derive_view`])
//! - [`controller`]: [`TableController`], the stateful wrapper the UI drives
//!
//! Selection and expansion are keyed by row id, so they survive filtering,
//! sorting and paging. They reset only when the collection itself changes.

pub mod column;
pub mod controller;
pub mod state;
pub mod view;

pub use column::{
    find_column, ColumnDef, TableRow, ACTIONS_COLUMN, DASHBOARD_COLUMNS, GITOPS_COLUMNS,
    SELECT_COLUMN,
};
pub use controller::TableController;
pub use state::{
    ColumnFilter, ColumnFiltersState, ColumnSort, PaginationState, SortingState,
    TableViewState, VisibilityState, DEFAULT_PAGE_SIZE,
};
pub use view::{derive_view, page_count, ViewResult, ViewRow};
