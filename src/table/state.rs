//! Transient view state of a table.
//!
//! Everything here lives only as long as the rendered view and is reset
//! when the underlying collection changes identity.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One entry of the sorting state. Earlier entries take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSort {
    pub column: String,
    pub descending: bool,
}

impl ColumnSort {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }
}

/// A filter value applied to one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub column: String,
    pub value: String,
}

pub type SortingState = Vec<ColumnSort>;
pub type ColumnFiltersState = Vec<ColumnFilter>;
/// Column key -> visible. Columns missing from the map are visible.
pub type VisibilityState = HashMap<String, bool>;

/// Page cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// The full state bundle a table view is derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableViewState {
    pub sorting: SortingState,
    pub column_filters: ColumnFiltersState,
    pub column_visibility: VisibilityState,
    pub row_selection: BTreeSet<String>,
    pub expanded: BTreeSet<String>,
    pub pagination: PaginationState,
}

impl TableViewState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            pagination: PaginationState {
                page_index: 0,
                page_size: page_size.max(1),
            },
            ..Self::default()
        }
    }

    /// Current filter value for a column, if any
    pub fn filter_value(&self, column: &str) -> Option<&str> {
        self.column_filters
            .iter()
            .find(|f| f.column == column)
            .map(|f| f.value.as_str())
    }

    /// Replace or clear (empty value) the filter of one column
    pub fn set_filter(&mut self, column: &str, value: &str) {
        self.column_filters.retain(|f| f.column != column);
        if !value.is_empty() {
            self.column_filters.push(ColumnFilter {
                column: column.to_string(),
                value: value.to_string(),
            });
        }
    }

    pub fn is_column_visible(&self, column: &str) -> bool {
        self.column_visibility.get(column).copied().unwrap_or(true)
    }

    pub fn is_selected(&self, row_id: &str) -> bool {
        self.row_selection.contains(row_id)
    }

    pub fn is_expanded(&self, row_id: &str) -> bool {
        self.expanded.contains(row_id)
    }

    /// Back to defaults, keeping the page size
    pub fn reset(&mut self) {
        *self = Self::with_page_size(self.pagination.page_size);
    }
}
