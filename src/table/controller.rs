//! Stateful table controller.
//!
//! Owns an entry collection plus its [`TableViewState`] and applies state
//! transitions one at a time. Every read of the page goes through
//! [`derive_view`], so the controller never caches derived rows.

use super::column::{ColumnDef, TableRow};
use super::state::{ColumnSort, SortingState, TableViewState, VisibilityState};
use super::view::{clamp_page_index, derive_view, filtered_indices, page_count, ViewResult};

/// Table state machine over an immutable entry collection.
pub struct TableController<R> {
    entries: Vec<R>,
    columns: &'static [ColumnDef],
    state: TableViewState,
    /// Identity of the current collection; a different value resets state
    generation: Option<u64>,
}

impl<R: TableRow> TableController<R> {
    pub fn new(columns: &'static [ColumnDef], page_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            columns,
            state: TableViewState::with_page_size(page_size),
            generation: None,
        }
    }

    pub fn entries(&self) -> &[R] {
        &self.entries
    }

    pub fn columns(&self) -> &'static [ColumnDef] {
        self.columns
    }

    pub fn state(&self) -> &TableViewState {
        &self.state
    }

    pub fn generation(&self) -> Option<u64> {
        self.generation
    }

    /// Replace the collection. View state resets to defaults.
    pub fn set_entries(&mut self, entries: Vec<R>) {
        self.entries = entries;
        self.generation = None;
        self.state.reset();
    }

    /// Adopt a cached collection if its generation differs from the one
    /// currently shown. Returns true when the collection was replaced.
    pub fn sync(&mut self, generation: u64, entries: &[R]) -> bool
    where
        R: Clone,
    {
        if self.generation == Some(generation) {
            return false;
        }
        tracing::debug!(
            "Table collection changed (generation {:?} -> {}), resetting view state",
            self.generation,
            generation
        );
        self.set_entries(entries.to_vec());
        self.generation = Some(generation);
        true
    }

    /// Derive the current page.
    pub fn view(&self) -> ViewResult<'_, R> {
        derive_view(&self.entries, &self.state, self.columns)
    }

    // --- Sorting / filtering / visibility ---

    pub fn set_sorting(&mut self, sorting: SortingState) {
        self.state.sorting = sorting;
        self.state.pagination.page_index = 0;
    }

    /// Header-click cycle for a single column: none → asc → desc → none.
    pub fn toggle_sorting(&mut self, column: &str) {
        let next = match self.state.sorting.first() {
            Some(sort) if sort.column == column && !sort.descending => {
                vec![ColumnSort::desc(column)]
            }
            Some(sort) if sort.column == column => Vec::new(),
            _ => vec![ColumnSort::asc(column)],
        };
        self.set_sorting(next);
    }

    /// Set or clear (empty value) the filter of one column.
    pub fn set_column_filter(&mut self, column: &str, value: &str) {
        self.state.set_filter(column, value);
        self.state.pagination.page_index = 0;
    }

    pub fn filter_value(&self, column: &str) -> &str {
        self.state.filter_value(column).unwrap_or("")
    }

    pub fn set_column_visibility(&mut self, visibility: VisibilityState) {
        self.state.column_visibility = visibility;
    }

    pub fn set_column_visible(&mut self, column: &str, visible: bool) {
        self.state
            .column_visibility
            .insert(column.to_string(), visible);
    }

    // --- Selection / expansion ---

    pub fn toggle_row_selection(&mut self, row_id: &str) {
        if !self.state.row_selection.remove(row_id) {
            self.state.row_selection.insert(row_id.to_string());
        }
    }

    pub fn set_row_selected(&mut self, row_id: &str, selected: bool) {
        if selected {
            self.state.row_selection.insert(row_id.to_string());
        } else {
            self.state.row_selection.remove(row_id);
        }
    }

    /// Select or deselect every row of the current page, and only those.
    pub fn toggle_all_visible_rows_selection(&mut self, selected: bool) {
        let page_ids: Vec<String> = self
            .view()
            .rows
            .iter()
            .map(|r| r.row.row_id().to_string())
            .collect();
        for id in page_ids {
            if selected {
                self.state.row_selection.insert(id);
            } else {
                self.state.row_selection.remove(&id);
            }
        }
    }

    pub fn selected_rows(&self) -> Vec<&R> {
        self.entries
            .iter()
            .filter(|r| self.state.is_selected(r.row_id()))
            .collect()
    }

    pub fn clear_selection(&mut self) {
        self.state.row_selection.clear();
    }

    pub fn set_expanded(&mut self, row_id: &str, expanded: bool) {
        if expanded {
            self.state.expanded.insert(row_id.to_string());
        } else {
            self.state.expanded.remove(row_id);
        }
    }

    pub fn toggle_expanded(&mut self, row_id: &str) {
        let expanded = self.state.is_expanded(row_id);
        self.set_expanded(row_id, !expanded);
    }

    // --- Pagination ---

    fn current_page_count(&self) -> usize {
        let filtered = filtered_indices(&self.entries, &self.state, self.columns).len();
        page_count(filtered, self.state.pagination.page_size)
    }

    /// Advance one page; no-op on the last page.
    pub fn next_page(&mut self) {
        let pages = self.current_page_count();
        let current = clamp_page_index(self.state.pagination.page_index, pages);
        self.state.pagination.page_index = if current + 1 < pages {
            current + 1
        } else {
            current
        };
    }

    /// Go back one page; no-op on the first page.
    pub fn previous_page(&mut self) {
        let pages = self.current_page_count();
        let current = clamp_page_index(self.state.pagination.page_index, pages);
        self.state.pagination.page_index = current.saturating_sub(1);
    }

    /// Jump to a page, clamped into range.
    pub fn set_page_index(&mut self, page_index: usize) {
        let pages = self.current_page_count();
        self.state.pagination.page_index = clamp_page_index(page_index, pages);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.state.pagination.page_size = page_size.max(1);
        self.state.pagination.page_index = 0;
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }
}
