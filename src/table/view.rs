//! View derivation: filter → sort → paginate.
//!
//! [`derive_view`] is a pure function of the entries, the state bundle and
//! the column definitions. It never mutates state; a page index past the
//! end is clamped in the result only.

use std::cmp::Ordering;

use super::column::{find_column, ColumnDef, TableRow};
use super::state::TableViewState;

/// One row of the derived page.
#[derive(Debug)]
pub struct ViewRow<'a, R> {
    /// Position of the row in the source collection
    pub index: usize,
    pub row: &'a R,
    pub selected: bool,
    pub expanded: bool,
}

/// Everything a renderer needs to draw one page of a table.
#[derive(Debug)]
pub struct ViewResult<'a, R> {
    pub rows: Vec<ViewRow<'a, R>>,
    pub visible_columns: Vec<&'static str>,
    /// Effective (clamped) page index
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub is_all_page_rows_selected: bool,
    pub is_some_page_rows_selected: bool,
    /// Selected rows among the filtered rows (not just the page)
    pub filtered_selected_count: usize,
}

impl<R> ViewResult<'_, R> {
    pub fn row_ids(&self) -> Vec<&str>
    where
        R: TableRow,
    {
        self.rows.iter().map(|r| r.row.row_id()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Number of pages needed for `rows` rows. Zero rows means zero pages.
pub fn page_count(rows: usize, page_size: usize) -> usize {
    rows.div_ceil(page_size.max(1))
}

/// Clamp a page index into `0..page_count` (0 when there are no pages).
pub fn clamp_page_index(page_index: usize, page_count: usize) -> usize {
    page_index.min(page_count.saturating_sub(1))
}

/// Case-insensitive substring match. Missing cells never match.
fn matches_filter(cell: Option<&str>, needle_lower: &str) -> bool {
    match cell {
        Some(value) => value.to_lowercase().contains(needle_lower),
        None => false,
    }
}

/// Indices of the rows passing every active column filter, in source order.
pub fn filtered_indices<R: TableRow>(
    entries: &[R],
    state: &TableViewState,
    columns: &[ColumnDef],
) -> Vec<usize> {
    let active: Vec<(&str, String)> = state
        .column_filters
        .iter()
        .filter(|f| !f.value.is_empty())
        .filter(|f| find_column(columns, &f.column).is_some_and(|c| c.filterable))
        .map(|f| (f.column.as_str(), f.value.to_lowercase()))
        .collect();

    entries
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            active
                .iter()
                .all(|(column, needle)| matches_filter(row.cell_value(column).as_deref(), needle))
        })
        .map(|(i, _)| i)
        .collect()
}

/// Sort row indices in place according to the sorting state.
///
/// Values compare case-insensitively; missing values always sort last.
/// The sort is stable so ties keep source order.
pub fn sort_indices<R: TableRow>(
    indices: &mut [usize],
    entries: &[R],
    state: &TableViewState,
    columns: &[ColumnDef],
) {
    let specs: Vec<(&str, bool)> = state
        .sorting
        .iter()
        .filter(|s| find_column(columns, &s.column).is_some_and(|c| c.sortable))
        .map(|s| (s.column.as_str(), s.descending))
        .collect();
    if specs.is_empty() {
        return;
    }

    // One lowercased key per row and sort entry
    let keys: Vec<Vec<Option<String>>> = entries
        .iter()
        .map(|row| {
            specs
                .iter()
                .map(|(column, _)| row.cell_value(column).map(|v| v.to_lowercase()))
                .collect()
        })
        .collect();

    indices.sort_by(|&a, &b| {
        for (pos, (_, descending)) in specs.iter().enumerate() {
            let ord = match (&keys[a][pos], &keys[b][pos]) {
                (Some(x), Some(y)) => {
                    let ord = x.cmp(y);
                    if *descending {
                        ord.reverse()
                    } else {
                        ord
                    }
                }
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}

/// Derive the visible page of a table.
pub fn derive_view<'a, R: TableRow>(
    entries: &'a [R],
    state: &TableViewState,
    columns: &[ColumnDef],
) -> ViewResult<'a, R> {
    let mut indices = filtered_indices(entries, state, columns);
    sort_indices(&mut indices, entries, state, columns);

    let page_size = state.pagination.page_size.max(1);
    let filtered_rows = indices.len();
    let page_count = page_count(filtered_rows, page_size);
    let page_index = clamp_page_index(state.pagination.page_index, page_count);

    let start = (page_index * page_size).min(filtered_rows);
    let end = (start + page_size).min(filtered_rows);

    let rows: Vec<ViewRow<'a, R>> = indices[start..end]
        .iter()
        .map(|&index| {
            let row = &entries[index];
            ViewRow {
                index,
                row,
                selected: state.is_selected(row.row_id()),
                expanded: state.is_expanded(row.row_id()),
            }
        })
        .collect();

    let filtered_selected_count = indices
        .iter()
        .filter(|&&i| state.is_selected(entries[i].row_id()))
        .count();

    let visible_columns = columns
        .iter()
        .filter(|c| !c.hideable || state.is_column_visible(c.key))
        .map(|c| c.key)
        .collect();

    ViewResult {
        is_all_page_rows_selected: !rows.is_empty() && rows.iter().all(|r| r.selected),
        is_some_page_rows_selected: rows.iter().any(|r| r.selected),
        rows,
        visible_columns,
        page_index,
        page_size,
        page_count,
        total_rows: entries.len(),
        filtered_rows,
        can_go_previous: page_index > 0,
        can_go_next: page_index + 1 < page_count,
        filtered_selected_count,
    }
}
