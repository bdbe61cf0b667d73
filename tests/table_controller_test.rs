//! Integration tests for the table controller
//!
//! Walks the controller through the interactions the dashboard hub page
//! performs: paging, filtering, selection, sorting and collection refresh.

mod common;

use common::builders::{numbered_entries, EntryBuilder};
use gitops_console::table::{ColumnSort, TableController, DASHBOARD_COLUMNS};
use gitops_console::types::DashboardEntry;

fn controller(entries: Vec<DashboardEntry>) -> TableController<DashboardEntry> {
    let mut table = TableController::new(DASHBOARD_COLUMNS, 10);
    table.set_entries(entries);
    table
}

#[test]
fn test_last_page_of_twenty_five() {
    let mut table = controller(numbered_entries(25));
    table.next_page();
    table.next_page();

    let view = table.view();
    assert_eq!(view.row_ids(), vec!["21", "22", "23", "24", "25"]);
    assert!(!view.can_go_next);
    assert!(view.can_go_previous);
    assert_eq!(view.page_count, 3);
}

#[test]
fn test_paging_is_clamped() {
    let mut table = controller(numbered_entries(25));
    table.previous_page();
    assert_eq!(table.view().page_index, 0);

    for _ in 0..10 {
        table.next_page();
    }
    assert_eq!(table.view().page_index, 2);
}

#[test]
fn test_select_all_only_selects_current_page() {
    let mut table = controller(numbered_entries(25));
    table.toggle_all_visible_rows_selection(true);

    let view = table.view();
    assert!(view.is_all_page_rows_selected);
    assert_eq!(view.filtered_selected_count, 10);
    assert_eq!(table.selected_rows().len(), 10);

    table.next_page();
    let view = table.view();
    assert!(!view.is_some_page_rows_selected);
}

#[test]
fn test_filter_with_no_match() {
    let mut table = controller(numbered_entries(25));
    table.set_column_filter("name", "does-not-exist");

    let view = table.view();
    assert!(view.is_empty());
    assert!(!view.can_go_next);
    assert!(!view.can_go_previous);
    assert_eq!(view.total_rows, 25);
    assert_eq!(view.filtered_rows, 0);
}

#[test]
fn test_filter_resets_page_and_keeps_selection() {
    let mut table = controller(numbered_entries(25));
    table.toggle_row_selection("3");
    table.next_page();

    table.set_column_filter("name", "dashboard 2");
    let view = table.view();
    assert_eq!(view.page_index, 0);
    assert_eq!(view.filtered_rows, 6);
    assert_eq!(view.filtered_selected_count, 0);

    table.set_column_filter("name", "");
    assert_eq!(table.view().filtered_selected_count, 1);
}

#[test]
fn test_sorting_by_description_puts_missing_last() {
    let entries = vec![
        EntryBuilder::new("1", "Grafana").description("metrics").build(),
        EntryBuilder::new("2", "Kibana").build(),
        EntryBuilder::new("3", "Loki").description("Logs").build(),
    ];
    let mut table = controller(entries);

    table.set_sorting(vec![ColumnSort::asc("description")]);
    assert_eq!(table.view().row_ids(), vec!["3", "1", "2"]);

    table.set_sorting(vec![ColumnSort::desc("description")]);
    assert_eq!(table.view().row_ids(), vec!["1", "3", "2"]);
}

#[test]
fn test_sync_only_resets_on_new_generation() {
    let mut table = TableController::new(DASHBOARD_COLUMNS, 10);
    let entries = numbered_entries(12);
    assert!(table.sync(1, &entries));
    table.toggle_row_selection("1");
    table.set_expanded("2", true);

    assert!(!table.sync(1, &entries));
    assert!(table.state().is_selected("1"));

    assert!(table.sync(2, &numbered_entries(11)));
    assert!(table.state().row_selection.is_empty());
    assert!(table.state().expanded.is_empty());
    assert_eq!(table.entries().len(), 11);
}

#[test]
fn test_visibility_does_not_touch_selection() {
    let mut table = controller(numbered_entries(5));
    table.toggle_row_selection("2");
    table.set_expanded("2", true);
    table.set_column_visible("description", false);

    let view = table.view();
    assert!(!view.visible_columns.contains(&"description"));
    assert!(view.rows[1].selected);
    assert!(view.rows[1].expanded);
}

#[test]
fn test_hidden_column_still_sorts() {
    let mut table = controller(vec![
        EntryBuilder::new("1", "kibana").build(),
        EntryBuilder::new("2", "Grafana").build(),
        EntryBuilder::new("3", "alertmanager").build(),
    ]);
    table.set_column_visible("name", false);
    table.set_sorting(vec![ColumnSort::asc("name")]);

    let view = table.view();
    assert!(!view.visible_columns.contains(&"name"));
    assert_eq!(view.row_ids(), vec!["3", "2", "1"]);

    table.set_sorting(vec![ColumnSort::desc("name")]);
    assert_eq!(table.view().row_ids(), vec!["1", "2", "3"]);
}
