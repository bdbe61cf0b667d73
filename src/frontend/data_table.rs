//! Generic egui rendering of a [`TableController`].
//!
//! The derived view borrows the controller, so clicks are collected as
//! [`TableEvent`]s during rendering and applied once the view is dropped.

use egui::{Color32, RichText, Ui};

use crate::table::{find_column, TableController, TableRow, SELECT_COLUMN};

/// A user interaction with the table chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    ToggleSort(&'static str),
    ToggleRow(String),
    /// Header checkbox: select or clear every row of the current page
    SelectPage(bool),
    ToggleExpanded(String),
    SetColumnVisible(&'static str, bool),
    NextPage,
    PreviousPage,
}

impl TableEvent {
    pub fn apply<R: TableRow>(self, table: &mut TableController<R>) {
        match self {
            TableEvent::ToggleSort(column) => table.toggle_sorting(column),
            TableEvent::ToggleRow(id) => table.toggle_row_selection(&id),
            TableEvent::SelectPage(selected) => table.toggle_all_visible_rows_selection(selected),
            TableEvent::ToggleExpanded(id) => table.toggle_expanded(&id),
            TableEvent::SetColumnVisible(column, visible) => {
                table.set_column_visible(column, visible)
            }
            TableEvent::NextPage => table.next_page(),
            TableEvent::PreviousPage => table.previous_page(),
        }
    }
}

/// Sort indicator for a column header
fn sort_marker<R: TableRow>(table: &TableController<R>, column: &str) -> &'static str {
    match table.state().sorting.iter().find(|s| s.column == column) {
        Some(sort) if sort.descending => " ▼",
        Some(_) => " ▲",
        None => "",
    }
}

/// "Columns" dropdown toggling the hideable columns.
pub fn column_menu<R: TableRow>(ui: &mut Ui, table: &mut TableController<R>) {
    let mut events = Vec::new();
    ui.menu_button("Columns", |ui| {
        for column in table.columns().iter().filter(|c| c.hideable) {
            let mut visible = table.state().is_column_visible(column.key);
            if ui.checkbox(&mut visible, column.header).changed() {
                events.push(TableEvent::SetColumnVisible(column.key, visible));
            }
        }
    });
    for event in events {
        event.apply(table);
    }
}

/// Render the current page of `table` plus its pagination footer.
///
/// `cell` draws the content of one non-select column for one row;
/// `expanded` draws the detail block under an expanded row.
pub fn show_table<R, C, E>(
    ui: &mut Ui,
    id_salt: &str,
    table: &mut TableController<R>,
    empty_text: &str,
    mut cell: C,
    mut expanded: E,
) where
    R: TableRow,
    C: FnMut(&mut Ui, &'static str, &R),
    E: FnMut(&mut Ui, &R),
{
    let mut events = Vec::new();

    {
        let view = table.view();
        let has_select = view.visible_columns.contains(&SELECT_COLUMN);

        egui::Grid::new(id_salt)
            .striped(true)
            .num_columns(view.visible_columns.len())
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                // Header
                for &key in &view.visible_columns {
                    if key == SELECT_COLUMN {
                        let mut all = view.is_all_page_rows_selected;
                        let checkbox = egui::Checkbox::new(&mut all, "")
                            .indeterminate(
                                view.is_some_page_rows_selected && !view.is_all_page_rows_selected,
                            );
                        if ui.add_enabled(!view.is_empty(), checkbox).changed() {
                            events.push(TableEvent::SelectPage(all));
                        }
                        continue;
                    }
                    let Some(column) = find_column(table.columns(), key) else {
                        ui.label("");
                        continue;
                    };
                    if column.sortable {
                        let text = format!("{}{}", column.header, sort_marker(table, key));
                        if ui.button(RichText::new(text).strong()).clicked() {
                            events.push(TableEvent::ToggleSort(column.key));
                        }
                    } else {
                        ui.label(RichText::new(column.header).strong());
                    }
                }
                ui.end_row();

                if view.is_empty() {
                    ui.label(RichText::new(empty_text).weak());
                    ui.end_row();
                    return;
                }

                for row in &view.rows {
                    let id = row.row.row_id();
                    for &key in &view.visible_columns {
                        if key == SELECT_COLUMN {
                            ui.horizontal(|ui| {
                                let mut selected = row.selected;
                                if ui.checkbox(&mut selected, "").changed() {
                                    events.push(TableEvent::ToggleRow(id.to_string()));
                                }
                                let arrow = if row.expanded { "▾" } else { "▸" };
                                if ui.small_button(arrow).clicked() {
                                    events.push(TableEvent::ToggleExpanded(id.to_string()));
                                }
                            });
                        } else {
                            cell(ui, key, row.row);
                        }
                    }
                    ui.end_row();

                    if row.expanded {
                        if has_select {
                            ui.label("");
                        }
                        ui.vertical(|ui| expanded(ui, row.row));
                        ui.end_row();
                    }
                }
            });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!(
                    "{} of {} row(s) selected.",
                    view.filtered_selected_count, view.filtered_rows
                ))
                .small()
                .color(Color32::GRAY),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(view.can_go_next, egui::Button::new("Next"))
                    .clicked()
                {
                    events.push(TableEvent::NextPage);
                }
                if ui
                    .add_enabled(view.can_go_previous, egui::Button::new("Previous"))
                    .clicked()
                {
                    events.push(TableEvent::PreviousPage);
                }
                ui.label(
                    RichText::new(format!(
                        "Page {} of {}",
                        view.page_index + 1,
                        view.page_count.max(1)
                    ))
                    .small(),
                );
            });
        });
    }

    for event in events {
        tracing::trace!("Table {}: {:?}", id_salt, event);
        event.apply(table);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::DASHBOARD_COLUMNS;
    use crate::types::DashboardEntry;

    fn entries(n: usize) -> Vec<DashboardEntry> {
        (1..=n)
            .map(|i| DashboardEntry {
                id: i.to_string(),
                name: format!("Dashboard {:02}", i),
                description: None,
                url: None,
            })
            .collect()
    }

    #[test]
    fn test_events_drive_controller() {
        let mut table = TableController::new(DASHBOARD_COLUMNS, 10);
        table.set_entries(entries(15));

        TableEvent::NextPage.apply(&mut table);
        assert_eq!(table.state().pagination.page_index, 1);

        TableEvent::SelectPage(true).apply(&mut table);
        assert_eq!(table.selected_rows().len(), 5);

        TableEvent::PreviousPage.apply(&mut table);
        TableEvent::ToggleRow("3".into()).apply(&mut table);
        assert_eq!(table.selected_rows().len(), 6);

        TableEvent::ToggleExpanded("3".into()).apply(&mut table);
        assert!(table.state().is_expanded("3"));
    }

    #[test]
    fn test_sort_marker_follows_toggle() {
        let mut table = TableController::new(DASHBOARD_COLUMNS, 10);
        table.set_entries(entries(3));
        assert_eq!(sort_marker(&table, "name"), "");
        TableEvent::ToggleSort("name").apply(&mut table);
        assert_eq!(sort_marker(&table, "name"), " ▲");
        TableEvent::ToggleSort("name").apply(&mut table);
        assert_eq!(sort_marker(&table, "name"), " ▼");
        TableEvent::ToggleSort("name").apply(&mut table);
        assert_eq!(sort_marker(&table, "name"), "");
    }

    #[test]
    fn test_hiding_column() {
        let mut table: TableController<DashboardEntry> =
            TableController::new(DASHBOARD_COLUMNS, 10);
        TableEvent::SetColumnVisible("description", false).apply(&mut table);
        assert!(!table.view().visible_columns.contains(&"description"));
    }
}
