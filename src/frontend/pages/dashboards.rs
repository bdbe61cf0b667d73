//! Dashboard hub page - table of dashboard entries
//!
//! This page provides:
//! - Name filter, column visibility and sortable headers
//! - Row selection with bulk delete
//! - Create / edit / delete dialogs driven by backend mutations

use egui::{Color32, Context, RichText, Ui};

use super::Page;
use crate::backend::{Mutation, MutationKind, QueryKey};
use crate::frontend::data_table::{column_menu, show_table};
use crate::frontend::dialogs::{
    show_dialog, ConfirmDeleteAction, ConfirmDeleteDialog, ConfirmDeleteState, EntryFormAction,
    EntryFormDialog, EntryFormState,
};
use crate::frontend::state::{AppAction, SharedState};
use crate::table::{TableController, ACTIONS_COLUMN, DASHBOARD_COLUMNS, DEFAULT_PAGE_SIZE};
use crate::types::DashboardEntry;

/// State specific to the dashboard hub page
pub struct DashboardsPageState {
    pub table: TableController<DashboardEntry>,
    /// Create / edit dialog
    pub entry_form_open: bool,
    pub entry_form_state: EntryFormState,
    /// Delete confirmation dialog
    pub confirm_delete_open: bool,
    pub confirm_delete_state: ConfirmDeleteState,
}

impl Default for DashboardsPageState {
    fn default() -> Self {
        Self {
            table: TableController::new(DASHBOARD_COLUMNS, DEFAULT_PAGE_SIZE),
            entry_form_open: false,
            entry_form_state: EntryFormState::default(),
            confirm_delete_open: false,
            confirm_delete_state: ConfirmDeleteState::default(),
        }
    }
}

impl DashboardsPageState {
    fn open_create(&mut self) {
        self.entry_form_state = EntryFormState::create();
        self.entry_form_open = true;
    }

    fn open_edit(&mut self, entry: &DashboardEntry) {
        self.entry_form_state = EntryFormState::edit(entry);
        self.entry_form_open = true;
    }

    fn open_delete(&mut self, entries: &[&DashboardEntry]) {
        let label = match entries {
            [single] => format!("dashboard entry \"{}\"", single.name),
            many => format!("{} dashboard entries", many.len()),
        };
        let pending = entries
            .iter()
            .map(|e| Mutation::DeleteDashboardEntry(e.id.clone()))
            .collect();
        self.confirm_delete_state = ConfirmDeleteState::new(label, pending);
        self.confirm_delete_open = true;
    }

    /// Close the form on success, surface the error otherwise.
    fn apply_outcomes(&mut self, shared: &SharedState<'_>) {
        if !self.entry_form_state.submitting {
            return;
        }
        let outcome = shared.mutation_outcomes.iter().find(|o| {
            matches!(
                o.kind,
                MutationKind::CreateDashboardEntry | MutationKind::UpdateDashboardEntry
            )
        });
        match outcome {
            Some(o) if o.succeeded() => {
                self.entry_form_open = false;
                self.entry_form_state = EntryFormState::default();
            }
            Some(o) => self
                .entry_form_state
                .submit_failed(o.error.clone().unwrap_or_else(|| o.kind.failure_message().into())),
            None => {}
        }
    }
}

pub struct DashboardsPage;

impl Page for DashboardsPage {
    type State = DashboardsPageState;

    fn render(
        state: &mut Self::State,
        shared: &mut SharedState<'_>,
        ctx: &Context,
    ) -> Vec<AppAction> {
        let mut actions = Vec::new();
        let key = QueryKey::DashboardEntries;

        if shared.cache.needs_fetch(&key) {
            actions.push(AppAction::Fetch(key.clone()));
        }
        if let Some(cached) = &shared.cache.dashboard_entries {
            state.table.sync(cached.generation, &cached.data);
        }
        if state.table.state().pagination.page_size != shared.config.page_size {
            state.table.set_page_size(shared.config.page_size);
        }
        state.apply_outcomes(shared);

        egui::CentralPanel::default().show(ctx, |ui| {
            Self::render_toolbar(state, ui);
            ui.separator();

            if let Some(error) = shared.cache.error(&key) {
                ui.horizontal(|ui| {
                    ui.colored_label(Color32::RED, format!("Failed to load entries: {}", error));
                    if ui.button("Retry").clicked() {
                        actions.push(AppAction::Fetch(key.clone()));
                    }
                });
            }

            if !shared.cache.has_data(&key) && shared.cache.is_loading(&key) {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading dashboard entries...");
                });
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                Self::render_table(state, ui);
            });
        });

        if let Some(EntryFormAction::Submit(mutation)) = show_dialog::<EntryFormDialog>(
            ctx,
            &mut state.entry_form_open,
            &mut state.entry_form_state,
            (),
        ) {
            actions.push(AppAction::Mutate(mutation));
        }

        if let Some(ConfirmDeleteAction::Confirm(mutations)) = show_dialog::<ConfirmDeleteDialog>(
            ctx,
            &mut state.confirm_delete_open,
            &mut state.confirm_delete_state,
            (),
        ) {
            state.table.clear_selection();
            actions.extend(mutations.into_iter().map(AppAction::Mutate));
        }

        actions
    }
}

impl DashboardsPage {
    fn render_toolbar(state: &mut DashboardsPageState, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let mut filter = state.table.filter_value("name").to_string();
            let response = ui.add(
                egui::TextEdit::singleline(&mut filter)
                    .hint_text("Find dashboards...")
                    .desired_width(240.0),
            );
            if response.changed() {
                state.table.set_column_filter("name", &filter);
            }

            column_menu(ui, &mut state.table);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Create Dashboard Entry").clicked() {
                    state.open_create();
                }

                let selected: Vec<DashboardEntry> =
                    state.table.selected_rows().into_iter().cloned().collect();
                let delete = egui::Button::new(format!("Delete selected ({})", selected.len()));
                if ui.add_enabled(!selected.is_empty(), delete).clicked() {
                    let refs: Vec<&DashboardEntry> = selected.iter().collect();
                    state.open_delete(&refs);
                }
            });
        });
    }

    fn render_table(state: &mut DashboardsPageState, ui: &mut Ui) {
        let mut edit: Option<DashboardEntry> = None;
        let mut delete: Option<DashboardEntry> = None;

        show_table(
            ui,
            "dashboard_entries_table",
            &mut state.table,
            "No dashboard entries found.",
            |ui, column, entry| match column {
                "name" => match entry.url.as_deref() {
                    Some(url) if !url.is_empty() => {
                        ui.hyperlink_to(&entry.name, url);
                    }
                    _ => {
                        ui.label(&entry.name);
                    }
                },
                "description" => {
                    let text = entry
                        .description
                        .as_deref()
                        .filter(|d| !d.is_empty())
                        .unwrap_or("N/A");
                    ui.label(text);
                }
                ACTIONS_COLUMN => {
                    ui.menu_button("Actions", |ui| {
                        if ui.button("Edit").clicked() {
                            edit = Some(entry.clone());
                            ui.close();
                        }
                        if ui.button(RichText::new("Delete").color(Color32::LIGHT_RED)).clicked() {
                            delete = Some(entry.clone());
                            ui.close();
                        }
                    });
                }
                _ => {
                    ui.label("");
                }
            },
            |ui, entry| {
                let details = [("ID", Some(entry.id.as_str())), ("URL", entry.url.as_deref())];
                if details.iter().all(|(_, v)| v.is_none()) {
                    ui.label("No displayable data.");
                    return;
                }
                for (label, value) in details {
                    if let Some(value) = value {
                        ui.label(RichText::new(format!("{}: {}", label, value)).small());
                    }
                }
            },
        );

        if let Some(entry) = edit {
            state.open_edit(&entry);
        }
        if let Some(entry) = delete {
            state.open_delete(&[&entry]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConsoleConfig;
    use crate::frontend::query_cache::QueryCache;
    use crate::frontend::state::MutationOutcome;

    fn entry(id: &str, name: &str) -> DashboardEntry {
        DashboardEntry {
            id: id.into(),
            name: name.into(),
            description: None,
            url: None,
        }
    }

    #[test]
    fn test_bulk_delete_label_and_mutations() {
        let mut state = DashboardsPageState::default();
        let a = entry("1", "Grafana");
        let b = entry("2", "Kibana");
        state.open_delete(&[&a, &b]);
        assert!(state.confirm_delete_open);
        assert_eq!(state.confirm_delete_state.label, "2 dashboard entries");
        assert_eq!(
            state.confirm_delete_state.pending,
            vec![
                Mutation::DeleteDashboardEntry("1".into()),
                Mutation::DeleteDashboardEntry("2".into()),
            ]
        );

        state.open_delete(&[&a]);
        assert_eq!(state.confirm_delete_state.label, "dashboard entry \"Grafana\"");
    }

    #[test]
    fn test_form_closes_only_on_success() {
        let cache = QueryCache::new();
        let mut config = ConsoleConfig::default();
        let mut state = DashboardsPageState::default();
        state.open_create();
        state.entry_form_state.submitting = true;

        let failed = [MutationOutcome {
            kind: MutationKind::CreateDashboardEntry,
            error: Some("Error creating dashboard entry".into()),
        }];
        let shared = SharedState {
            cache: &cache,
            config: &mut config,
            active_profile: None,
            mutation_outcomes: &failed,
        };
        state.apply_outcomes(&shared);
        assert!(state.entry_form_open);
        assert_eq!(
            state.entry_form_state.submit_error.as_deref(),
            Some("Error creating dashboard entry")
        );

        state.entry_form_state.submitting = true;
        let ok = [MutationOutcome {
            kind: MutationKind::CreateDashboardEntry,
            error: None,
        }];
        let shared = SharedState {
            cache: &cache,
            config: &mut config,
            active_profile: None,
            mutation_outcomes: &ok,
        };
        state.apply_outcomes(&shared);
        assert!(!state.entry_form_open);
    }
}
