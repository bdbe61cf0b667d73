//! Gitops page - list of gitops targets with create / rename / delete

use egui::{Color32, Context, RichText};

use super::Page;
use crate::backend::{Mutation, MutationKind, QueryKey};
use crate::frontend::data_table::show_table;
use crate::frontend::dialogs::{
    show_dialog, ConfirmDeleteAction, ConfirmDeleteDialog, ConfirmDeleteState, GitopsFormAction,
    GitopsFormDialog, GitopsFormState,
};
use crate::frontend::state::{AppAction, SharedState};
use crate::table::{TableController, ACTIONS_COLUMN, DEFAULT_PAGE_SIZE, GITOPS_COLUMNS};
use crate::types::GitopsTarget;

pub struct GitopsPageState {
    pub table: TableController<GitopsTarget>,
    pub form_open: bool,
    pub form_state: GitopsFormState,
    pub confirm_delete_open: bool,
    pub confirm_delete_state: ConfirmDeleteState,
}

impl Default for GitopsPageState {
    fn default() -> Self {
        Self {
            table: TableController::new(GITOPS_COLUMNS, DEFAULT_PAGE_SIZE),
            form_open: false,
            form_state: GitopsFormState::default(),
            confirm_delete_open: false,
            confirm_delete_state: ConfirmDeleteState::default(),
        }
    }
}

impl GitopsPageState {
    fn apply_outcomes(&mut self, shared: &SharedState<'_>) {
        if !self.form_state.submitting {
            return;
        }
        let outcome = shared
            .mutation_outcomes
            .iter()
            .find(|o| matches!(o.kind, MutationKind::CreateGitops | MutationKind::UpdateGitops));
        match outcome {
            Some(o) if o.succeeded() => {
                self.form_open = false;
                self.form_state = GitopsFormState::default();
            }
            Some(o) => self
                .form_state
                .submit_failed(o.error.clone().unwrap_or_else(|| o.kind.failure_message().into())),
            None => {}
        }
    }
}

pub struct GitopsPage;

impl Page for GitopsPage {
    type State = GitopsPageState;

    fn render(
        state: &mut Self::State,
        shared: &mut SharedState<'_>,
        ctx: &Context,
    ) -> Vec<AppAction> {
        let mut actions = Vec::new();
        let key = QueryKey::Gitops;

        if shared.cache.needs_fetch(&key) {
            actions.push(AppAction::Fetch(key.clone()));
        }
        if let Some(cached) = &shared.cache.gitops {
            state.table.sync(cached.generation, &cached.data);
        }
        if state.table.state().pagination.page_size != shared.config.page_size {
            state.table.set_page_size(shared.config.page_size);
        }
        state.apply_outcomes(shared);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut filter = state.table.filter_value("name").to_string();
                if ui
                    .add(
                        egui::TextEdit::singleline(&mut filter)
                            .hint_text("Find gitops...")
                            .desired_width(240.0),
                    )
                    .changed()
                {
                    state.table.set_column_filter("name", &filter);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Create Gitops").clicked() {
                        state.form_state = GitopsFormState::create();
                        state.form_open = true;
                    }
                });
            });
            ui.separator();

            if let Some(error) = shared.cache.error(&key) {
                ui.horizontal(|ui| {
                    ui.colored_label(Color32::RED, format!("Failed to load gitops: {}", error));
                    if ui.button("Retry").clicked() {
                        actions.push(AppAction::Fetch(key.clone()));
                    }
                });
            }

            if !shared.cache.has_data(&key) && shared.cache.is_loading(&key) {
                ui.spinner();
                return;
            }

            let mut edit: Option<GitopsTarget> = None;
            let mut delete: Option<GitopsTarget> = None;
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_table(
                    ui,
                    "gitops_table",
                    &mut state.table,
                    "No gitops found.",
                    |ui, column, target| match column {
                        "name" => {
                            ui.label(&target.name);
                        }
                        ACTIONS_COLUMN => {
                            ui.horizontal(|ui| {
                                if ui.small_button("Edit").clicked() {
                                    edit = Some(target.clone());
                                }
                                let label = RichText::new("Delete").color(Color32::LIGHT_RED);
                                if ui.small_button(label).clicked() {
                                    delete = Some(target.clone());
                                }
                            });
                        }
                        _ => {
                            ui.label("");
                        }
                    },
                    |ui, target| {
                        ui.label(RichText::new(format!("ID: {}", target.id)).small());
                    },
                );
            });

            if let Some(target) = edit {
                state.form_state = GitopsFormState::edit(&target);
                state.form_open = true;
            }
            if let Some(target) = delete {
                state.confirm_delete_state = ConfirmDeleteState::new(
                    format!("gitops \"{}\"", target.name),
                    vec![Mutation::DeleteGitops(target.id)],
                );
                state.confirm_delete_open = true;
            }
        });

        if let Some(GitopsFormAction::Submit(mutation)) = show_dialog::<GitopsFormDialog>(
            ctx,
            &mut state.form_open,
            &mut state.form_state,
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
            actions.extend(mutations.into_iter().map(AppAction::Mutate));
        }

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConsoleConfig;
    use crate::frontend::query_cache::QueryCache;
    use crate::frontend::state::MutationOutcome;

    #[test]
    fn test_outcome_for_other_kind_is_ignored() {
        let cache = QueryCache::new();
        let mut config = ConsoleConfig::default();
        let mut state = GitopsPageState {
            form_open: true,
            ..GitopsPageState::default()
        };
        state.form_state.submitting = true;

        let outcomes = [MutationOutcome {
            kind: MutationKind::CreateDashboardEntry,
            error: None,
        }];
        let shared = SharedState {
            cache: &cache,
            config: &mut config,
            active_profile: None,
            mutation_outcomes: &outcomes,
        };
        state.apply_outcomes(&shared);
        assert!(state.form_open);
        assert!(state.form_state.submitting);
    }
}
