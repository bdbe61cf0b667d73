//! Create / rename gitops target dialog

use egui::{Color32, Ui};

use super::{Dialog, DialogAction, DialogState};
use crate::backend::Mutation;
use crate::types::{GitopsTarget, NewGitopsTarget};

#[derive(Debug, Default)]
pub struct GitopsFormState {
    pub name: String,
    pub editing: Option<GitopsTarget>,
    pub submitting: bool,
    pub error: Option<String>,
}

impl DialogState for GitopsFormState {
    fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

impl GitopsFormState {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn edit(target: &GitopsTarget) -> Self {
        Self {
            name: target.name.clone(),
            editing: Some(target.clone()),
            ..Self::default()
        }
    }

    pub fn submit_failed(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.error = Some(message.into());
    }

    fn mutation(&self) -> Mutation {
        let name = self.name.trim().to_string();
        match &self.editing {
            Some(target) => Mutation::UpdateGitops(GitopsTarget {
                id: target.id.clone(),
                name,
            }),
            None => Mutation::CreateGitops(NewGitopsTarget { name }),
        }
    }
}

#[derive(Debug, Clone)]
pub enum GitopsFormAction {
    Submit(Mutation),
}

pub struct GitopsFormDialog;

impl Dialog for GitopsFormDialog {
    type State = GitopsFormState;
    type Action = GitopsFormAction;
    type Context<'a> = ();

    fn title(state: &Self::State) -> &'static str {
        if state.editing.is_some() {
            "Edit Gitops"
        } else {
            "Create Gitops"
        }
    }

    fn render(
        state: &mut Self::State,
        _ctx: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action> {
        ui.horizontal(|ui| {
            ui.label("Name:");
            ui.add_enabled(
                !state.submitting,
                egui::TextEdit::singleline(&mut state.name),
            );
        });

        if let Some(error) = &state.error {
            ui.colored_label(Color32::RED, error.as_str());
        }

        ui.separator();

        ui.horizontal(|ui| {
            let can_submit = !state.submitting && state.is_valid();
            if ui.add_enabled(can_submit, egui::Button::new("Save")).clicked() {
                state.submitting = true;
                state.error = None;
                return DialogAction::Action(GitopsFormAction::Submit(state.mutation()));
            }
            if state.submitting {
                ui.spinner();
            }
            if ui.button("Cancel").clicked() {
                return DialogAction::Close;
            }
            DialogAction::None
        })
        .inner
    }
}
