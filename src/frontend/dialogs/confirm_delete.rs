//! Delete confirmation dialog
//!
//! Shared by every page that deletes records. The pending mutation is only
//! released when the user confirms.

use egui::{Color32, Ui};

use super::{Dialog, DialogAction, DialogState};
use crate::backend::Mutation;

#[derive(Debug, Default)]
pub struct ConfirmDeleteState {
    /// What is being deleted, for display
    pub label: String,
    pub pending: Vec<Mutation>,
}

impl DialogState for ConfirmDeleteState {
    fn is_valid(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl ConfirmDeleteState {
    pub fn new(label: impl Into<String>, pending: Vec<Mutation>) -> Self {
        Self {
            label: label.into(),
            pending,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ConfirmDeleteAction {
    Confirm(Vec<Mutation>),
}

pub struct ConfirmDeleteDialog;

impl Dialog for ConfirmDeleteDialog {
    type State = ConfirmDeleteState;
    type Action = ConfirmDeleteAction;
    type Context<'a> = ();

    const WIDTH: f32 = 320.0;

    fn title(_state: &Self::State) -> &'static str {
        "Confirm Delete"
    }

    fn render(
        state: &mut Self::State,
        _ctx: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action> {
        if !state.is_valid() {
            return DialogAction::Close;
        }

        ui.label(format!("Delete {}?", state.label));
        ui.label("This cannot be undone.");

        ui.separator();

        ui.horizontal(|ui| {
            let delete = egui::Button::new(egui::RichText::new("Delete").color(Color32::LIGHT_RED));
            if ui.add(delete).clicked() {
                let pending = std::mem::take(&mut state.pending);
                return DialogAction::CloseWithAction(ConfirmDeleteAction::Confirm(pending));
            }
            if ui.button("Cancel").clicked() {
                return DialogAction::Close;
            }
            DialogAction::None
        })
        .inner
    }
}
