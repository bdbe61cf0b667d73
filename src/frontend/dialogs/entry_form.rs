//! Create / edit dashboard entry dialog
//!
//! Stays open while the mutation is in flight and closes only once the
//! owning page sees it succeed.

use egui::{Color32, RichText, Ui};

use super::{Dialog, DialogAction, DialogState};
use crate::backend::Mutation;
use crate::forms::{DashboardEntryForm, FieldError, FormField};
use crate::types::DashboardEntry;

/// State for the dashboard entry dialog
#[derive(Debug, Default)]
pub struct EntryFormState {
    pub form: DashboardEntryForm,
    /// Entry being edited; `None` creates a new one
    pub editing: Option<DashboardEntry>,
    pub errors: Vec<FieldError>,
    /// A submitted mutation has not been answered yet
    pub submitting: bool,
    pub submit_error: Option<String>,
}

impl DialogState for EntryFormState {
    fn is_valid(&self) -> bool {
        self.form.validate().is_empty()
    }
}

impl EntryFormState {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn edit(entry: &DashboardEntry) -> Self {
        Self {
            form: DashboardEntryForm::from_entry(entry),
            editing: Some(entry.clone()),
            ..Self::default()
        }
    }

    /// Called when the backend rejected the submitted mutation
    pub fn submit_failed(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.submit_error = Some(message.into());
    }
}

#[derive(Debug, Clone)]
pub enum EntryFormAction {
    Submit(Mutation),
}

pub struct EntryFormDialog;

impl Dialog for EntryFormDialog {
    type State = EntryFormState;
    type Action = EntryFormAction;
    type Context<'a> = ();

    const WIDTH: f32 = 420.0;

    fn title(state: &Self::State) -> &'static str {
        if state.editing.is_some() {
            "Edit Dashboard Entry"
        } else {
            "Create Dashboard Entry"
        }
    }

    fn render(
        state: &mut Self::State,
        _ctx: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action> {
        ui.add_enabled_ui(!state.submitting, |ui| {
            ui.label("Dashboard Name")
                .on_hover_text("The name shown in the dashboard hub.");
            ui.text_edit_singleline(&mut state.form.dashboard_name);
            field_error(ui, &state.errors, FormField::DashboardName);

            ui.add_space(4.0);
            ui.label("Description");
            ui.add(
                egui::TextEdit::multiline(&mut state.form.description)
                    .desired_rows(3)
                    .hint_text("Optional"),
            );
            field_error(ui, &state.errors, FormField::Description);

            ui.add_space(4.0);
            ui.label("URL");
            ui.add(
                egui::TextEdit::singleline(&mut state.form.url)
                    .hint_text("https://grafana.example.com/d/..."),
            );
            field_error(ui, &state.errors, FormField::Url);
        });

        if let Some(error) = &state.submit_error {
            ui.add_space(4.0);
            ui.colored_label(Color32::RED, error.as_str());
        }

        ui.separator();

        ui.horizontal(|ui| {
            let submit = ui.add_enabled(!state.submitting, egui::Button::new("Save"));
            if state.submitting {
                ui.spinner();
            }
            if submit.clicked() {
                state.errors = state.form.validate();
                if state.errors.is_empty() {
                    match state.form.clone().into_mutation(state.editing.as_ref()) {
                        Ok(mutation) => {
                            state.submitting = true;
                            state.submit_error = None;
                            return DialogAction::Action(EntryFormAction::Submit(mutation));
                        }
                        Err(e) => state.submit_error = Some(e.to_string()),
                    }
                }
            }
            if ui.button("Cancel").clicked() {
                return DialogAction::Close;
            }
            DialogAction::None
        })
        .inner
    }
}

fn field_error(ui: &mut Ui, errors: &[FieldError], field: FormField) {
    if let Some(message) = DashboardEntryForm::error_for(errors, field) {
        ui.label(RichText::new(message).small().color(Color32::LIGHT_RED));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_prefills_form() {
        let entry = DashboardEntry {
            id: "3".into(),
            name: "Grafana".into(),
            description: None,
            url: Some("https://grafana.local".into()),
        };
        let state = EntryFormState::edit(&entry);
        assert_eq!(EntryFormDialog::title(&state), "Edit Dashboard Entry");
        assert_eq!(state.form.url, "https://grafana.local");
        assert!(state.is_valid());
    }

    #[test]
    fn test_failed_submit_reenables_form() {
        let mut state = EntryFormState::create();
        state.submitting = true;
        state.submit_failed("Error creating dashboard entry");
        assert!(!state.submitting);
        assert!(!state.is_valid());
        state.reset();
        assert!(state.submit_error.is_none());
    }
}
