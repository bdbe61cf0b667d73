//! Settings page - console preferences and the active MQTT profile
//!
//! This page provides configuration for:
//! - Table page size
//! - Default pipeline and notification lifetime
//! - Display and logging options

use egui::{Color32, Context, RichText, Ui};

use super::Page;
use crate::config::{config_path, ConsoleConfig};
use crate::frontend::state::{AppAction, SharedState};

/// State specific to the Settings page
#[derive(Default)]
pub struct SettingsPageState {
    /// Config as last saved, to show the unsaved marker
    pub saved: Option<ConsoleConfig>,
}

pub struct SettingsPage;

impl Page for SettingsPage {
    type State = SettingsPageState;

    fn render(
        state: &mut Self::State,
        shared: &mut SharedState<'_>,
        ctx: &Context,
    ) -> Vec<AppAction> {
        let mut actions = Vec::new();
        let saved = state.saved.get_or_insert_with(|| shared.config.clone()).clone();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Settings");
                ui.separator();

                Self::render_table_section(shared, ui);
                ui.separator();

                Self::render_pipeline_section(shared, ui);
                ui.separator();

                Self::render_display_section(shared, ui);
                ui.separator();

                Self::render_profile_section(shared, ui, &mut actions);
                ui.separator();

                ui.horizontal(|ui| {
                    let dirty = *shared.config != saved;
                    if ui.add_enabled(dirty, egui::Button::new("Save")).clicked() {
                        actions.push(AppAction::SaveConfig);
                        state.saved = Some(shared.config.clone());
                    }
                    if ui.add_enabled(dirty, egui::Button::new("Revert")).clicked() {
                        *shared.config = saved.clone();
                    }
                    if ui.button("Restore defaults").clicked() {
                        *shared.config = ConsoleConfig::default();
                    }
                    if dirty {
                        ui.colored_label(Color32::YELLOW, "Unsaved changes");
                    }
                });

                if let Some(path) = config_path() {
                    ui.label(
                        RichText::new(format!("Config file: {}", path.display()))
                            .small()
                            .color(Color32::GRAY),
                    );
                }
            });
        });

        actions
    }
}

impl SettingsPage {
    fn render_table_section(shared: &mut SharedState<'_>, ui: &mut Ui) {
        ui.label(RichText::new("Tables").strong());
        ui.horizontal(|ui| {
            ui.label("Rows per page:");
            ui.add(egui::DragValue::new(&mut shared.config.page_size).range(1..=200));
        });
    }

    fn render_pipeline_section(shared: &mut SharedState<'_>, ui: &mut Ui) {
        ui.label(RichText::new("Pipelines").strong());
        ui.horizontal(|ui| {
            ui.label("Default pipeline:");
            ui.text_edit_singleline(&mut shared.config.default_pipeline_id);
        });
    }

    fn render_display_section(shared: &mut SharedState<'_>, ui: &mut Ui) {
        ui.label(RichText::new("Display").strong());
        if ui.checkbox(&mut shared.config.dark_mode, "Dark mode").changed() {
            let visuals = if shared.config.dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            };
            ui.ctx().set_visuals(visuals);
        }
        ui.horizontal(|ui| {
            ui.label("Notification lifetime:");
            ui.add(
                egui::DragValue::new(&mut shared.config.notification_ttl_secs)
                    .range(1..=60)
                    .suffix(" s"),
            );
        });
        ui.checkbox(&mut shared.config.log_to_file, "Write log file")
            .on_hover_text("Takes effect on next start");
    }

    fn render_profile_section(shared: &mut SharedState<'_>, ui: &mut Ui, actions: &mut Vec<AppAction>) {
        ui.label(RichText::new("MQTT profile").strong());
        match shared.active_profile {
            Some(profile) => {
                ui.horizontal(|ui| {
                    ui.label(format!("Active: {}", profile.name));
                    if ui.button("Clear").clicked() {
                        actions.push(AppAction::ClearProfile);
                    }
                });
            }
            None => {
                ui.label(RichText::new("No profile selected").weak());
            }
        }
    }
}
