//! Status bar panel: bottom bar showing fetch activity and the latest toast.

use egui::{Color32, RichText, Ui};

use crate::frontend::notifications::Notifications;
use crate::frontend::query_cache::QueryCache;

/// Context needed to render the status bar.
pub struct StatusBarContext<'a> {
    pub cache: &'a QueryCache,
    pub notifications: &'a Notifications,
    pub profile_name: Option<&'a str>,
}

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, ctx: &StatusBarContext<'_>) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        // === Backend activity ===
        let loading: Vec<String> = ctx.cache.loading_keys().map(|k| k.to_string()).collect();
        if loading.is_empty() {
            ui.colored_label(Color32::GREEN, "●");
            ui.label(RichText::new("Idle").small());
        } else {
            ui.spinner();
            ui.label(RichText::new(format!("Loading {}", loading.join(", "))).small());
        }

        ui.separator();

        // === Active profile ===
        let (profile_color, profile_text) = match ctx.profile_name {
            Some(name) => (Color32::from_rgb(100, 255, 100), name),
            None => (Color32::GRAY, "none"),
        };
        ui.label(RichText::new("MQTT:").small());
        ui.colored_label(profile_color, RichText::new(profile_text).small());

        // === Latest notification (right-aligned) ===
        if let Some(note) = ctx.notifications.latest() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    RichText::new(note.timestamp.format("%H:%M:%S").to_string())
                        .small()
                        .color(Color32::GRAY),
                );
                ui.colored_label(
                    note.level.color(),
                    RichText::new(note.message.as_str()).small(),
                );
            });
        }
    });
}
