//! Top bar: page title and the MQTT profile selector.

use egui::{RichText, Ui};

use crate::backend::QueryKey;
use crate::frontend::query_cache::QueryCache;
use crate::frontend::state::{AppAction, PageId};
use crate::types::MqttProfile;

/// Text shown in the closed profile selector.
pub fn profile_selector_text(
    loading: bool,
    profiles: &[MqttProfile],
    active: Option<&MqttProfile>,
) -> String {
    if loading && profiles.is_empty() {
        return "Loading profiles...".into();
    }
    if profiles.is_empty() {
        return "No mqtt profiles found".into();
    }
    match active {
        Some(profile) => profile.name.clone(),
        None => "Select profile".into(),
    }
}

pub fn render_title_bar(
    ui: &mut Ui,
    page: PageId,
    cache: &QueryCache,
    active: Option<&MqttProfile>,
    actions: &mut Vec<AppAction>,
) {
    ui.horizontal(|ui| {
        ui.heading(page.title());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let profiles = cache.mqtt_profile_list();
            let loading = cache.is_loading(&QueryKey::MqttProfiles);
            let text = profile_selector_text(loading, profiles, active);

            ui.add_enabled_ui(!profiles.is_empty(), |ui| {
                egui::ComboBox::from_id_salt("mqtt_profile_selector")
                    .selected_text(text)
                    .width(180.0)
                    .show_ui(ui, |ui| {
                        for profile in profiles {
                            let is_selected = active.is_some_and(|a| a.id == profile.id);
                            if ui.selectable_label(is_selected, &profile.name).clicked()
                                && !is_selected
                            {
                                actions.push(AppAction::SelectProfile(profile.id.clone()));
                            }
                        }
                    });
            });
            ui.label(RichText::new("Profile").small());
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_text() {
        let profiles = vec![MqttProfile::new("a", "local"), MqttProfile::new("b", "cloud")];
        assert_eq!(profile_selector_text(true, &[], None), "Loading profiles...");
        assert_eq!(profile_selector_text(false, &[], None), "No mqtt profiles found");
        assert_eq!(profile_selector_text(false, &profiles, None), "Select profile");
        assert_eq!(
            profile_selector_text(true, &profiles, Some(&profiles[1])),
            "cloud"
        );
    }
}
