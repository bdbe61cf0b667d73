//! Integration tests for persisted console state
//!
//! Each test points the data directory at a fresh temp dir through the
//! environment, so they run serially.

use gitops_console::config::{ConsoleConfig, CONFIG_FILE, DATA_DIR_ENV};
use gitops_console::profile::{
    ActiveProfile, FileProfileStore, ProfileStore, ACTIVE_PROFILE_FILE,
};
use gitops_console::types::MqttProfile;
use serial_test::serial;
use tempfile::TempDir;

fn with_data_dir<F: FnOnce(&TempDir)>(f: F) {
    let dir = TempDir::new().unwrap();
    std::env::set_var(DATA_DIR_ENV, dir.path());
    f(&dir);
    std::env::remove_var(DATA_DIR_ENV);
}

fn profiles() -> Vec<MqttProfile> {
    vec![
        MqttProfile::new("local", "Local broker"),
        MqttProfile::new("cloud", "Cloud broker"),
    ]
}

#[test]
#[serial]
fn test_active_profile_survives_restart() {
    with_data_dir(|dir| {
        let store = FileProfileStore::in_app_data_dir().unwrap();
        let mut active = ActiveProfile::new(store);
        active.select("cloud", &profiles()).unwrap();
        assert!(dir.path().join(ACTIVE_PROFILE_FILE).exists());

        let restarted = ActiveProfile::new(FileProfileStore::in_app_data_dir().unwrap());
        assert_eq!(restarted.stored().map(|p| p.id.as_str()), Some("cloud"));
    });
}

#[test]
#[serial]
fn test_clear_removes_file_and_falls_back_to_first() {
    with_data_dir(|dir| {
        let mut active = ActiveProfile::new(FileProfileStore::in_app_data_dir().unwrap());
        active.select("cloud", &profiles()).unwrap();
        active.clear().unwrap();

        assert!(!dir.path().join(ACTIVE_PROFILE_FILE).exists());
        let list = profiles();
        assert_eq!(active.effective(&list).map(|p| p.id.as_str()), Some("local"));

        // Clearing twice is fine
        active.clear().unwrap();
    });
}

#[test]
#[serial]
fn test_corrupt_profile_file_counts_as_none() {
    with_data_dir(|dir| {
        std::fs::write(dir.path().join(ACTIVE_PROFILE_FILE), "{ not json").unwrap();

        let store = FileProfileStore::in_app_data_dir().unwrap();
        assert!(store.load_active().is_err());

        let active = ActiveProfile::new(store);
        assert!(active.stored().is_none());
    });
}

#[test]
#[serial]
fn test_extra_profile_fields_round_trip() {
    with_data_dir(|_| {
        let profile: MqttProfile = serde_json::from_value(serde_json::json!({
            "id": "edge",
            "name": "Edge broker",
            "host": "10.0.0.5",
            "port": 1883
        }))
        .unwrap();

        let mut store = FileProfileStore::in_app_data_dir().unwrap();
        store.save_active(Some(&profile)).unwrap();
        let loaded = store.load_active().unwrap().unwrap();
        assert_eq!(loaded, profile);
        assert_eq!(loaded.extra["port"], 1883);
    });
}

#[test]
#[serial]
fn test_config_saved_in_data_dir() {
    with_data_dir(|dir| {
        let config = ConsoleConfig {
            page_size: 25,
            default_pipeline_id: "edge".into(),
            ..ConsoleConfig::default()
        };
        config.save().unwrap();
        assert!(dir.path().join(CONFIG_FILE).exists());

        assert_eq!(ConsoleConfig::load().unwrap(), config);
        assert_eq!(ConsoleConfig::load_or_default().page_size, 25);
    });
}

#[test]
#[serial]
fn test_malformed_config_falls_back_to_defaults() {
    with_data_dir(|dir| {
        std::fs::write(dir.path().join(CONFIG_FILE), "page_size = \"many\"").unwrap();
        assert!(ConsoleConfig::load().is_err());
        assert_eq!(ConsoleConfig::load_or_default(), ConsoleConfig::default());
    });
}
