//! Active MQTT profile persistence.
//!
//! The active profile is a client-side preference: it is stored locally,
//! never sent to the backend, and falls back to the first profile the
//! backend lists when nothing has been chosen yet.

use std::path::{Path, PathBuf};

use crate::config::ensure_app_data_dir;
use crate::error::{ConsoleError, Result, ResultExt};
use crate::types::MqttProfile;

/// File holding the active profile inside the data directory
pub const ACTIVE_PROFILE_FILE: &str = "active_mqtt_profile.json";

/// Somewhere to keep the active profile between sessions.
pub trait ProfileStore {
    fn load_active(&self) -> Result<Option<MqttProfile>>;

    /// Persist the active profile. `None` clears it.
    fn save_active(&mut self, profile: Option<&MqttProfile>) -> Result<()>;
}

impl<S: ProfileStore + ?Sized> ProfileStore for Box<S> {
    fn load_active(&self) -> Result<Option<MqttProfile>> {
        (**self).load_active()
    }

    fn save_active(&mut self, profile: Option<&MqttProfile>) -> Result<()> {
        (**self).save_active(profile)
    }
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    path: PathBuf,
}

impl FileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in `dir`/[`ACTIVE_PROFILE_FILE`].
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(ACTIVE_PROFILE_FILE))
    }

    /// Store in the application data directory.
    pub fn in_app_data_dir() -> Result<Self> {
        Ok(Self::in_dir(ensure_app_data_dir()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for FileProfileStore {
    fn load_active(&self) -> Result<Option<MqttProfile>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {:?}", self.path))?;
        let profile = serde_json::from_str(&content).map_err(|e| {
            ConsoleError::Serialization(format!("Invalid active profile file: {}", e))
        })?;
        Ok(Some(profile))
    }

    fn save_active(&mut self, profile: Option<&MqttProfile>) -> Result<()> {
        match profile {
            Some(profile) => {
                if let Some(parent) = self.path.parent() {
                    std::fs::create_dir_all(parent)
                        .context("Failed to create profile directory")?;
                }
                let content = serde_json::to_string_pretty(profile)?;
                std::fs::write(&self.path, content)
                    .with_context(|| format!("Failed to write {:?}", self.path))
            }
            None => match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(ConsoleError::Io(e).with_context("Failed to clear active profile")),
            },
        }
    }
}

/// In-memory store; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    active: Option<MqttProfile>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_active(profile: MqttProfile) -> Self {
        Self {
            active: Some(profile),
        }
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load_active(&self) -> Result<Option<MqttProfile>> {
        Ok(self.active.clone())
    }

    fn save_active(&mut self, profile: Option<&MqttProfile>) -> Result<()> {
        self.active = profile.cloned();
        Ok(())
    }
}

/// Resolves which MQTT profile is active.
pub struct ActiveProfile<S> {
    store: S,
    stored: Option<MqttProfile>,
}

impl<S: ProfileStore> ActiveProfile<S> {
    /// Read the stored profile. An unreadable store counts as empty.
    pub fn new(store: S) -> Self {
        let stored = load_or_none(&store);
        Self { store, stored }
    }

    /// Re-read the store, picking up changes made elsewhere.
    pub fn reload(&mut self) {
        self.stored = load_or_none(&self.store);
    }

    /// The explicitly chosen profile, if any.
    pub fn stored(&self) -> Option<&MqttProfile> {
        self.stored.as_ref()
    }

    /// The profile in effect: the stored one, else the first listed.
    pub fn effective<'a>(&'a self, profiles: &'a [MqttProfile]) -> Option<&'a MqttProfile> {
        self.stored.as_ref().or_else(|| profiles.first())
    }

    /// Make the profile with `profile_id` active. An id missing from
    /// `profiles` clears the stored choice.
    pub fn select(&mut self, profile_id: &str, profiles: &[MqttProfile]) -> Result<()> {
        let chosen = profiles.iter().find(|p| p.id == profile_id);
        if chosen.is_none() {
            tracing::warn!("MQTT profile {:?} is not listed, clearing selection", profile_id);
        }
        self.store.save_active(chosen)?;
        self.stored = chosen.cloned();
        tracing::info!(
            "Active MQTT profile: {}",
            self.stored.as_ref().map_or("<none>", |p| p.name.as_str())
        );
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.save_active(None)?;
        self.stored = None;
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn load_or_none<S: ProfileStore>(store: &S) -> Option<MqttProfile> {
    store.load_active().unwrap_or_else(|e| {
        tracing::warn!("Failed to load active MQTT profile: {}", e);
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profiles() -> Vec<MqttProfile> {
        vec![
            MqttProfile::new("local", "Local broker"),
            MqttProfile::new("cloud", "Cloud broker"),
        ]
    }

    #[test]
    fn test_defaults_to_first_profile() {
        let active = ActiveProfile::new(MemoryProfileStore::new());
        let list = profiles();
        assert_eq!(active.effective(&list).map(|p| p.id.as_str()), Some("local"));
        assert!(active.stored().is_none());
        assert!(active.effective(&[]).is_none());
    }

    #[test]
    fn test_select_known_profile() {
        let mut active = ActiveProfile::new(MemoryProfileStore::new());
        let list = profiles();
        active.select("cloud", &list).unwrap();
        assert_eq!(active.effective(&list).map(|p| p.id.as_str()), Some("cloud"));
        assert_eq!(
            active.store().load_active().unwrap().map(|p| p.id),
            Some("cloud".to_string())
        );
    }

    #[test]
    fn test_select_unknown_profile_clears() {
        let list = profiles();
        let mut active = ActiveProfile::new(MemoryProfileStore::with_active(list[1].clone()));
        active.select("gone", &list).unwrap();
        assert!(active.stored().is_none());
        assert_eq!(active.effective(&list).map(|p| p.id.as_str()), Some("local"));
    }

    #[test]
    fn test_stored_profile_not_in_list_still_effective() {
        let stale = MqttProfile::new("old", "Old broker");
        let active = ActiveProfile::new(MemoryProfileStore::with_active(stale.clone()));
        assert_eq!(active.effective(&profiles()), Some(&stale));
    }

    #[test]
    fn test_file_store_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProfileStore::in_dir(dir.path());
        assert!(store.load_active().unwrap().is_none());
    }

    #[test]
    fn test_file_store_corrupt_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProfileStore::in_dir(dir.path());
        std::fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(
            store.load_active(),
            Err(ConsoleError::Serialization(_))
        ));
        assert!(ActiveProfile::new(store).stored().is_none());
    }
}
