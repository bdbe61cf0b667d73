//! In-process [`ConsoleApi`] backed by plain collections.
//!
//! Used by the binary when no remote backend is configured, and by tests.
//! Clones share the same store, so a test can keep a handle while the
//! worker thread owns another.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::api::ConsoleApi;
use crate::error::{ConsoleError, Result};
use crate::types::{
    DashboardEntry, GitopsTarget, MqttProfile, NewDashboardEntry, NewGitopsTarget, PipelineNode,
};

#[derive(Debug, Default)]
struct Store {
    dashboard_entries: Vec<DashboardEntry>,
    gitops: Vec<GitopsTarget>,
    mqtt_profiles: Vec<MqttProfile>,
    topologies: HashMap<String, Vec<PipelineNode>>,
    next_id: u64,
    /// When set, every call fails with this message
    failure: Option<String>,
    /// Number of upcoming calls that fail before `failure` is cleared
    fail_remaining: Option<usize>,
}

impl Store {
    fn assign_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }

    fn check_failure(&mut self) -> Result<()> {
        let Some(message) = self.failure.clone() else {
            return Ok(());
        };
        if let Some(remaining) = self.fail_remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                self.failure = None;
                self.fail_remaining = None;
            }
        }
        Err(ConsoleError::Backend(message))
    }
}

/// Deterministic in-memory backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryApi {
    store: Arc<Mutex<Store>>,
}

impl InMemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with a few records of every kind.
    pub fn seeded() -> Self {
        let api = Self::new();
        api.seed_dashboard_entries([
            NewDashboardEntry {
                name: "Grafana".into(),
                description: Some("Metrics and alerting".into()),
                url: Some("https://grafana.example.com".into()),
            },
            NewDashboardEntry {
                name: "Kibana".into(),
                description: Some("Log search".into()),
                url: Some("https://kibana.example.com".into()),
            },
            NewDashboardEntry {
                name: "Node-RED".into(),
                description: None,
                url: Some("http://nodered.local:1880".into()),
            },
        ]);
        api.seed_gitops(["production", "staging"]);
        api.seed_mqtt_profiles([
            MqttProfile::new("local", "Local broker"),
            MqttProfile::new("cloud", "Cloud broker"),
        ]);
        api.seed_topology(
            "default",
            vec![
                PipelineNode::new("mqtt-in", "mqtt-in").with_wires([["parse"]]),
                PipelineNode::new("parse", "json").with_wires([vec!["filter"], vec!["log"]]),
                PipelineNode::new("filter", "switch").with_wires([["mqtt-out"]]),
                PipelineNode::new("log", "debug"),
                PipelineNode::new("mqtt-out", "mqtt-out"),
            ],
        );
        api
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        // A panic while holding the lock leaves plain data behind; keep using it.
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn seed_dashboard_entries(&self, entries: impl IntoIterator<Item = NewDashboardEntry>) {
        let mut store = self.store();
        for entry in entries {
            let id = store.assign_id();
            store.dashboard_entries.push(entry.into_entry(id));
        }
    }

    pub fn seed_gitops<S: Into<String>>(&self, names: impl IntoIterator<Item = S>) {
        let mut store = self.store();
        for name in names {
            let id = store.assign_id();
            store.gitops.push(GitopsTarget {
                id,
                name: name.into(),
            });
        }
    }

    pub fn seed_mqtt_profiles(&self, profiles: impl IntoIterator<Item = MqttProfile>) {
        self.store().mqtt_profiles.extend(profiles);
    }

    pub fn seed_topology(&self, pipeline_id: impl Into<String>, nodes: Vec<PipelineNode>) {
        self.store().topologies.insert(pipeline_id.into(), nodes);
    }

    /// Fail every call until [`clear_failure`](Self::clear_failure).
    pub fn fail_with(&self, message: impl Into<String>) {
        let mut store = self.store();
        store.failure = Some(message.into());
        store.fail_remaining = None;
    }

    /// Fail only the next `count` calls.
    pub fn fail_next(&self, count: usize, message: impl Into<String>) {
        if count == 0 {
            return;
        }
        let mut store = self.store();
        store.failure = Some(message.into());
        store.fail_remaining = Some(count);
    }

    pub fn clear_failure(&self) {
        let mut store = self.store();
        store.failure = None;
        store.fail_remaining = None;
    }
}

impl ConsoleApi for InMemoryApi {
    fn list_dashboard_entries(&self) -> Result<Vec<DashboardEntry>> {
        let mut store = self.store();
        store.check_failure()?;
        Ok(store.dashboard_entries.clone())
    }

    fn create_dashboard_entry(&self, entry: NewDashboardEntry) -> Result<DashboardEntry> {
        let mut store = self.store();
        store.check_failure()?;
        let id = store.assign_id();
        let entry = entry.into_entry(id);
        store.dashboard_entries.push(entry.clone());
        Ok(entry)
    }

    fn update_dashboard_entry(&self, entry: DashboardEntry) -> Result<DashboardEntry> {
        let mut store = self.store();
        store.check_failure()?;
        let slot = store
            .dashboard_entries
            .iter_mut()
            .find(|e| e.id == entry.id)
            .ok_or_else(|| ConsoleError::not_found("Dashboard entry", entry.id.as_str()))?;
        *slot = entry.clone();
        Ok(entry)
    }

    fn delete_dashboard_entry(&self, id: &str) -> Result<()> {
        let mut store = self.store();
        store.check_failure()?;
        let before = store.dashboard_entries.len();
        store.dashboard_entries.retain(|e| e.id != id);
        if store.dashboard_entries.len() == before {
            return Err(ConsoleError::not_found("Dashboard entry", id));
        }
        Ok(())
    }

    fn list_gitops(&self) -> Result<Vec<GitopsTarget>> {
        let mut store = self.store();
        store.check_failure()?;
        Ok(store.gitops.clone())
    }

    fn create_gitops(&self, target: NewGitopsTarget) -> Result<GitopsTarget> {
        let mut store = self.store();
        store.check_failure()?;
        let target = GitopsTarget {
            id: store.assign_id(),
            name: target.name,
        };
        store.gitops.push(target.clone());
        Ok(target)
    }

    fn update_gitops(&self, target: GitopsTarget) -> Result<GitopsTarget> {
        let mut store = self.store();
        store.check_failure()?;
        let slot = store
            .gitops
            .iter_mut()
            .find(|g| g.id == target.id)
            .ok_or_else(|| ConsoleError::not_found("Gitops", target.id.as_str()))?;
        *slot = target.clone();
        Ok(target)
    }

    fn delete_gitops(&self, id: &str) -> Result<()> {
        let mut store = self.store();
        store.check_failure()?;
        let before = store.gitops.len();
        store.gitops.retain(|g| g.id != id);
        if store.gitops.len() == before {
            return Err(ConsoleError::not_found("Gitops", id));
        }
        Ok(())
    }

    fn list_mqtt_profiles(&self) -> Result<Vec<MqttProfile>> {
        let mut store = self.store();
        store.check_failure()?;
        Ok(store.mqtt_profiles.clone())
    }

    fn pipeline_topology(&self, pipeline_id: &str) -> Result<Vec<PipelineNode>> {
        let mut store = self.store();
        store.check_failure()?;
        store
            .topologies
            .get(pipeline_id)
            .cloned()
            .ok_or_else(|| ConsoleError::not_found("Pipeline", pipeline_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_entry(name: &str) -> NewDashboardEntry {
        NewDashboardEntry {
            name: name.into(),
            description: None,
            url: None,
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let api = InMemoryApi::new();
        let a = api.create_dashboard_entry(new_entry("a")).unwrap();
        let b = api.create_gitops(NewGitopsTarget { name: "b".into() }).unwrap();
        assert_eq!(a.id, "1");
        assert_eq!(b.id, "2");
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let api = InMemoryApi::new();
        let err = api
            .update_dashboard_entry(new_entry("ghost").into_entry("99"))
            .unwrap_err();
        assert!(matches!(err, ConsoleError::NotFound { id, .. } if id == "99"));
        assert!(api.delete_gitops("99").is_err());
    }

    #[test]
    fn test_update_and_delete() {
        let api = InMemoryApi::new();
        let mut entry = api.create_dashboard_entry(new_entry("old")).unwrap();
        entry.name = "new".into();
        api.update_dashboard_entry(entry.clone()).unwrap();
        assert_eq!(api.list_dashboard_entries().unwrap(), vec![entry.clone()]);

        api.delete_dashboard_entry(&entry.id).unwrap();
        assert!(api.list_dashboard_entries().unwrap().is_empty());
    }

    #[test]
    fn test_fail_next_recovers() {
        let api = InMemoryApi::seeded();
        api.fail_next(1, "boom");
        assert!(matches!(
            api.list_gitops(),
            Err(ConsoleError::Backend(msg)) if msg == "boom"
        ));
        assert_eq!(api.list_gitops().unwrap().len(), 2);
    }

    #[test]
    fn test_fail_with_until_cleared() {
        let api = InMemoryApi::seeded();
        api.fail_with("down");
        assert!(api.list_mqtt_profiles().is_err());
        assert!(api.list_mqtt_profiles().is_err());
        api.clear_failure();
        assert_eq!(api.list_mqtt_profiles().unwrap().len(), 2);
    }

    #[test]
    fn test_clones_share_store() {
        let api = InMemoryApi::new();
        let handle = api.clone();
        api.create_dashboard_entry(new_entry("shared")).unwrap();
        assert_eq!(handle.list_dashboard_entries().unwrap().len(), 1);
    }

    #[test]
    fn test_seeded_topology() {
        let api = InMemoryApi::seeded();
        let nodes = api.pipeline_topology("default").unwrap();
        assert_eq!(nodes.len(), 5);
        assert!(api.pipeline_topology("missing").is_err());
    }
}
