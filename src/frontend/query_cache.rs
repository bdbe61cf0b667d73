//! Client-side cache of backend collections.
//!
//! The app writes to it from `process_backend_messages()`; pages read the
//! collections through direct field access. Each key carries a generation
//! that is bumped on every load, so table controllers can tell a fresh
//! collection from the one they already show.

use std::collections::{BTreeSet, HashMap};

use crate::backend::{QueryData, QueryKey, TopologySnapshot};
use crate::types::{DashboardEntry, GitopsTarget, MqttProfile};

/// A loaded collection and the generation it was stored under.
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<T> {
    pub data: T,
    pub generation: u64,
}

/// All collections fetched from the backend.
#[derive(Debug, Default)]
pub struct QueryCache {
    pub dashboard_entries: Option<Cached<Vec<DashboardEntry>>>,
    pub gitops: Option<Cached<Vec<GitopsTarget>>>,
    pub mqtt_profiles: Option<Cached<Vec<MqttProfile>>>,
    /// Keyed by pipeline id
    pub topologies: HashMap<String, Cached<TopologySnapshot>>,

    generations: HashMap<QueryKey, u64>,
    loading: BTreeSet<QueryKey>,
    stale: BTreeSet<QueryKey>,
    errors: HashMap<QueryKey, String>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a fetch for `key` is in flight.
    pub fn mark_loading(&mut self, key: QueryKey) {
        self.loading.insert(key);
    }

    pub fn is_loading(&self, key: &QueryKey) -> bool {
        self.loading.contains(key)
    }

    pub fn any_loading(&self) -> bool {
        !self.loading.is_empty()
    }

    pub fn loading_keys(&self) -> impl Iterator<Item = &QueryKey> {
        self.loading.iter()
    }

    /// Store freshly loaded data, bumping the key's generation.
    pub fn store(&mut self, data: QueryData) {
        let key = data.key();
        let generation = {
            let counter = self.generations.entry(key.clone()).or_insert(0);
            *counter += 1;
            *counter
        };
        self.loading.remove(&key);
        self.stale.remove(&key);
        self.errors.remove(&key);

        match data {
            QueryData::DashboardEntries(data) => {
                self.dashboard_entries = Some(Cached { data, generation })
            }
            QueryData::Gitops(data) => self.gitops = Some(Cached { data, generation }),
            QueryData::MqttProfiles(data) => self.mqtt_profiles = Some(Cached { data, generation }),
            QueryData::Topology(snapshot) => {
                self.topologies.insert(
                    snapshot.pipeline_id.clone(),
                    Cached {
                        data: snapshot,
                        generation,
                    },
                );
            }
        }
    }

    /// Record a failed fetch. Previously loaded data stays available.
    pub fn fail(&mut self, key: QueryKey, error: String) {
        self.loading.remove(&key);
        self.stale.remove(&key);
        self.errors.insert(key, error);
    }

    pub fn error(&self, key: &QueryKey) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    /// Mark a key out of date; it will show up in [`stale_keys`](Self::stale_keys).
    pub fn invalidate(&mut self, key: QueryKey) {
        self.stale.insert(key);
    }

    /// Stale keys that have no fetch in flight.
    pub fn stale_keys(&self) -> Vec<QueryKey> {
        self.stale
            .iter()
            .filter(|k| !self.loading.contains(*k))
            .cloned()
            .collect()
    }

    /// Whether `key` has never been loaded and nothing is pending for it.
    pub fn needs_fetch(&self, key: &QueryKey) -> bool {
        !self.has_data(key) && !self.is_loading(key) && !self.errors.contains_key(key)
    }

    pub fn has_data(&self, key: &QueryKey) -> bool {
        match key {
            QueryKey::DashboardEntries => self.dashboard_entries.is_some(),
            QueryKey::Gitops => self.gitops.is_some(),
            QueryKey::MqttProfiles => self.mqtt_profiles.is_some(),
            QueryKey::Topology(id) => self.topologies.contains_key(id),
        }
    }

    /// Current generation of a key; 0 before the first load.
    pub fn generation(&self, key: &QueryKey) -> u64 {
        self.generations.get(key).copied().unwrap_or(0)
    }

    pub fn mqtt_profile_list(&self) -> &[MqttProfile] {
        self.mqtt_profiles
            .as_ref()
            .map(|c| c.data.as_slice())
            .unwrap_or(&[])
    }

    pub fn topology(&self, pipeline_id: &str) -> Option<&TopologySnapshot> {
        self.topologies.get(pipeline_id).map(|c| &c.data)
    }
}
