//! Backend worker thread.
//!
//! Owns a [`ConsoleApi`] and serves [`BackendCommand`]s one at a time,
//! reporting results as [`BackendMessage`]s. The worker never retries; a
//! failed request is reported once and the UI decides what to do next.
//!
//! # Mutation protocol
//!
//! ```text
//! Mutate(m) ──ok──► MutationSucceeded(kind), Invalidated(m.invalidates())
//!           └─err─► MutationFailed { kind, error }
//! ```

use crossbeam_channel::{Receiver, Sender};

use super::api::ConsoleApi;
use super::bridge::{
    BackendCommand, BackendMessage, Mutation, QueryData, QueryKey, TopologySnapshot,
};
use crate::error::{Result, ResultExt};
use crate::topology::{
    inspect_topology, transform_topology_to_flow_edges, transform_topology_to_flow_nodes,
};
use crate::types::PipelineNode;

/// Serves backend commands on a dedicated thread.
pub struct BackendWorker<A> {
    api: A,
    cmd_rx: Receiver<BackendCommand>,
    msg_tx: Sender<BackendMessage>,
}

impl<A: ConsoleApi> BackendWorker<A> {
    pub fn new(api: A, cmd_rx: Receiver<BackendCommand>, msg_tx: Sender<BackendMessage>) -> Self {
        Self {
            api,
            cmd_rx,
            msg_tx,
        }
    }

    /// Process commands until `Shutdown` or until the UI drops its sender.
    pub fn run(mut self) {
        tracing::info!("Backend worker started");

        while let Ok(cmd) = self.cmd_rx.recv() {
            if !self.handle_command(cmd) {
                break;
            }
        }

        let _ = self.msg_tx.send(BackendMessage::Shutdown);
        tracing::info!("Backend worker exiting");
    }

    /// Handle one command. Returns false when the worker should stop.
    pub fn handle_command(&mut self, cmd: BackendCommand) -> bool {
        match cmd {
            BackendCommand::Fetch(key) => {
                tracing::debug!("Fetching {}", key);
                let msg = match self.fetch(&key) {
                    Ok(data) => BackendMessage::Loaded(data),
                    Err(e) => {
                        tracing::warn!("Fetch of {} failed: {}", key, e);
                        BackendMessage::FetchFailed {
                            key,
                            error: e.to_string(),
                        }
                    }
                };
                self.send(msg)
            }
            BackendCommand::Mutate(mutation) => {
                let kind = mutation.kind();
                let invalidates = mutation.invalidates();
                tracing::debug!("Applying {:?}", kind);
                match self.apply(mutation) {
                    Ok(()) => {
                        tracing::info!("{}", kind.success_message());
                        self.send(BackendMessage::MutationSucceeded(kind))
                            && self.send(BackendMessage::Invalidated(invalidates))
                    }
                    Err(e) => {
                        tracing::error!("{}: {}", kind.failure_message(), e);
                        self.send(BackendMessage::MutationFailed {
                            kind,
                            error: e.to_string(),
                        })
                    }
                }
            }
            BackendCommand::Shutdown => {
                tracing::debug!("Shutdown requested");
                false
            }
        }
    }

    /// Returns false once the UI has gone away.
    fn send(&self, msg: BackendMessage) -> bool {
        if self.msg_tx.send(msg).is_err() {
            tracing::debug!("UI receiver dropped, stopping worker");
            return false;
        }
        true
    }

    fn fetch(&self, key: &QueryKey) -> Result<QueryData> {
        Ok(match key {
            QueryKey::DashboardEntries => {
                QueryData::DashboardEntries(self.api.list_dashboard_entries()?)
            }
            QueryKey::Gitops => QueryData::Gitops(self.api.list_gitops()?),
            QueryKey::MqttProfiles => QueryData::MqttProfiles(self.api.list_mqtt_profiles()?),
            QueryKey::Topology(pipeline_id) => {
                let nodes = self
                    .api
                    .pipeline_topology(pipeline_id)
                    .with_context(|| format!("Loading topology of pipeline '{}'", pipeline_id))?;
                QueryData::Topology(snapshot(pipeline_id, nodes))
            }
        })
    }

    fn apply(&self, mutation: Mutation) -> Result<()> {
        match mutation {
            Mutation::CreateDashboardEntry(entry) => {
                let created = self.api.create_dashboard_entry(entry)?;
                tracing::debug!("Created dashboard entry {}", created.id);
            }
            Mutation::UpdateDashboardEntry(entry) => {
                self.api.update_dashboard_entry(entry)?;
            }
            Mutation::DeleteDashboardEntry(id) => self.api.delete_dashboard_entry(&id)?,
            Mutation::CreateGitops(target) => {
                let created = self.api.create_gitops(target)?;
                tracing::debug!("Created gitops target {}", created.id);
            }
            Mutation::UpdateGitops(target) => {
                self.api.update_gitops(target)?;
            }
            Mutation::DeleteGitops(id) => self.api.delete_gitops(&id)?,
        }
        Ok(())
    }
}

/// Run both transforms and the inspection over a fetched topology.
fn snapshot(pipeline_id: &str, nodes: Vec<PipelineNode>) -> TopologySnapshot {
    let flow_nodes = transform_topology_to_flow_nodes(&nodes);
    let flow_edges = transform_topology_to_flow_edges(&nodes);
    let report = inspect_topology(&nodes, &flow_edges);
    if !report.is_clean() {
        tracing::warn!("Pipeline '{}' topology has inconsistencies", pipeline_id);
        report.log_warnings();
    }
    TopologySnapshot {
        pipeline_id: pipeline_id.to_string(),
        nodes,
        flow_nodes,
        flow_edges,
        report,
    }
}
