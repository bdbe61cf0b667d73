//! Thread boundary between the backend worker and the UI.
//!
//! The UI holds an [`ApiBridge`]; the worker owns the matching command
//! receiver and message sender. Both directions are bounded crossbeam
//! channels and commands are processed strictly in order.

use std::fmt;

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::topology::{FlowEdge, FlowNode, TopologyReport};
use crate::types::{
    DashboardEntry, GitopsTarget, MqttProfile, NewDashboardEntry, NewGitopsTarget, PipelineNode,
};

/// Command channel capacity (UI → worker).
const CMD_CHANNEL_CAPACITY: usize = 64;

/// Message channel capacity (worker → UI).
const MSG_CHANNEL_CAPACITY: usize = 1_024;

/// Identifies one cached server collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QueryKey {
    DashboardEntries,
    Gitops,
    MqttProfiles,
    Topology(String),
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::DashboardEntries => write!(f, "dashboard-entries"),
            QueryKey::Gitops => write!(f, "gitops"),
            QueryKey::MqttProfiles => write!(f, "mqtt-profiles"),
            QueryKey::Topology(id) => write!(f, "topology/{}", id),
        }
    }
}

/// A pipeline topology together with its derived flow graph and diagnostics.
///
/// The worker runs the transforms and the inspection once per fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct TopologySnapshot {
    pub pipeline_id: String,
    pub nodes: Vec<PipelineNode>,
    pub flow_nodes: Vec<FlowNode>,
    pub flow_edges: Vec<FlowEdge>,
    pub report: TopologyReport,
}

/// Result of a successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    DashboardEntries(Vec<DashboardEntry>),
    Gitops(Vec<GitopsTarget>),
    MqttProfiles(Vec<MqttProfile>),
    Topology(TopologySnapshot),
}

impl QueryData {
    pub fn key(&self) -> QueryKey {
        match self {
            QueryData::DashboardEntries(_) => QueryKey::DashboardEntries,
            QueryData::Gitops(_) => QueryKey::Gitops,
            QueryData::MqttProfiles(_) => QueryKey::MqttProfiles,
            QueryData::Topology(snapshot) => QueryKey::Topology(snapshot.pipeline_id.clone()),
        }
    }
}

/// A write against the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    CreateDashboardEntry(NewDashboardEntry),
    UpdateDashboardEntry(DashboardEntry),
    DeleteDashboardEntry(String),
    CreateGitops(NewGitopsTarget),
    UpdateGitops(GitopsTarget),
    DeleteGitops(String),
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::CreateDashboardEntry(_) => MutationKind::CreateDashboardEntry,
            Mutation::UpdateDashboardEntry(_) => MutationKind::UpdateDashboardEntry,
            Mutation::DeleteDashboardEntry(_) => MutationKind::DeleteDashboardEntry,
            Mutation::CreateGitops(_) => MutationKind::CreateGitops,
            Mutation::UpdateGitops(_) => MutationKind::UpdateGitops,
            Mutation::DeleteGitops(_) => MutationKind::DeleteGitops,
        }
    }

    /// The cached collection this mutation makes stale.
    pub fn invalidates(&self) -> QueryKey {
        self.kind().invalidates()
    }
}

/// Payload-free tag of a [`Mutation`], used in result messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    CreateDashboardEntry,
    UpdateDashboardEntry,
    DeleteDashboardEntry,
    CreateGitops,
    UpdateGitops,
    DeleteGitops,
}

impl MutationKind {
    pub fn invalidates(self) -> QueryKey {
        match self {
            MutationKind::CreateDashboardEntry
            | MutationKind::UpdateDashboardEntry
            | MutationKind::DeleteDashboardEntry => QueryKey::DashboardEntries,
            MutationKind::CreateGitops | MutationKind::UpdateGitops | MutationKind::DeleteGitops => {
                QueryKey::Gitops
            }
        }
    }

    /// Text shown when the mutation succeeds.
    pub fn success_message(self) -> &'static str {
        match self {
            MutationKind::CreateDashboardEntry => "Dashboard entry created",
            MutationKind::UpdateDashboardEntry => "Dashboard entry updated",
            MutationKind::DeleteDashboardEntry => "Dashboard entry deleted",
            MutationKind::CreateGitops => "Gitops created",
            MutationKind::UpdateGitops => "Gitops updated",
            MutationKind::DeleteGitops => "Gitops deleted",
        }
    }

    /// Text shown when the mutation fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            MutationKind::CreateDashboardEntry => "Error creating dashboard entry",
            MutationKind::UpdateDashboardEntry => "Error updating dashboard entry",
            MutationKind::DeleteDashboardEntry => "Error deleting dashboard entry",
            MutationKind::CreateGitops => "Error creating gitops",
            MutationKind::UpdateGitops => "Error updating gitops",
            MutationKind::DeleteGitops => "Error deleting gitops",
        }
    }
}

/// Commands sent from the UI to the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    Fetch(QueryKey),
    Mutate(Mutation),
    Shutdown,
}

/// Messages sent from the worker to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendMessage {
    Loaded(QueryData),
    FetchFailed { key: QueryKey, error: String },
    MutationSucceeded(MutationKind),
    MutationFailed { kind: MutationKind, error: String },
    /// The cached collection for this key is out of date.
    Invalidated(QueryKey),
    /// Worker is exiting.
    Shutdown,
}

/// UI-side handle for communicating with the backend worker.
pub struct ApiBridge {
    pub cmd_tx: Sender<BackendCommand>,
    pub msg_rx: Receiver<BackendMessage>,
}

impl ApiBridge {
    /// Create a new bridge pair: `(bridge_for_ui, cmd_rx, msg_tx)`.
    ///
    /// The worker thread owns `cmd_rx` and `msg_tx`.
    pub fn new() -> (Self, Receiver<BackendCommand>, Sender<BackendMessage>) {
        let (cmd_tx, cmd_rx) = bounded(CMD_CHANNEL_CAPACITY);
        let (msg_tx, msg_rx) = bounded(MSG_CHANNEL_CAPACITY);
        (Self { cmd_tx, msg_rx }, cmd_rx, msg_tx)
    }

    /// Drain all pending messages.
    pub fn drain(&self) -> Vec<BackendMessage> {
        let mut msgs = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            msgs.push(msg);
        }
        msgs
    }

    /// Try to receive a single message without blocking.
    pub fn try_recv(&self) -> Option<BackendMessage> {
        self.msg_rx.try_recv().ok()
    }

    /// Returns false once the worker has gone away.
    pub fn send_command(&self, cmd: BackendCommand) -> bool {
        self.cmd_tx.send(cmd).is_ok()
    }

    pub fn fetch(&self, key: QueryKey) -> bool {
        self.send_command(BackendCommand::Fetch(key))
    }

    pub fn mutate(&self, mutation: Mutation) -> bool {
        self.send_command(BackendCommand::Mutate(mutation))
    }

    pub fn create_dashboard_entry(&self, entry: NewDashboardEntry) -> bool {
        self.mutate(Mutation::CreateDashboardEntry(entry))
    }

    pub fn update_dashboard_entry(&self, entry: DashboardEntry) -> bool {
        self.mutate(Mutation::UpdateDashboardEntry(entry))
    }

    pub fn delete_dashboard_entry(&self, id: impl Into<String>) -> bool {
        self.mutate(Mutation::DeleteDashboardEntry(id.into()))
    }

    pub fn create_gitops(&self, target: NewGitopsTarget) -> bool {
        self.mutate(Mutation::CreateGitops(target))
    }

    pub fn update_gitops(&self, target: GitopsTarget) -> bool {
        self.mutate(Mutation::UpdateGitops(target))
    }

    pub fn delete_gitops(&self, id: impl Into<String>) -> bool {
        self.mutate(Mutation::DeleteGitops(id.into()))
    }

    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(BackendCommand::Shutdown);
    }
}
