//! Core data types for the gitops console
//!
//! These are the records exchanged with the backend API. They arrive
//! already deserialized; the console never assigns ids itself.
//!
//! # Main Types
//!
//! - [`PipelineNode`] - One node of a pipeline topology, with its wiring
//! - [`DashboardEntry`] - A dashboard hub link shown in the dashboards table
//! - [`GitopsTarget`] - A gitops deployment target
//! - [`MqttProfile`] - An MQTT profile the user can make active

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A processing node in a pipeline topology.
///
/// `wires` holds one or more fan-out groups of target node ids. Targets are
/// expected to exist in the same topology but this is never checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub capabilities: Value,
    #[serde(default)]
    pub properties: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wires: Option<Vec<Vec<String>>>,
}

impl PipelineNode {
    /// Create a node with no capabilities, properties or wires
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            capabilities: Value::Null,
            properties: Value::Null,
            wires: None,
        }
    }

    /// Builder-style helper to attach wire groups
    pub fn with_wires<I, G, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wires = Some(
            groups
                .into_iter()
                .map(|g| g.into_iter().map(Into::into).collect())
                .collect(),
        );
        self
    }

    /// All wire targets in group order, flattened
    pub fn wire_targets(&self) -> impl Iterator<Item = &str> {
        self.wires
            .iter()
            .flatten()
            .flatten()
            .map(String::as_str)
    }
}

/// A dashboard hub entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Payload for creating a dashboard entry; the backend assigns the id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDashboardEntry {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl NewDashboardEntry {
    /// Attach a backend-assigned id
    pub fn into_entry(self, id: impl Into<String>) -> DashboardEntry {
        DashboardEntry {
            id: id.into(),
            name: self.name,
            description: self.description,
            url: self.url,
        }
    }
}

/// A gitops deployment target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitopsTarget {
    pub id: String,
    pub name: String,
}

/// Payload for creating a gitops target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGitopsTarget {
    pub name: String,
}

/// An MQTT profile
///
/// Only `id` and `name` are interpreted; anything else the backend sends is
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MqttProfile {
    pub id: String,
    pub name: String,
    #[serde(default, flatten)]
    pub extra: Map<String, Value>,
}

impl MqttProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }
}
