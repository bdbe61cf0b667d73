//! Caller-side topology diagnostics.
//!
//! The transforms never validate their input. Renderers that want to warn
//! about suspicious topologies run [`inspect_topology`] over the source
//! nodes and the edges produced from them.

use std::collections::HashMap;

use super::flow::FlowEdge;
use crate::types::PipelineNode;

/// Findings about a topology and its derived edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologyReport {
    /// Node ids that occur more than once, in first-seen order.
    pub duplicate_node_ids: Vec<String>,
    /// Edges whose target names no node in the topology.
    pub dangling_edges: Vec<FlowEdge>,
    /// Edge ids produced more than once. Hyphen-joined ids collide when
    /// node ids themselves contain hyphens (`a-b`→`c` vs `a`→`b-c`).
    pub duplicate_edge_ids: Vec<String>,
}

impl TopologyReport {
    pub fn is_clean(&self) -> bool {
        self.duplicate_node_ids.is_empty()
            && self.dangling_edges.is_empty()
            && self.duplicate_edge_ids.is_empty()
    }

    /// Emit one warning per finding.
    pub fn log_warnings(&self) {
        for id in &self.duplicate_node_ids {
            tracing::warn!("Topology contains duplicate node id {:?}", id);
        }
        for edge in &self.dangling_edges {
            tracing::warn!(
                "Edge {:?} targets unknown node {:?}; it will not be drawn",
                edge.id,
                edge.target
            );
        }
        for id in &self.duplicate_edge_ids {
            tracing::warn!("Edge id {:?} is produced by more than one wire", id);
        }
    }
}

/// Inspect a topology and the edges derived from it.
pub fn inspect_topology(topology: &[PipelineNode], edges: &[FlowEdge]) -> TopologyReport {
    let mut report = TopologyReport::default();

    let mut node_counts: HashMap<&str, usize> = HashMap::new();
    for node in topology {
        let count = node_counts.entry(node.id.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            report.duplicate_node_ids.push(node.id.clone());
        }
    }

    let mut edge_counts: HashMap<&str, usize> = HashMap::new();
    for edge in edges {
        if !node_counts.contains_key(edge.target.as_str()) {
            report.dangling_edges.push(edge.clone());
        }
        let count = edge_counts.entry(edge.id.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            report.duplicate_edge_ids.push(edge.id.clone());
        }
    }

    report
}
