//! Pipeline topology to flow graph conversion.
//!
//! A topology arrives from the backend as an ordered list of
//! [`PipelineNode`](crate::types::PipelineNode)s. This module turns it into
//! positioned [`FlowNode`]s and [`FlowEdge`]s for the pipeline page.
//!
//! # Layout
//!
//! ```text
//! (200,   0)  [source] ──┐
//! (200, 300)  [filter] ◄─┘──┐
//! (200, 600)  [sink]   ◄────┘
//! ```
//!
//! - **Single column**: position depends only on list index, never on wiring.
//! - **Pure**: both transforms allocate fresh output and never validate input.
//! - **Inspection is separate**: [`inspect_topology`] reports dangling wires
//!   and id collisions for callers that want to warn about them.

pub mod flow;
pub mod inspect;
pub mod transform;

pub use flow::{FlowEdge, FlowNode, FlowNodeData, Position, PROCESSOR_NODE_TYPE};
pub use inspect::{inspect_topology, TopologyReport};
pub use transform::{
    transform_topology_to_flow_edges, transform_topology_to_flow_nodes,
    transform_topology_to_flow_nodes_with, FlowLayout,
};
