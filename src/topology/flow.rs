//! Renderable flow graph types.
//!
//! Field names serialize to the shape graph renderers expect
//! (`type`, `position`, `data`, `animated`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Node type tag shared by every flow node.
pub const PROCESSOR_NODE_TYPE: &str = "processor";

/// Canvas coordinates of a flow node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Payload carried by a flow node for the renderer.
///
/// `name`, `kind` and `id` all mirror the source node id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNodeData {
    #[serde(rename = "type")]
    pub node_type: String,
    pub name: String,
    pub kind: String,
    pub id: String,
    pub capabilities: Value,
    pub properties: Value,
}

/// A positioned node of the flow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub position: Position,
    pub data: FlowNodeData,
}

/// A directed edge of the flow graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub animated: bool,
}

impl FlowEdge {
    /// Build an edge with the `<source>-<target>` id.
    pub fn between(source: &str, target: &str) -> Self {
        Self {
            id: format!("{}-{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
            animated: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_id_format() {
        let edge = FlowEdge::between("ingest", "store");
        assert_eq!(edge.id, "ingest-store");
        assert!(edge.animated);
    }

    #[test]
    fn test_flow_node_serializes_renderer_shape() {
        let node = FlowNode {
            id: "a".into(),
            node_type: PROCESSOR_NODE_TYPE.into(),
            position: Position { x: 200.0, y: 0.0 },
            data: FlowNodeData {
                node_type: "mqtt-in".into(),
                name: "a".into(),
                kind: "a".into(),
                id: "a".into(),
                capabilities: Value::Null,
                properties: Value::Null,
            },
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "processor");
        assert_eq!(json["position"]["x"], 200.0);
        assert_eq!(json["data"]["type"], "mqtt-in");
    }
}
