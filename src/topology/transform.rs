use super::flow::{FlowEdge, FlowNode, FlowNodeData, Position, PROCESSOR_NODE_TYPE};
use crate::types::PipelineNode;

/// Horizontal coordinate of the single layout column
pub const DEFAULT_COLUMN_X: f64 = 200.0;

/// Vertical distance between consecutive nodes
pub const DEFAULT_SPACING_Y: f64 = 300.0;

/// Column layout parameters for [`transform_topology_to_flow_nodes_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowLayout {
    pub x: f64,
    pub initial_y: f64,
    pub spacing_y: f64,
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self {
            x: DEFAULT_COLUMN_X,
            initial_y: 0.0,
            spacing_y: DEFAULT_SPACING_Y,
        }
    }
}

impl FlowLayout {
    /// Position of the node at `index` in the topology list
    pub fn position_of(&self, index: usize) -> Position {
        Position {
            x: self.x,
            y: self.initial_y + index as f64 * self.spacing_y,
        }
    }
}

/// Convert a topology into flow nodes using the default column layout.
///
/// One node per input node, in input order. Node `i` lands at
/// `(200, i * 300)` regardless of how the nodes are wired.
pub fn transform_topology_to_flow_nodes(topology: &[PipelineNode]) -> Vec<FlowNode> {
    transform_topology_to_flow_nodes_with(topology, &FlowLayout::default())
}

/// Convert a topology into flow nodes using a custom column layout.
pub fn transform_topology_to_flow_nodes_with(
    topology: &[PipelineNode],
    layout: &FlowLayout,
) -> Vec<FlowNode> {
    topology
        .iter()
        .enumerate()
        .map(|(index, node)| FlowNode {
            id: node.id.clone(),
            node_type: PROCESSOR_NODE_TYPE.to_string(),
            position: layout.position_of(index),
            data: FlowNodeData {
                node_type: node.node_type.clone(),
                name: node.id.clone(),
                kind: node.id.clone(),
                id: node.id.clone(),
                capabilities: node.capabilities.clone(),
                properties: node.properties.clone(),
            },
        })
        .collect()
}

/// Convert a topology into flow edges.
///
/// Emits one edge per wire target, node order first and wire order second.
/// Targets are not checked against the node list.
pub fn transform_topology_to_flow_edges(topology: &[PipelineNode]) -> Vec<FlowEdge> {
    topology
        .iter()
        .flat_map(|node| {
            node.wire_targets()
                .map(move |target| FlowEdge::between(&node.id, target))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Vec<PipelineNode> {
        vec![
            PipelineNode::new("a", "source").with_wires([vec!["b"]]),
            PipelineNode::new("b", "sink").with_wires(Vec::<Vec<&str>>::new()),
        ]
    }

    #[test]
    fn test_chain_nodes() {
        let nodes = transform_topology_to_flow_nodes(&chain());
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].id, "a");
        assert_eq!(nodes[0].position, Position { x: 200.0, y: 0.0 });
        assert_eq!(nodes[1].id, "b");
        assert_eq!(nodes[1].position, Position { x: 200.0, y: 300.0 });
        assert_eq!(nodes[1].node_type, "processor");
        assert_eq!(nodes[1].data.node_type, "sink");
        assert_eq!(nodes[1].data.name, "b");
        assert_eq!(nodes[1].data.kind, "b");
    }

    #[test]
    fn test_chain_edges() {
        let edges = transform_topology_to_flow_edges(&chain());
        assert_eq!(edges, vec![FlowEdge::between("a", "b")]);
        assert_eq!(edges[0].id, "a-b");
        assert_eq!(edges[0].source, "a");
        assert_eq!(edges[0].target, "b");
        assert!(edges[0].animated);
    }

    #[test]
    fn test_fan_out_groups_flatten() {
        let topology = vec![PipelineNode::new("a", "fan").with_wires([vec!["x", "y"], vec!["z"]])];
        let ids: Vec<_> = transform_topology_to_flow_edges(&topology)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["a-x", "a-y", "a-z"]);
    }

    #[test]
    fn test_empty_topology() {
        assert!(transform_topology_to_flow_nodes(&[]).is_empty());
        assert!(transform_topology_to_flow_edges(&[]).is_empty());
    }

    #[test]
    fn test_branching_topology_still_single_column() {
        let topology = vec![
            PipelineNode::new("root", "source").with_wires([vec!["left", "right"]]),
            PipelineNode::new("left", "sink"),
            PipelineNode::new("right", "sink"),
        ];
        let nodes = transform_topology_to_flow_nodes(&topology);
        assert!(nodes.iter().all(|n| n.position.x == 200.0));
        assert_eq!(nodes[2].position.y, 600.0);
    }

    #[test]
    fn test_dangling_target_still_emits_edge() {
        let topology = vec![PipelineNode::new("a", "source").with_wires([vec!["ghost"]])];
        let edges = transform_topology_to_flow_edges(&topology);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].target, "ghost");
    }

    #[test]
    fn test_custom_layout() {
        let layout = FlowLayout {
            x: 10.0,
            initial_y: 50.0,
            spacing_y: 100.0,
        };
        let nodes = transform_topology_to_flow_nodes_with(&chain(), &layout);
        assert_eq!(nodes[1].position, Position { x: 10.0, y: 150.0 });
    }

    use proptest::prelude::*;

    fn topology_strategy() -> impl Strategy<Value = Vec<PipelineNode>> {
        prop::collection::vec(
            prop::collection::vec(prop::collection::vec("[a-e]{1,3}", 0..4), 0..3),
            0..20,
        )
        .prop_map(|wires_per_node| {
            wires_per_node
                .into_iter()
                .enumerate()
                .map(|(i, wires)| PipelineNode {
                    id: format!("n{}", i),
                    node_type: "proc".to_string(),
                    capabilities: serde_json::Value::Null,
                    properties: serde_json::Value::Null,
                    wires: if wires.is_empty() { None } else { Some(wires) },
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_nodes_preserve_length_order_and_layout(topology in topology_strategy()) {
            let nodes = transform_topology_to_flow_nodes(&topology);
            prop_assert_eq!(nodes.len(), topology.len());
            for (i, (flow, source)) in nodes.iter().zip(&topology).enumerate() {
                prop_assert_eq!(&flow.id, &source.id);
                prop_assert_eq!(flow.position.x, 200.0);
                prop_assert_eq!(flow.position.y, i as f64 * 300.0);
            }
        }

        #[test]
        fn test_edge_count_matches_wire_targets(topology in topology_strategy()) {
            let expected: usize = topology.iter().map(|n| n.wire_targets().count()).sum();
            prop_assert_eq!(transform_topology_to_flow_edges(&topology).len(), expected);
        }

        #[test]
        fn test_transforms_are_idempotent(topology in topology_strategy()) {
            prop_assert_eq!(
                transform_topology_to_flow_nodes(&topology),
                transform_topology_to_flow_nodes(&topology)
            );
            prop_assert_eq!(
                transform_topology_to_flow_edges(&topology),
                transform_topology_to_flow_edges(&topology)
            );
        }
    }
}
