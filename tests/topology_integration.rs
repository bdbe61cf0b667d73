//! Integration tests for the topology transforms
//!
//! These tests exercise the public transform API the way the pipelines page
//! and the backend worker use it:
//! - Topologies deserialized from backend JSON
//! - Layout and edge derivation
//! - Diagnostics over malformed topologies

mod common;

use common::builders::chain_topology;
use gitops_console::topology::{
    inspect_topology, transform_topology_to_flow_edges, transform_topology_to_flow_nodes,
    FlowEdge, PROCESSOR_NODE_TYPE,
};
use gitops_console::types::PipelineNode;
use serde_json::json;

#[test]
fn test_two_node_example_from_backend_json() {
    let topology: Vec<PipelineNode> = serde_json::from_value(json!([
        { "id": "a", "type": "mqtt-in", "wires": [["b"]] },
        { "id": "b", "type": "debug", "wires": [] }
    ]))
    .unwrap();

    let nodes = transform_topology_to_flow_nodes(&topology);
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].id, "a");
    assert_eq!((nodes[0].position.x, nodes[0].position.y), (200.0, 0.0));
    assert_eq!((nodes[1].position.x, nodes[1].position.y), (200.0, 300.0));
    assert!(nodes.iter().all(|n| n.node_type == PROCESSOR_NODE_TYPE));
    assert_eq!(nodes[1].data.node_type, "debug");

    let edges = transform_topology_to_flow_edges(&topology);
    assert_eq!(edges, vec![FlowEdge::between("a", "b")]);
    assert_eq!(edges[0].id, "a-b");
    assert!(edges[0].animated);
}

#[test]
fn test_fan_out_groups_are_flattened_in_order() {
    let topology = vec![PipelineNode::new("a", "switch").with_wires([vec!["x", "y"], vec!["z"]])];
    let ids: Vec<String> = transform_topology_to_flow_edges(&topology)
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec!["a-x", "a-y", "a-z"]);
}

#[test]
fn test_flow_node_serializes_for_renderer() {
    let topology: Vec<PipelineNode> = serde_json::from_value(json!([
        { "id": "n1", "type": "http", "capabilities": { "in": 1 }, "properties": { "url": "/x" } }
    ]))
    .unwrap();
    let nodes = transform_topology_to_flow_nodes(&topology);
    let value = serde_json::to_value(&nodes[0]).unwrap();

    assert_eq!(value["type"], "processor");
    assert_eq!(value["position"]["y"], 0.0);
    assert_eq!(value["data"]["type"], "http");
    assert_eq!(value["data"]["name"], "n1");
    assert_eq!(value["data"]["kind"], "n1");
    assert_eq!(value["data"]["properties"]["url"], "/x");
}

#[test]
fn test_long_chain_layout() {
    let topology = chain_topology(12);
    let nodes = transform_topology_to_flow_nodes(&topology);
    let edges = transform_topology_to_flow_edges(&topology);

    assert_eq!(nodes.len(), 12);
    assert_eq!(nodes[11].position.y, 11.0 * 300.0);
    assert_eq!(edges.len(), 11);
    assert!(inspect_topology(&topology, &edges).is_clean());
}

#[test]
fn test_dangling_targets_pass_through_and_are_reported() {
    let topology = vec![PipelineNode::new("a", "function").with_wires([["ghost"]])];
    let edges = transform_topology_to_flow_edges(&topology);
    assert_eq!(edges.len(), 1);

    let report = inspect_topology(&topology, &edges);
    assert_eq!(report.dangling_edges, edges);
    assert!(report.duplicate_node_ids.is_empty());
}

#[test]
fn test_hyphenated_ids_can_collide() {
    let topology = vec![
        PipelineNode::new("a-b", "function").with_wires([["c"]]),
        PipelineNode::new("a", "function").with_wires([["b-c"]]),
        PipelineNode::new("c", "function"),
        PipelineNode::new("b-c", "function"),
    ];
    let edges = transform_topology_to_flow_edges(&topology);
    assert_eq!(edges[0].id, edges[1].id);

    let report = inspect_topology(&topology, &edges);
    assert_eq!(report.duplicate_edge_ids, vec!["a-b-c".to_string()]);
}

#[test]
fn test_transforms_are_idempotent() {
    let topology = chain_topology(5);
    assert_eq!(
        transform_topology_to_flow_nodes(&topology),
        transform_topology_to_flow_nodes(&topology)
    );
    assert_eq!(
        transform_topology_to_flow_edges(&topology),
        transform_topology_to_flow_edges(&topology)
    );
}
