//! Tests for the node registry and graph mutation.

use super::*;
use proptest::prelude::*;

fn graph_with(ids: &[&str]) -> (OperationGraph, Vec<NodeId>) {
    let mut graph = OperationGraph::new();
    let handles = ids
        .iter()
        .map(|id| graph.add_node(GraphNode::new(*id)))
        .collect();
    (graph, handles)
}

fn registry_ids(graph: &OperationGraph) -> Vec<String> {
    graph.nodes().map(|(_, n)| n.id().to_string()).collect()
}

// =============================================================================
// Registration
// =============================================================================

#[test]
fn test_new_graph_is_empty() {
    let graph = OperationGraph::new();

    assert!(graph.is_empty());
    assert_eq!(graph.count(), 0);
    assert!(graph.first().is_none());
    assert!(graph.last().is_none());
    assert!(graph.check_invariants().is_ok());
}

#[test]
fn test_add_node_keeps_call_order() {
    let (graph, handles) = graph_with(&["A", "B", "C"]);

    assert_eq!(graph.first(), Some(handles[0]));
    assert_eq!(graph.last(), Some(handles[2]));
    assert_eq!(graph.count(), 3);
    assert_eq!(registry_ids(&graph), ["A", "B", "C"]);
    assert!(graph.check_invariants().is_ok());
}

#[test]
fn test_exists_and_find_by_id() {
    let (graph, handles) = graph_with(&["A", "B"]);

    assert!(graph.exists(handles[0]));
    assert!(graph.exists_id("B"));
    assert!(!graph.exists_id("Z"));
    assert_eq!(graph.find_by_id("B"), Some(handles[1]));
    assert_eq!(graph.find_by_id("Z"), None);
}

#[test]
fn test_find_by_id_returns_first_match() {
    let (graph, handles) = graph_with(&["A", "dup", "dup"]);

    assert_eq!(graph.find_by_id("dup"), Some(handles[1]));
}

#[test]
fn test_add_node_drops_edges_to_unregistered_targets() {
    let (mut graph, handles) = graph_with(&["A", "B"]);
    graph.connect(handles[0], &[handles[1]]);
    let copy = graph.node(handles[0]).cloned().unwrap();
    graph.delete_node(handles[0]);
    graph.delete_node(handles[1]);

    // re-registering a copy must not smuggle in the dead handle
    let a = graph.add_node(copy);

    assert!(graph.adjacent_nodes(a).is_empty());
    assert_eq!(registry_ids(&graph), ["A"]);
    assert!(graph.check_invariants().is_ok());
}

// =============================================================================
// Deletion in all four registry positions
// =============================================================================

#[test]
fn test_delete_only_node() {
    let (mut graph, handles) = graph_with(&["A"]);

    assert!(graph.delete_node(handles[0]));

    assert!(graph.is_empty());
    assert!(graph.first().is_none());
    assert!(graph.last().is_none());
    assert_eq!(graph.count(), 0);
    assert!(graph.check_invariants().is_ok());
}

#[test]
fn test_delete_first_of_many() {
    let (mut graph, handles) = graph_with(&["A", "B", "C"]);

    assert!(graph.delete_node(handles[0]));

    assert_eq!(graph.first(), Some(handles[1]));
    assert_eq!(graph.last(), Some(handles[2]));
    assert_eq!(registry_ids(&graph), ["B", "C"]);
    assert!(graph.check_invariants().is_ok());
}

#[test]
fn test_delete_interior_node() {
    let (mut graph, handles) = graph_with(&["A", "B", "C"]);

    assert!(graph.delete_node(handles[1]));

    assert_eq!(graph.first(), Some(handles[0]));
    assert_eq!(graph.last(), Some(handles[2]));
    assert_eq!(registry_ids(&graph), ["A", "C"]);
    assert!(graph.check_invariants().is_ok());
}

#[test]
fn test_delete_last_of_many() {
    let (mut graph, handles) = graph_with(&["A", "B", "C"]);

    assert!(graph.delete_node(handles[2]));

    assert_eq!(graph.last(), Some(handles[1]));
    assert_eq!(graph.node(handles[1]).and_then(GraphNode::next), None);
    assert_eq!(registry_ids(&graph), ["A", "B"]);

    // appending after a tail delete links from the new tail
    let d = graph.add_node(GraphNode::new("D"));
    assert_eq!(graph.last(), Some(d));
    assert_eq!(registry_ids(&graph), ["A", "B", "D"]);
    assert!(graph.check_invariants().is_ok());
}

#[test]
fn test_delete_absent_node_is_noop() {
    let (mut graph, handles) = graph_with(&["A", "B"]);
    assert!(graph.delete_node(handles[1]));

    assert!(!graph.delete_node(handles[1]));
    assert!(!graph.delete_node_by_id("missing"));
    assert_eq!(graph.count(), 1);
    assert!(graph.check_invariants().is_ok());
}

#[test]
fn test_delete_removes_incoming_edges() {
    let (mut graph, h) = graph_with(&["A", "B", "N"]);
    graph.connect(h[0], &[h[2], h[1]]);
    graph.connect(h[1], &[h[2]]);
    graph.connect(h[2], &[h[0]]);

    assert!(graph.delete_node(h[2]));

    assert_eq!(graph.adjacent_nodes(h[0]), vec![h[1]]);
    assert!(graph.adjacent_nodes(h[1]).is_empty());
    assert_eq!(graph.count(), 2);
    assert_eq!(graph.edge_count(), 1);
    assert!(graph.check_invariants().is_ok());
}

#[test]
fn test_delete_node_with_self_loop() {
    let (mut graph, h) = graph_with(&["A", "B"]);
    graph.connect(h[0], &[h[0], h[1]]);

    assert!(graph.delete_node(h[0]));

    assert_eq!(graph.edge_count(), 0);
    assert!(graph.check_invariants().is_ok());
}

#[test]
fn test_delete_node_by_id() {
    let (mut graph, _) = graph_with(&["A", "B"]);

    assert!(graph.delete_node_by_id("A"));
    assert!(!graph.exists_id("A"));
    assert_eq!(registry_ids(&graph), ["B"]);
}

#[test]
fn test_stale_handle_does_not_resolve_after_slot_reuse() {
    let (mut graph, handles) = graph_with(&["A"]);
    let stale = handles[0];
    graph.delete_node(stale);

    let fresh = graph.add_node(GraphNode::new("B"));

    assert_eq!(fresh.index(), stale.index());
    assert_ne!(fresh, stale);
    assert!(!graph.exists(stale));
    assert!(graph.node(stale).is_none());
    assert!(!graph.delete_node(stale));
    assert!(graph.exists(fresh));
}

#[test]
fn test_exhausted_slot_is_never_reused() {
    let mut graph = OperationGraph::new();
    let a = graph.add_node(GraphNode::new("A"));
    assert!(graph.delete_node(a));
    graph.set_generation(a.index(), u32::MAX);

    let b = graph.add_node(GraphNode::new("B"));
    assert_eq!(b.index(), a.index());
    assert_eq!(b.generation(), u32::MAX);
    assert!(graph.delete_node(b));

    let c = graph.add_node(GraphNode::new("C"));
    assert_ne!(c.index(), b.index());
    assert!(!graph.exists(b));

    graph.clear_graph();
    let d = graph.add_node(GraphNode::new("D"));
    assert_ne!(d.index(), b.index());
    assert!(!graph.exists(b));
    assert!(graph.check_invariants().is_ok());
}

// =============================================================================
// Clearing
// =============================================================================

#[test]
fn test_clear_graph_is_total() {
    let (mut graph, h) = graph_with(&["A", "B", "C"]);
    graph.connect(h[0], &[h[1], h[2]]);

    graph.clear_graph();

    assert!(graph.is_empty());
    assert_eq!(graph.count(), 0);
    assert_eq!(graph.edge_count(), 0);
    assert!(h.iter().all(|id| !graph.exists(*id)));
    assert!(graph.check_invariants().is_ok());
}

#[test]
fn test_clear_graph_is_idempotent() {
    let (mut graph, _) = graph_with(&["A"]);

    graph.clear_graph();
    graph.clear_graph();
    assert!(graph.is_empty());
    assert_eq!(graph.count(), 0);

    let mut empty = OperationGraph::new();
    empty.clear_graph();
    assert!(empty.is_empty());
    assert_eq!(empty.count(), 0);
}

#[test]
fn test_graph_is_reusable_after_clear() {
    let (mut graph, _) = graph_with(&["A", "B"]);
    graph.clear_graph();

    let c = graph.add_node(GraphNode::new("C"));

    assert_eq!(graph.first(), Some(c));
    assert_eq!(registry_ids(&graph), ["C"]);
    assert!(graph.check_invariants().is_ok());
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_registry_follows_add_order(count in 1usize..40) {
        let ids: Vec<String> = (0..count).map(|i| format!("n{i}")).collect();
        let mut graph = OperationGraph::new();
        let first = graph.add_node(GraphNode::new(ids[0].clone()));
        for id in &ids[1..] {
            graph.add_node(GraphNode::new(id.clone()));
        }

        prop_assert_eq!(graph.first(), Some(first));
        prop_assert_eq!(registry_ids(&graph), ids);
        prop_assert!(graph.check_invariants().is_ok());
    }

    #[test]
    fn prop_delete_strips_every_incoming_edge(
        count in 2usize..20,
        edges in proptest::collection::vec((0usize..20, 0usize..20), 0..60),
        victim in 0usize..20,
    ) {
        let mut graph = OperationGraph::new();
        let handles: Vec<NodeId> = (0..count)
            .map(|i| graph.add_node(GraphNode::new(format!("n{i}"))))
            .collect();
        for (from, to) in edges {
            graph.connect(handles[from % count], &[handles[to % count]]);
        }
        let victim = handles[victim % count];
        let before = graph.count();

        prop_assert!(graph.delete_node(victim));

        prop_assert_eq!(graph.count(), before - 1);
        for id in graph.node_ids() {
            prop_assert!(!graph.adjacent_nodes(id).contains(&victim));
        }
        prop_assert!(graph.check_invariants().is_ok());
    }
}
