//! Per-node outgoing adjacency lists.
//!
//! Each registered node keeps an insertion-ordered list of target handles.
//! Entries are references, not ownership: a target is only ever appended
//! while it is registered, and deleting a node strips every entry that
//! points at it.

use super::node::NodeId;
use super::store::OperationGraph;

impl OperationGraph {
    /// Appends an edge from `source` to each registered target, in order.
    ///
    /// Targets that are not registered are skipped. If `source` itself is
    /// not registered the call does nothing. Returns the number of edges
    /// appended.
    pub fn connect(&mut self, source: NodeId, targets: &[NodeId]) -> usize {
        if !self.exists(source) {
            tracing::trace!(handle = %source, "connect from unregistered node ignored");
            return 0;
        }
        let accepted: Vec<NodeId> = targets
            .iter()
            .copied()
            .filter(|target| self.exists(*target))
            .collect();
        let appended = accepted.len();
        if let Some(node) = self.node_mut(source) {
            node.adjacency.extend(accepted);
        }
        appended
    }

    /// Connects nodes by operation id, resolving both ends through the registry.
    ///
    /// An unknown source id makes the whole call a no-op; unknown target ids
    /// are skipped like unregistered targets in [`connect`](Self::connect).
    pub fn connect_by_id(&mut self, source: &str, targets: &[&str]) -> usize {
        let Some(source) = self.find_by_id(source) else {
            return 0;
        };
        let targets: Vec<NodeId> = targets
            .iter()
            .filter_map(|id| self.find_by_id(id))
            .collect();
        self.connect(source, &targets)
    }

    /// Returns the outgoing targets of a node in insertion order.
    ///
    /// Empty for nodes that are not registered.
    #[must_use]
    pub fn adjacent_nodes(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .map(|node| node.adjacency().to_vec())
            .unwrap_or_default()
    }

    /// Returns the operation ids of a node's targets in insertion order.
    #[must_use]
    pub fn adjacent_ids(&self, id: NodeId) -> Vec<&str> {
        self.node(id)
            .map(|node| {
                node.adjacency()
                    .iter()
                    .filter_map(|target| self.node(*target).map(|n| n.id()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Removes every edge, in any node's list, that targets `target`.
    ///
    /// Returns the number of edges removed.
    pub fn remove_edges_targeting(&mut self, target: NodeId) -> usize {
        let sources: Vec<NodeId> = self.node_ids().collect();
        let mut removed = 0;
        for source in sources {
            if let Some(node) = self.node_mut(source) {
                let before = node.adjacency.len();
                node.adjacency.retain(|entry| *entry != target);
                removed += before - node.adjacency.len();
            }
        }
        removed
    }

    /// Drops a node's own outgoing list.
    pub fn clear_adjacency(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.adjacency.clear();
        }
    }
}
