//! Graph node types for the operation graph.
//!
//! This module provides:
//! - `NodeId`: a stable generational handle into the node arena
//! - `GraphNode`: a named node with its outgoing adjacency list

use std::fmt;

/// Stable handle to a node slot in an [`OperationGraph`](super::OperationGraph).
///
/// Handles carry the generation of the slot they were issued for. Deleting
/// a node bumps the slot generation, so stale handles stop resolving even
/// after the slot is reused by a later node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the arena slot index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the slot generation this handle was issued for.
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// A node in the operation graph.
///
/// A node is identified by the operation id it stands for. Its outgoing
/// edges are non-owning handles to other nodes, kept in insertion order.
///
/// # Example
///
/// ```rust,ignore
/// use opgraph_core::graph::{GraphNode, OperationGraph};
///
/// let mut graph = OperationGraph::new();
/// let total = graph.add_node(GraphNode::new("total"));
/// assert_eq!(graph.node(total).map(GraphNode::id), Some("total"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    id: String,
    pub(crate) adjacency: Vec<NodeId>,
    pub(crate) next: Option<NodeId>,
}

impl GraphNode {
    /// Creates a detached node with empty adjacency.
    ///
    /// The node is not part of any graph until passed to
    /// [`OperationGraph::add_node`](super::OperationGraph::add_node).
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            adjacency: Vec::new(),
            next: None,
        }
    }

    /// Returns the operation id of this node.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the outgoing edge targets in insertion order.
    #[must_use]
    pub fn adjacency(&self) -> &[NodeId] {
        &self.adjacency
    }

    /// Returns the number of outgoing edges.
    #[must_use]
    pub fn out_degree(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the next node in registry order, if any.
    #[must_use]
    pub fn next(&self) -> Option<NodeId> {
        self.next
    }
}
