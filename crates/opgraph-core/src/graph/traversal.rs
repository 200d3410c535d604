//! Depth-first, visit-once traversal.
//!
//! The walk starts at the first registered node. A node is checked against
//! the visited set before anything else, so nodes reachable through several
//! paths, or through a cycle back to an ancestor, are acted on once.

use super::node::{GraphNode, NodeId};
use super::store::OperationGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::convert::Infallible;

/// Per-node action invoked by [`OperationGraph::accept`].
///
/// Any `FnMut(NodeId, &GraphNode)` closure is a visitor.
pub trait NodeVisitor {
    /// Called exactly once for every node the walk reaches.
    fn visit(&mut self, id: NodeId, node: &GraphNode);
}

impl<F> NodeVisitor for F
where
    F: FnMut(NodeId, &GraphNode),
{
    fn visit(&mut self, id: NodeId, node: &GraphNode) {
        self(id, node);
    }
}

/// Which nodes a traversal starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TraversalScope {
    /// Only nodes reachable from the first registered node.
    #[default]
    #[serde(rename = "first")]
    FromFirst,
    /// Every registered node: after the walk from the first node, restart
    /// from each unvisited node in registration order.
    #[serde(rename = "all")]
    AllNodes,
}

/// Counters describing a finished traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TraversalStats {
    /// Nodes acted on.
    pub visited: usize,
    /// Walks started (1 for a non-empty `FromFirst` traversal).
    pub roots: usize,
}

/// Visitor that records the operation ids it sees, in visiting order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitRecorder {
    ids: Vec<String>,
}

impl VisitRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded ids in visiting order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Consumes the recorder, returning the recorded ids.
    #[must_use]
    pub fn into_ids(self) -> Vec<String> {
        self.ids
    }
}

impl NodeVisitor for VisitRecorder {
    fn visit(&mut self, _id: NodeId, node: &GraphNode) {
        self.ids.push(node.id().to_string());
    }
}

impl OperationGraph {
    /// Walks the graph depth-first from the first registered node.
    ///
    /// `action` runs once per reachable node, in pre-order, following each
    /// node's targets in insertion order. An empty graph produces no calls.
    pub fn depth_first_search<F>(&self, action: F) -> TraversalStats
    where
        F: FnMut(NodeId, &GraphNode),
    {
        self.traverse(TraversalScope::FromFirst, action)
    }

    /// Walks every registered node, restarting at unvisited nodes.
    pub fn depth_first_search_all<F>(&self, action: F) -> TraversalStats
    where
        F: FnMut(NodeId, &GraphNode),
    {
        self.traverse(TraversalScope::AllNodes, action)
    }

    /// Walks the graph with an explicit scope.
    pub fn traverse<F>(&self, scope: TraversalScope, mut action: F) -> TraversalStats
    where
        F: FnMut(NodeId, &GraphNode),
    {
        let walk = self.try_traverse(scope, |id, node| {
            action(id, node);
            Ok::<(), Infallible>(())
        });
        match walk {
            Ok(stats) => stats,
            Err(never) => match never {},
        }
    }

    /// Walks the graph, handing every node to a [`NodeVisitor`].
    pub fn accept<V>(&self, scope: TraversalScope, visitor: &mut V) -> TraversalStats
    where
        V: NodeVisitor + ?Sized,
    {
        self.traverse(scope, |id, node| visitor.visit(id, node))
    }

    /// Fallible variant of [`depth_first_search`](Self::depth_first_search).
    ///
    /// Stops at the first error returned by `action`.
    pub fn try_depth_first_search<E, F>(&self, action: F) -> Result<TraversalStats, E>
    where
        F: FnMut(NodeId, &GraphNode) -> Result<(), E>,
    {
        self.try_traverse(TraversalScope::FromFirst, action)
    }

    /// Fallible traversal with an explicit scope.
    ///
    /// Uses an explicit stack instead of recursion. Targets are pushed in
    /// reverse so they pop in insertion order, and the visited check happens
    /// on pop, which reproduces the recursive visiting order exactly.
    pub fn try_traverse<E, F>(&self, scope: TraversalScope, mut action: F) -> Result<TraversalStats, E>
    where
        F: FnMut(NodeId, &GraphNode) -> Result<(), E>,
    {
        let mut stats = TraversalStats::default();
        let mut visited: HashSet<NodeId> = HashSet::with_capacity(self.count());
        let mut stack: Vec<NodeId> = Vec::new();

        let roots: Vec<NodeId> = match scope {
            TraversalScope::FromFirst => self.first().into_iter().collect(),
            TraversalScope::AllNodes => self.node_ids().collect(),
        };

        for root in roots {
            if visited.contains(&root) {
                continue;
            }
            stats.roots += 1;
            stack.push(root);

            while let Some(id) = stack.pop() {
                if visited.contains(&id) {
                    continue;
                }
                let Some(node) = self.node(id) else {
                    continue;
                };
                action(id, node)?;
                visited.insert(id);
                stats.visited += 1;
                stack.extend(node.adjacency().iter().rev().copied());
            }
        }

        tracing::debug!(visited = stats.visited, roots = stats.roots, "traversal finished");
        Ok(stats)
    }

    /// Returns the handles in the order a traversal would visit them.
    #[must_use]
    pub fn traversal_order(&self, scope: TraversalScope) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.count());
        self.traverse(scope, |id, _| order.push(id));
        order
    }
}
