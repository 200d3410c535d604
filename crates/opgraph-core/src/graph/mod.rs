//! Operation graph storage and traversal.
//!
//! This module holds the mutable plan graph built from a scheme:
//!
//! - **Node arena**: nodes addressed by generational [`NodeId`] handles
//! - **Registry**: insertion-ordered list of registered nodes; the first
//!   entry is where traversal starts
//! - **Adjacency**: per-node, insertion-ordered outgoing edge targets
//! - **Traversal**: depth-first walk that acts on each node exactly once,
//!   tolerating cycles and diamonds
//!
//! # Example
//!
//! ```rust,ignore
//! use opgraph_core::graph::{GraphNode, OperationGraph};
//!
//! let mut graph = OperationGraph::new();
//! let a = graph.add_node(GraphNode::new("A"));
//! let b = graph.add_node(GraphNode::new("B"));
//! graph.connect(a, &[b]);
//! graph.connect(b, &[a]); // cycles are fine
//!
//! let mut seen = Vec::new();
//! graph.depth_first_search(|_, node| seen.push(node.id().to_string()));
//! assert_eq!(seen, ["A", "B"]);
//! ```

mod adjacency;
mod node;
mod store;
mod traversal;

#[cfg(test)]
mod store_tests;

pub use node::{GraphNode, NodeId};
pub use store::{OperationGraph, Registry};
pub use traversal::{NodeVisitor, TraversalScope, TraversalStats, VisitRecorder};
