//! Node arena, insertion-ordered registry, and graph mutation.
//!
//! `OperationGraph` owns every node. Nodes live in an arena of slots and are
//! addressed by generational [`NodeId`] handles. Registered nodes are
//! threaded into a singly linked registry (`head` .. `tail`) in the order
//! they were added; a slot is occupied exactly when its node is registered.

use super::node::{GraphNode, NodeId};

#[derive(Debug, Default, Clone)]
struct Slot {
    generation: u32,
    node: Option<GraphNode>,
    retired: bool,
}

impl Slot {
    /// Advances the generation of a slot whose node was just taken.
    ///
    /// Returns `false` when the generation is exhausted; the slot is then
    /// retired and never handed out again.
    fn release(&mut self) -> bool {
        match self.generation.checked_add(1) {
            Some(next) => {
                self.generation = next;
                true
            }
            None => {
                self.retired = true;
                false
            }
        }
    }
}

/// The operation graph: node arena, registry and per-node adjacency.
///
/// Invariants maintained by every public method:
/// - every adjacency entry targets a registered node;
/// - the registry list is acyclic and ends at `tail`, whose `next` is `None`;
/// - `head`/`tail` are both `None` exactly when the graph is empty;
/// - `count()` equals the number of registered nodes.
#[derive(Debug, Default, Clone)]
pub struct OperationGraph {
    slots: Vec<Slot>,
    free: Vec<usize>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    count: usize,
}

impl OperationGraph {
    /// Creates a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a detached node at the registry tail and returns its handle.
    ///
    /// O(1). Id uniqueness is the caller's responsibility; the scheme
    /// compiler checks `exists_id` before adding. Adjacency entries carried
    /// by the node that do not target registered nodes are dropped.
    pub fn add_node(&mut self, mut node: GraphNode) -> NodeId {
        node.next = None;
        node.adjacency
            .retain(|target| Self::slot_holds(&self.slots, *target));

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                self.slots.len() - 1
            }
        };
        let slot = &mut self.slots[index];
        let id = NodeId::new(index, slot.generation);
        tracing::trace!(node = node.id(), handle = %id, "registering node");
        slot.node = Some(node);

        match self.tail {
            Some(tail) => {
                if let Some(last) = self.node_mut(tail) {
                    last.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.count += 1;
        id
    }

    /// Returns true if the handle refers to a registered node.
    #[must_use]
    pub fn exists(&self, id: NodeId) -> bool {
        Self::slot_holds(&self.slots, id)
    }

    /// Returns true if a registered node carries this operation id.
    #[must_use]
    pub fn exists_id(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Finds the first registered node (in registry order) with this id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes()
            .find(|(_, node)| node.id() == id)
            .map(|(handle, _)| handle)
    }

    /// Returns the node behind a handle, if it is registered.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_ref())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut GraphNode> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_mut())
    }

    /// Returns the first registered node (the traversal start).
    #[must_use]
    pub fn first(&self) -> Option<NodeId> {
        self.head
    }

    /// Returns the most recently registered node.
    #[must_use]
    pub fn last(&self) -> Option<NodeId> {
        self.tail
    }

    /// Returns the number of registered nodes.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns true if no node is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the total number of adjacency entries across all nodes.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.nodes().map(|(_, node)| node.out_degree()).sum()
    }

    /// Iterates registered nodes in registration order.
    #[must_use]
    pub fn nodes(&self) -> Registry<'_> {
        Registry {
            graph: self,
            cursor: self.head,
        }
    }

    /// Iterates registered node handles in registration order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes().map(|(id, _)| id)
    }

    /// Unlinks a node from the registry and takes it out of the arena.
    ///
    /// Handles all four positions (only, first of many, interior, last of
    /// many). The node's own adjacency is returned with it untouched;
    /// incoming edges are not inspected, so callers must run
    /// [`remove_edges_targeting`](Self::remove_edges_targeting) first.
    pub(crate) fn remove_from_registry(&mut self, id: NodeId) -> Option<GraphNode> {
        let next = self.node(id)?.next;

        match (self.head == Some(id), self.tail == Some(id)) {
            (true, true) => {
                self.head = None;
                self.tail = None;
            }
            (true, false) => {
                self.head = next;
            }
            (false, is_tail) => {
                let previous = self.previous_in_registry(id)?;
                if let Some(prev) = self.node_mut(previous) {
                    prev.next = next;
                }
                if is_tail {
                    self.tail = Some(previous);
                }
            }
        }

        let slot = &mut self.slots[id.index()];
        let mut node = slot.node.take()?;
        if slot.release() {
            self.free.push(id.index());
        }
        self.count -= 1;
        node.next = None;
        Some(node)
    }

    /// Deletes a node and every edge that touches it.
    ///
    /// Returns `false` (and does nothing) when the node is not registered.
    /// Incoming edges are removed before the node leaves the registry, so no
    /// adjacency list ever holds a handle to an unregistered node.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        if !self.exists(id) {
            return false;
        }
        let removed_edges = self.remove_edges_targeting(id);
        self.clear_adjacency(id);
        let Some(node) = self.remove_from_registry(id) else {
            return false;
        };
        tracing::debug!(
            node = node.id(),
            incoming = removed_edges,
            remaining = self.count,
            "deleted node"
        );
        true
    }

    /// Deletes the first node carrying `id`, if any.
    pub fn delete_node_by_id(&mut self, id: &str) -> bool {
        match self.find_by_id(id) {
            Some(handle) => self.delete_node(handle),
            None => false,
        }
    }

    /// Releases every node and its adjacency, leaving an empty graph.
    ///
    /// Idempotent: clearing an empty graph is a no-op. Previously issued
    /// handles stay invalid afterwards.
    pub fn clear_graph(&mut self) {
        if self.is_empty() && self.count == 0 {
            return;
        }
        let released = self.count;
        for slot in &mut self.slots {
            if let Some(node) = slot.node.as_mut() {
                node.adjacency.clear();
            }
        }
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.release();
            }
            if !slot.retired {
                self.free.push(index);
            }
        }
        self.head = None;
        self.tail = None;
        self.count = 0;
        tracing::debug!(released, "cleared graph");
    }

    fn previous_in_registry(&self, id: NodeId) -> Option<NodeId> {
        self.nodes()
            .find(|(_, node)| node.next == Some(id))
            .map(|(handle, _)| handle)
    }

    fn slot_holds(slots: &[Slot], id: NodeId) -> bool {
        slots
            .get(id.index())
            .is_some_and(|slot| slot.generation == id.generation() && slot.node.is_some())
    }

    /// Moves a slot's generation, to exercise exhaustion without 2^32 reuses.
    #[cfg(test)]
    pub(crate) fn set_generation(&mut self, index: usize, generation: u32) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.generation = generation;
        }
    }

    /// Checks the storage invariants, describing the first violation found.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        let mut last = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            if !seen.insert(id) {
                return Err(format!("registry cycles back to {id}"));
            }
            let node = self
                .node(id)
                .ok_or_else(|| format!("registry links to released handle {id}"))?;
            for target in node.adjacency() {
                if !self.exists(*target) {
                    return Err(format!("{} has a dangling edge to {target}", node.id()));
                }
            }
            last = Some(id);
            cursor = node.next;
        }
        if last != self.tail {
            return Err(format!("tail {:?} is not the last entry {last:?}", self.tail));
        }
        if self.head.is_none() != self.tail.is_none() {
            return Err("head and tail disagree on emptiness".to_string());
        }
        if seen.len() != self.count {
            return Err(format!("count {} but {} entries", self.count, seen.len()));
        }
        let occupied = self.slots.iter().filter(|slot| slot.node.is_some()).count();
        if occupied != self.count {
            return Err(format!("{occupied} occupied slots for {} nodes", self.count));
        }
        Ok(())
    }
}

/// Iterator over registered nodes in registration order.
#[derive(Debug, Clone)]
pub struct Registry<'a> {
    graph: &'a OperationGraph,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for Registry<'a> {
    type Item = (NodeId, &'a GraphNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.graph.node(id)?;
        self.cursor = node.next;
        Some((id, node))
    }
}
