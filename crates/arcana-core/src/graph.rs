//! # Graph Engine
//!
//! The in-memory correspondence graph store.
//!
//! Node storage uses `BTreeMap` for deterministic iteration; adjacency is a
//! `Vec` per node because neighbor enumeration is contractually in
//! **insertion order**, not sorted order.
//!
//! ## Error Policy
//!
//! Two deliberately different policies apply:
//! - Reads on an unknown id degrade gracefully to empty results
//! - Writes that require existing endpoints fail with `ArcanaError::UnknownNode`

use crate::primitives::MAX_WALK_DEPTH;
use crate::{ArcanaError, Node, NodeId, NodeKind};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// The main graph structure.
///
/// Edges are undirected, unweighted, and carry no payload; an edge is a
/// symmetric pair of adjacency-list memberships.
///
/// ## Invariants
///
/// - Symmetry: if `a` is adjacent to `b`, then `b` is adjacent to `a`
/// - Referential integrity: adjacency entries only reference stored nodes
/// - No dangling adjacency: removing a node removes it from every neighbor's
///   list, and lists that become empty are dropped entirely
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Node storage: id -> node.
    nodes: BTreeMap<NodeId, Node>,

    /// Adjacency lists in insertion order: id -> neighbor ids.
    adjacency: BTreeMap<NodeId, Vec<NodeId>>,
}

impl Graph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, overwriting any existing node with the same id
    /// (last-write-wins). Returns the id.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id.clone();
        self.nodes.insert(id.clone(), node);
        id
    }

    /// Create a symmetric link between two existing nodes.
    ///
    /// Fails with `UnknownNode` if either endpoint is absent. Linking a node
    /// to itself is silently ignored, as is re-adding an existing link.
    pub fn link(&mut self, a: &NodeId, b: &NodeId) -> Result<(), ArcanaError> {
        if !self.nodes.contains_key(a) {
            return Err(ArcanaError::UnknownNode(a.clone()));
        }
        if !self.nodes.contains_key(b) {
            return Err(ArcanaError::UnknownNode(b.clone()));
        }
        if a == b {
            return Ok(());
        }

        let forward = self.adjacency.entry(a.clone()).or_default();
        if forward.contains(b) {
            // Symmetry invariant: the reverse entry already exists too
            return Ok(());
        }
        forward.push(b.clone());
        self.adjacency.entry(b.clone()).or_default().push(a.clone());
        Ok(())
    }

    /// The node itself followed by its direct neighbors, in adjacency
    /// insertion order. Empty when `id` is unknown; reads never fail.
    #[must_use]
    pub fn related(&self, id: &NodeId) -> Vec<&Node> {
        let Some(node) = self.nodes.get(id) else {
            return Vec::new();
        };
        let mut out = vec![node];
        out.extend(self.neighbor_nodes(id));
        out
    }

    /// Direct neighbors of `id` whose kind matches, in insertion order.
    ///
    /// Unlike [`Graph::related`], the node itself is never part of this
    /// result, even when its own kind matches the filter. Call sites depend
    /// on that asymmetry; it is covered explicitly by tests.
    #[must_use]
    pub fn related_of_kind(&self, id: &NodeId, kind: NodeKind) -> Vec<&Node> {
        self.neighbor_nodes(id)
            .filter(|node| node.id.kind == kind)
            .collect()
    }

    /// The distinct kinds among `id`'s direct neighbors.
    /// Empty when `id` is unknown.
    #[must_use]
    pub fn related_kinds(&self, id: &NodeId) -> BTreeSet<NodeKind> {
        self.neighbor_nodes(id).map(|node| node.id.kind).collect()
    }

    /// Breadth-first traversal from `id`, expanding up to `depth` hops.
    ///
    /// The start node is excluded from the result. A node discovered at hop
    /// count exactly `depth` is included but not expanded further. Results
    /// are in discovery order. Empty when `id` is unknown or `depth` is zero.
    #[must_use]
    pub fn walk(&self, id: &NodeId, depth: usize) -> Vec<&Node> {
        self.walk_inner(id, depth, None)
    }

    /// Breadth-first traversal with a kind filter on the **result set**.
    ///
    /// The filter does not prune expansion: traversal passes through
    /// non-matching intermediate nodes to reach matching ones further away.
    #[must_use]
    pub fn walk_of_kind(&self, id: &NodeId, depth: usize, kind: NodeKind) -> Vec<&Node> {
        self.walk_inner(id, depth, Some(kind))
    }

    fn walk_inner(&self, start: &NodeId, depth: usize, kind: Option<NodeKind>) -> Vec<&Node> {
        let depth = depth.min(MAX_WALK_DEPTH);
        if depth == 0 || !self.nodes.contains_key(start) {
            return Vec::new();
        }

        let mut visited: BTreeSet<&NodeId> = BTreeSet::new();
        let mut queue: VecDeque<(&NodeId, usize)> = VecDeque::new();
        let mut found: Vec<&Node> = Vec::new();

        visited.insert(start);
        queue.push_back((start, 0));

        while let Some((current, hops)) = queue.pop_front() {
            if hops >= depth {
                continue;
            }
            for neighbor in self.adjacency.get(current).into_iter().flatten() {
                if visited.insert(neighbor) {
                    if let Some(node) = self.nodes.get(neighbor) {
                        if kind.is_none_or(|k| node.id.kind == k) {
                            found.push(node);
                        }
                    }
                    queue.push_back((neighbor, hops.saturating_add(1)));
                }
            }
        }

        found
    }

    /// Remove a node and every adjacency reference to it.
    ///
    /// No-op when `id` is unknown. Neighbor lists that become empty are
    /// dropped entirely rather than left as empty entries.
    pub fn remove_node(&mut self, id: &NodeId) {
        if let Some(neighbors) = self.adjacency.remove(id) {
            for neighbor in &neighbors {
                let now_empty = match self.adjacency.get_mut(neighbor) {
                    Some(list) => {
                        list.retain(|n| n != id);
                        list.is_empty()
                    }
                    None => false,
                };
                if now_empty {
                    self.adjacency.remove(neighbor);
                }
            }
        }
        self.nodes.remove(id);
    }

    /// Upsert-or-link: create `target` only if absent, then link it to
    /// `source`.
    ///
    /// When the target already exists its stored data is left untouched;
    /// this call never overwrites. This is the idiom for attaching new
    /// symbolic facts onto existing structure without clobbering prior data.
    pub fn correspond(&mut self, source: &NodeId, target: Node) -> Result<NodeId, ArcanaError> {
        // Check the source up front so a missing source cannot leave a
        // freshly created target behind
        if !self.nodes.contains_key(source) {
            return Err(ArcanaError::UnknownNode(source.clone()));
        }
        let target_id = target.id.clone();
        if !self.nodes.contains_key(&target_id) {
            self.nodes.insert(target_id.clone(), target);
        }
        self.link(source, &target_id)?;
        Ok(target_id)
    }

    /// Lookup a node by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Check whether the graph contains a node.
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Total number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        // Each edge appears in exactly two adjacency lists
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// All nodes in deterministic (id) order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    fn neighbor_nodes<'a>(&'a self, id: &NodeId) -> impl Iterator<Item = &'a Node> {
        self.adjacency
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(|neighbor| self.nodes.get(neighbor))
    }
}

// =============================================================================
// TESTS
// =============================================================================
