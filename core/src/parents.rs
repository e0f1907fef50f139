use std::collections::HashMap;

use crate::graph::{Adjacency, NodeId};

/// How a discovered node was reached. A node absent from a [`ParentMap`] is
/// unvisited, which is a different state from `Origin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    /// The search origin (root or target) itself.
    Origin,
    /// Discovered while expanding this node.
    Node(NodeId),
}

/// Parent pointers for one search direction of one query.
///
/// Each entry is written exactly once, when the node is first discovered.
/// Discovery order is kept alongside so that iterating the discovered set is
/// deterministic, independent of hash order.
#[derive(Debug, Clone, Default)]
pub struct ParentMap {
    parents: HashMap<NodeId, Parent>,
    order: Vec<NodeId>,
}

impl ParentMap {
    /// A map holding only `origin`, with no parent.
    pub fn rooted_at(origin: NodeId) -> Self {
        let mut map = Self::default();
        map.parents.insert(origin, Parent::Origin);
        map.order.push(origin);
        map
    }

    /// Record `node` as discovered from `parent`. Returns false, leaving the
    /// map untouched, if `node` was already discovered.
    pub fn discover(&mut self, node: NodeId, parent: NodeId) -> bool {
        if self.parents.contains_key(&node) {
            return false;
        }
        self.parents.insert(node, Parent::Node(parent));
        self.order.push(node);
        true
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.parents.contains_key(&node)
    }

    /// `None` means unvisited.
    pub fn parent(&self, node: NodeId) -> Option<Parent> {
        self.parents.get(&node).copied()
    }

    /// All discovered nodes in discovery order.
    pub fn discovered(&self) -> &[NodeId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Follow parent pointers from `node` back to the origin. The returned
    /// chain starts at `node` and ends at the origin. Empty if `node` was
    /// never discovered.
    pub fn chain_from(&self, node: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            chain.push(current);
            match parent {
                Parent::Origin => break,
                Parent::Node(p) => current = p,
            }
        }
        chain
    }
}

/// A path as a node sequence, first element the query root, last the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    nodes: Vec<NodeId>,
}

impl Path {
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    /// The zero-hop path of a node to itself.
    pub fn single(node: NodeId) -> Self {
        Self { nodes: vec![node] }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }

    /// Path length in edges.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn last(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    pub(crate) fn reverse(&mut self) {
        self.nodes.reverse();
    }

    /// Translate every element from internal to external ids.
    pub(crate) fn to_external<G: Adjacency + ?Sized>(&self, graph: &G) -> Path {
        Path {
            nodes: self.nodes.iter().map(|&n| graph.external(n)).collect(),
        }
    }
}

/// Outcome of a well-formed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// Both endpoints exist but are not connected.
    NotFound,
    Found(Path),
}

impl SearchResult {
    pub fn path(&self) -> Option<&Path> {
        match self {
            SearchResult::Found(path) => Some(path),
            SearchResult::NotFound => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            SearchResult::Found(path) => Some(path),
            SearchResult::NotFound => None,
        }
    }

    /// Hop count, `None` when no path exists.
    pub fn hops(&self) -> Option<usize> {
        self.path().map(Path::hops)
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found(_))
    }
}

/// Stitch the two parent trees together at `meeting`.
///
/// The root side contributes `root..=meeting`, the target side contributes
/// everything after `meeting` up to and including the target.
pub fn join_at(meeting: NodeId, root_side: &ParentMap, target_side: &ParentMap) -> Path {
    let mut nodes = root_side.chain_from(meeting);
    nodes.reverse();
    if let Some(Parent::Node(next)) = target_side.parent(meeting) {
        nodes.extend(target_side.chain_from(next));
    }
    Path::new(nodes)
}

/// Path from a single-direction parent tree, origin first.
pub fn unwind(end: NodeId, parents: &ParentMap) -> Path {
    let mut nodes = parents.chain_from(end);
    nodes.reverse();
    Path::new(nodes)
}
