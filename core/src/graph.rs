use std::collections::HashMap;

/// Node identifier. External ids are whatever the data producer assigned;
/// internal ids of a [`DenseGraph`] are contiguous indices `0..n`.
pub type NodeId = u64;

/// Read-only adjacency contract shared by both search algorithms.
///
/// Searches run entirely in the store's *internal* id space. `resolve` maps a
/// caller's external id into it, `external` maps a search result back out.
/// For a sparse [`Graph`] both are the identity on the node set.
pub trait Adjacency {
    fn node_count(&self) -> usize;

    /// Neighbors of an internal id. Unknown ids have no neighbors.
    fn neighbors(&self, node: NodeId) -> &[NodeId];

    fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// Translate an external id into the internal id space.
    fn resolve(&self, external: NodeId) -> Option<NodeId>;

    /// Translate an internal id back to the caller's external id.
    fn external(&self, internal: NodeId) -> NodeId;

    /// `Some(n)` when internal ids are exactly `0..n`, which array-backed
    /// matchers rely on. `None` for sparse stores.
    fn dense_bound(&self) -> Option<usize> {
        None
    }
}

/// Sparse undirected graph keyed by external node ids.
///
/// Adjacency is symmetric when built through [`Graph::add_edge`]. Loaders that
/// already supply both ordered pairs of every edge use [`Graph::add_arc`]; the
/// searches assume, but do not verify, that the result is symmetric.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: HashMap<NodeId, Vec<NodeId>>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            adjacency: HashMap::new(),
        }
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            adjacency: HashMap::with_capacity(node_count),
        }
    }

    /// Build from a ready-made id → neighbor-list mapping, taken as-is.
    pub fn from_adjacency(adjacency: HashMap<NodeId, Vec<NodeId>>) -> Self {
        Self { adjacency }
    }

    /// Register a node with no edges. No-op if it already exists.
    pub fn add_node(&mut self, id: NodeId) {
        self.adjacency.entry(id).or_default();
    }

    /// Add an undirected edge: `b` is appended to `a`'s list and vice versa.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) {
        self.add_arc(a, b);
        if a != b {
            self.add_arc(b, a);
        }
    }

    /// Add one direction of an edge. Both endpoints become nodes.
    pub fn add_arc(&mut self, from: NodeId, to: NodeId) {
        self.adjacency.entry(from).or_default().push(to);
        self.adjacency.entry(to).or_default();
    }

    /// Bulk load undirected edges.
    pub fn load_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        for (a, b) in edges {
            self.add_edge(a, b);
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Neighbor list of a node, empty if the node is unknown.
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Node ids in map iteration order (unspecified).
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of adjacency entries. Twice the undirected edge count for a
    /// symmetric graph without self-loops.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|v| v.len()).sum()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let map_mem =
            self.adjacency.capacity() * (size_of::<NodeId>() + size_of::<Vec<NodeId>>() + 8);
        let list_mem: usize = self
            .adjacency
            .values()
            .map(|v| v.capacity() * size_of::<NodeId>())
            .sum();
        map_mem + list_mem
    }
}

impl Adjacency for Graph {
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn neighbors(&self, node: NodeId) -> &[NodeId] {
        Graph::neighbors(self, node)
    }

    fn resolve(&self, external: NodeId) -> Option<NodeId> {
        self.contains(external).then_some(external)
    }

    fn external(&self, internal: NodeId) -> NodeId {
        internal
    }
}

/// Array-backed graph over contiguous internal indices, with the
/// translation tables to and from the original external ids.
///
/// Built once per graph in O(V + E) and shared by any number of queries.
/// Indices are assigned in the source map's iteration order, so the same
/// input may get different internal indices on a different load or run.
/// Only the external view of results is stable.
#[derive(Debug, Clone)]
pub struct DenseGraph {
    adjacency: Vec<Vec<NodeId>>,
    to_external: Vec<NodeId>,
    to_internal: HashMap<NodeId, NodeId>,
}

impl DenseGraph {
    /// Assign contiguous indices to every node of `graph` and translate all
    /// neighbor lists. Neighbor order within each list is preserved.
    ///
    /// Neighbor references to ids that are not nodes of `graph` cannot occur
    /// for graphs built through [`Graph`]'s methods. For a graph supplied via
    /// [`Graph::from_adjacency`] such dangling references are dropped.
    pub fn from_graph(graph: &Graph) -> Self {
        let n = graph.node_count();
        let mut to_external = Vec::with_capacity(n);
        let mut to_internal = HashMap::with_capacity(n);

        for (idx, id) in graph.nodes().enumerate() {
            to_external.push(id);
            to_internal.insert(id, idx as NodeId);
        }

        let adjacency = to_external
            .iter()
            .map(|&id| {
                graph
                    .neighbors(id)
                    .iter()
                    .filter_map(|nb| to_internal.get(nb).copied())
                    .collect()
            })
            .collect();

        Self {
            adjacency,
            to_external,
            to_internal,
        }
    }

    /// External id → internal index, `None` for ids not in the graph.
    pub fn to_internal(&self, external: NodeId) -> Option<NodeId> {
        self.to_internal.get(&external).copied()
    }

    /// Internal index → external id, `None` if out of range.
    pub fn to_external(&self, internal: NodeId) -> Option<NodeId> {
        self.to_external.get(internal as usize).copied()
    }

    /// Neighbors of an internal index.
    pub fn neighbors(&self, internal: NodeId) -> &[NodeId] {
        self.adjacency
            .get(internal as usize)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|v| v.len()).sum()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let lists: usize = self
            .adjacency
            .iter()
            .map(|v| size_of::<Vec<NodeId>>() + v.capacity() * size_of::<NodeId>())
            .sum();
        let tables = self.to_external.capacity() * size_of::<NodeId>()
            + self.to_internal.capacity() * (2 * size_of::<NodeId>() + 8);
        lists + tables
    }
}

impl From<&Graph> for DenseGraph {
    fn from(graph: &Graph) -> Self {
        Self::from_graph(graph)
    }
}

impl Adjacency for DenseGraph {
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn neighbors(&self, node: NodeId) -> &[NodeId] {
        DenseGraph::neighbors(self, node)
    }

    fn resolve(&self, external: NodeId) -> Option<NodeId> {
        self.to_internal(external)
    }

    fn external(&self, internal: NodeId) -> NodeId {
        // Internal ids handed out by `resolve` or found in adjacency lists are
        // always in range.
        self.to_external[internal as usize]
    }

    fn dense_bound(&self) -> Option<usize> {
        Some(self.adjacency.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Graph {
        let mut g = Graph::new();
        g.load_edges([(1, 2), (2, 3), (3, 4), (3, 5), (4, 5), (1, 6), (6, 7), (8, 9)]);
        g
    }

    #[test]
    fn test_add_edge_is_symmetric() {
        let g = sample();
        for id in g.nodes() {
            for &nb in g.neighbors(id) {
                assert!(g.neighbors(nb).contains(&id), "{} -> {} not mirrored", id, nb);
            }
        }
    }

    #[test]
    fn test_counts() {
        let g = sample();
        assert_eq!(g.node_count(), 9);
        assert_eq!(g.edge_count(), 16);
        assert!(g.memory_usage() > 0);
    }

    #[test]
    fn test_isolated_node() {
        let mut g = sample();
        g.add_node(42);
        assert!(g.contains(42));
        assert!(g.neighbors(42).is_empty());
        assert_eq!(Adjacency::degree(&g, 42), 0);
    }

    #[test]
    fn test_self_loop_stored_once() {
        let mut g = Graph::new();
        g.add_edge(5, 5);
        assert_eq!(g.neighbors(5), &[5]);
    }

    #[test]
    fn test_unknown_node_has_no_neighbors() {
        let g = sample();
        assert!(g.neighbors(999).is_empty());
        assert_eq!(Adjacency::resolve(&g, 999), None);
        assert_eq!(Adjacency::resolve(&g, 3), Some(3));
    }

    #[test]
    fn test_add_arc_is_one_directional() {
        let mut g = Graph::new();
        g.add_arc(1, 2);
        assert_eq!(g.neighbors(1), &[2]);
        assert!(g.contains(2));
        assert!(g.neighbors(2).is_empty());
    }

    #[test]
    fn test_dense_round_trip() {
        let g = sample();
        let d = DenseGraph::from_graph(&g);
        assert_eq!(d.node_count(), g.node_count());
        assert_eq!(d.edge_count(), g.edge_count());
        assert_eq!(d.dense_bound(), Some(9));
        for id in g.nodes() {
            let idx = d.to_internal(id).unwrap();
            assert!((idx as usize) < d.node_count());
            assert_eq!(d.to_external(idx), Some(id));
        }
        assert_eq!(d.to_internal(999), None);
        assert_eq!(d.to_external(9), None);
    }

    #[test]
    fn test_dense_preserves_adjacency() {
        let g = sample();
        let d = DenseGraph::from_graph(&g);
        for id in g.nodes() {
            let idx = d.to_internal(id).unwrap();
            let translated: Vec<NodeId> = d
                .neighbors(idx)
                .iter()
                .map(|&n| Adjacency::external(&d, n))
                .collect();
            assert_eq!(translated, g.neighbors(id));
        }
    }

    #[test]
    fn test_dense_drops_dangling_references() {
        let mut adjacency = HashMap::new();
        adjacency.insert(1, vec![2, 77]);
        adjacency.insert(2, vec![1]);
        let d = DenseGraph::from_graph(&Graph::from_adjacency(adjacency));
        let one = d.to_internal(1).unwrap();
        assert_eq!(d.neighbors(one).len(), 1);
    }

    #[test]
    fn test_dense_empty() {
        let d = DenseGraph::from_graph(&Graph::new());
        assert_eq!(d.node_count(), 0);
        assert_eq!(d.dense_bound(), Some(0));
    }
}
