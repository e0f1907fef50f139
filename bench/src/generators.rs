//! Synthetic graph generators. All deterministic for a given seed and
//! O(n + edges), single-threaded.

use std::collections::HashSet;

use pathmeet_core::{Graph, NodeId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("tree of degree {degree} and depth {depth} needs node ids wider than 64 bits")]
    IdOverflow { degree: u32, depth: u32 },
}

/// Simple LCG for deterministic, fast pseudo-random numbers.
pub struct FastRng(u64);

impl FastRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }

    pub fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Decimal width reserved per tree level in positional node ids.
fn digits_per_level(degree: u32) -> u32 {
    degree.to_string().len() as u32
}

/// Complete tree where every inner node has total degree `degree`.
///
/// Node ids are positional: the root is `1`, and child `i` (1-based) of a
/// node at depth `d - 1` is `parent + i * 10^(d * w)`, where `w` is the
/// decimal width of `degree`. The root has `degree` children; deeper inner
/// nodes have `degree - 1` since their parent accounts for one edge.
pub fn tree(degree: u32, max_depth: u32) -> Result<Graph, GenerateError> {
    let width = digits_per_level(degree);
    // Every id is below 10^((max_depth + 1) * width).
    (max_depth + 1)
        .checked_mul(width)
        .and_then(|exp| 10u64.checked_pow(exp))
        .ok_or(GenerateError::IdOverflow {
            degree,
            depth: max_depth,
        })?;

    let mut graph = Graph::new();
    graph.add_node(1);
    let mut level: Vec<NodeId> = vec![1];

    for depth in 1..=max_depth {
        let factor = 10u64.pow(depth * width);
        let children = if depth == 1 { degree } else { degree - 1 };
        let mut next = Vec::with_capacity(level.len() * children as usize);

        for &parent in &level {
            for i in 1..=children as u64 {
                let child = parent + i * factor;
                graph.add_edge(parent, child);
                next.push(child);
            }
        }
        level = next;
    }

    Ok(graph)
}

/// Two leaves of [`tree`] whose only connection runs through the root:
/// the first-child chain under the root's first child, and the same chain
/// under the root's second child. They are `2 * max_depth` hops apart.
pub fn tree_far_pair(degree: u32, max_depth: u32) -> Option<(NodeId, NodeId)> {
    let width = digits_per_level(degree);
    let mut left: NodeId = 1;
    let mut right: NodeId = 1;
    for depth in 1..=max_depth {
        let factor = 10u64.checked_pow(depth * width)?;
        let right_digit = if depth == 1 { 2 } else { 1 };
        left = left.checked_add(factor)?;
        right = right.checked_add(right_digit * factor)?;
    }
    Some((left, right))
}

/// Erdos-Renyi style random graph over ids `0..node_count`.
///
/// Adds distinct undirected edges until the adjacency entry count reaches
/// `round(fraction * n * (n - 1))`. Nodes that never receive an edge are not
/// part of the graph. `fraction` must be in (0, 1).
pub fn random(node_count: u64, fraction: f64, seed: u64) -> Graph {
    let n = node_count as f64;
    let target_entries = (fraction * n * (n - 1.0)).round() as u64;
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(seed);
    let mut seen: HashSet<(NodeId, NodeId)> = HashSet::new();

    let mut entries = 0u64;
    while entries < target_entries {
        let a = rng.next(node_count);
        let b = rng.next(node_count);
        if a == b {
            continue;
        }
        if seen.insert((a.min(b), a.max(b))) {
            graph.add_edge(a, b);
            entries += 2;
        }
    }

    graph
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Each node is linked to its `k` clockwise ring neighbors; each link is
/// rewired to a random node with probability `p`. High clustering with short
/// path lengths.
pub fn small_world(node_count: u64, seed: u64) -> Graph {
    let k = 5u64;
    let p = 0.05f64;
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(seed);

    for i in 0..node_count {
        graph.add_node(i);
    }

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            let to = if rng.next_f64() < p {
                let rewired = rng.next(node_count);
                if rewired != i {
                    rewired
                } else {
                    neighbor
                }
            } else {
                neighbor
            };
            if to != i {
                graph.add_edge(i, to);
            }
        }
    }

    graph
}

/// Barbell: two dense clusters joined by a thin bridge chain.
///
/// Worst case for finding a path through a bottleneck. Each cluster holds
/// about half the nodes with ~10 random intra-cluster edges per node; they
/// are joined by a chain of 10 bridge nodes. Returns the graph together with
/// one node from each cluster.
pub fn barbell(node_count: u64, seed: u64) -> (Graph, NodeId, NodeId) {
    let bridge_len = 10u64;
    let cluster = (node_count.saturating_sub(bridge_len) / 2).max(2);
    let mut graph = Graph::with_capacity((cluster * 2 + bridge_len) as usize);
    let mut rng = FastRng::new(seed);

    let b_start = cluster + bridge_len;
    for base in [0, b_start] {
        for i in 0..cluster {
            graph.add_node(base + i);
            for _ in 0..10u64.min(cluster - 1) {
                let other = rng.next(cluster);
                if other != i {
                    graph.add_edge(base + i, base + other);
                }
            }
        }
    }

    // Bridge: last node of A → bridge chain → first node of B
    graph.add_edge(cluster - 1, cluster);
    for id in cluster..b_start {
        graph.add_edge(id, id + 1);
    }

    (graph, 0, b_start + cluster - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathmeet_core::shortest_path;

    #[test]
    fn test_tree_node_and_edge_counts() {
        // degree 3, depth 2: 1 + 3 + 3*2 nodes
        let g = tree(3, 2).unwrap();
        assert_eq!(g.node_count(), 10);
        assert_eq!(g.edge_count(), 2 * 9);
        assert_eq!(g.neighbors(1).len(), 3);
        for child in [11u64, 21, 31] {
            assert_eq!(g.neighbors(child).len(), 3);
        }
        assert_eq!(g.neighbors(111).len(), 1);
    }

    #[test]
    fn test_tree_positional_ids() {
        let g = tree(3, 3).unwrap();
        assert!(g.contains(11));
        assert!(g.contains(211));
        assert!(g.contains(1211));
        assert!(g.neighbors(1211).contains(&211));
    }

    #[test]
    fn test_tree_wide_degree() {
        // Degree 12 uses two digits per level.
        let g = tree(12, 2).unwrap();
        assert!(g.contains(1201));
        assert!(g.contains(110_101));
        assert_eq!(g.neighbors(1).len(), 12);
    }

    #[test]
    fn test_tree_far_pair_distance() {
        for (degree, depth) in [(2u32, 3u32), (3, 4), (5, 3)] {
            let g = tree(degree, depth).unwrap();
            let (a, b) = tree_far_pair(degree, depth).unwrap();
            assert!(g.contains(a) && g.contains(b));
            let result = shortest_path(&g, a, b).unwrap();
            assert_eq!(result.hops(), Some(2 * depth as usize));
        }
    }

    #[test]
    fn test_tree_overflow() {
        assert!(matches!(
            tree(3, 25),
            Err(GenerateError::IdOverflow { degree: 3, depth: 25 })
        ));
        assert!(tree_far_pair(3, 25).is_none());
    }

    #[test]
    fn test_random_edge_target() {
        let g = random(200, 0.01, 7);
        // round(0.01 * 200 * 199) = 398 entries
        assert_eq!(g.edge_count(), 398);
        for id in g.nodes() {
            assert!(!g.neighbors(id).contains(&id));
        }
    }

    #[test]
    fn test_random_deterministic() {
        let a = random(100, 0.05, 1);
        let b = random(100, 0.05, 1);
        let mut na: Vec<_> = a.nodes().collect();
        let mut nb: Vec<_> = b.nodes().collect();
        na.sort();
        nb.sort();
        assert_eq!(na, nb);
        for id in na {
            assert_eq!(a.neighbors(id), b.neighbors(id));
        }
    }

    #[test]
    fn test_barbell_connected() {
        let (g, a, b) = barbell(400, 3);
        let hops = shortest_path(&g, a, b).unwrap().hops().unwrap();
        // At least the bridge chain plus one hop on each side.
        assert!(hops >= 11, "hops = {}", hops);
    }

    #[test]
    fn test_small_world_no_self_loops() {
        let g = small_world(500, 9);
        assert_eq!(g.node_count(), 500);
        for id in g.nodes() {
            assert!(!g.neighbors(id).contains(&id));
        }
    }
}
