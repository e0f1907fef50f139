//! Agreement checking against the unidirectional BFS oracle.

use std::collections::HashSet;

use pathmeet_core::{unidirectional_path, Graph, NodeId, SearchError, SearchResult};
use serde::Serialize;

/// A query where a solver disagreed with the oracle.
#[derive(Debug, Clone, Serialize)]
pub struct Inconsistency {
    pub workload: String,
    pub solver: String,
    pub root: NodeId,
    pub target: NodeId,
    pub expected: String,
    pub actual: String,
}

fn describe(result: &Result<SearchResult, SearchError>) -> String {
    match result {
        Ok(SearchResult::Found(path)) => format!("{} hops {:?}", path.hops(), path.nodes()),
        Ok(SearchResult::NotFound) => "no path".to_string(),
        Err(e) => format!("error: {}", e),
    }
}

/// Every unordered pair of distinct nodes, in ascending id order.
pub fn all_pairs(graph: &Graph) -> Vec<(NodeId, NodeId)> {
    let mut ids: Vec<NodeId> = graph.nodes().collect();
    ids.sort_unstable();
    let mut pairs = Vec::with_capacity(ids.len() * ids.len().saturating_sub(1) / 2);
    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            pairs.push((a, b));
        }
    }
    pairs
}

/// True if `path` starts at `root`, ends at `target`, follows graph edges
/// and never revisits a node.
pub fn is_valid_path(graph: &Graph, nodes: &[NodeId], root: NodeId, target: NodeId) -> bool {
    if nodes.first() != Some(&root) || nodes.last() != Some(&target) {
        return false;
    }
    let adjacent = nodes
        .windows(2)
        .all(|pair| graph.neighbors(pair[0]).contains(&pair[1]));
    let unique: HashSet<NodeId> = nodes.iter().copied().collect();
    adjacent && unique.len() == nodes.len()
}

/// A candidate answer agrees with the oracle when both find no path, or
/// both find a path of the same length and the candidate's path is valid.
/// The exact nodes may differ when several shortest paths exist.
pub fn agrees(
    graph: &Graph,
    root: NodeId,
    target: NodeId,
    oracle: &Result<SearchResult, SearchError>,
    candidate: &Result<SearchResult, SearchError>,
) -> bool {
    match (oracle, candidate) {
        (Ok(SearchResult::NotFound), Ok(SearchResult::NotFound)) => true,
        (Ok(SearchResult::Found(expected)), Ok(SearchResult::Found(actual))) => {
            expected.hops() == actual.hops()
                && actual.hops() + 1 == actual.nodes().len()
                && is_valid_path(graph, actual.nodes(), root, target)
        }
        (Err(expected), Err(actual)) => expected == actual,
        _ => false,
    }
}

/// Compare `results` (one per pair, same order) against the oracle.
pub fn check_results(
    workload: &str,
    solver: &str,
    graph: &Graph,
    pairs: &[(NodeId, NodeId)],
    results: &[Result<SearchResult, SearchError>],
) -> Vec<Inconsistency> {
    pairs
        .iter()
        .zip(results)
        .filter_map(|(&(root, target), actual)| {
            let oracle = unidirectional_path(graph, root, target);
            if agrees(graph, root, target, &oracle, actual) {
                None
            } else {
                Some(Inconsistency {
                    workload: workload.to_string(),
                    solver: solver.to_string(),
                    root,
                    target,
                    expected: describe(&oracle),
                    actual: describe(actual),
                })
            }
        })
        .collect()
}
