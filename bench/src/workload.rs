//! Timed query workloads over every solver configuration.

use std::fmt;
use std::time::Instant;

use pathmeet_core::{
    unidirectional_path, BidirectionalSearch, DenseGraph, Graph, MatchStrategy, NodeId,
    SearchError, SearchResult,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::check::{check_results, Inconsistency};

/// One way of answering a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    /// Single-source BFS on the sparse graph.
    Unidirectional,
    /// Bidirectional BFS with the hash matcher on the sparse graph.
    SparseBidirectional,
    /// Bidirectional BFS on the dense graph with the given matcher.
    DenseBidirectional(MatchStrategy),
}

impl Solver {
    /// Solvers to run for the chosen strategies. The unidirectional baseline
    /// is always included.
    pub fn lineup(strategies: &[MatchStrategy]) -> Vec<Solver> {
        let mut solvers = vec![Solver::Unidirectional];
        if strategies.contains(&MatchStrategy::Hash) {
            solvers.push(Solver::SparseBidirectional);
        }
        solvers.extend(strategies.iter().map(|&s| Solver::DenseBidirectional(s)));
        solvers
    }
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solver::Unidirectional => write!(f, "unidirectional"),
            Solver::SparseBidirectional => write!(f, "bidirectional/hash (sparse)"),
            Solver::DenseBidirectional(s) => write!(f, "bidirectional/{} (dense)", s),
        }
    }
}

/// Summary of a graph a workload ran on.
#[derive(Debug, Clone, Serialize)]
pub struct GraphSummary {
    pub workload: String,
    pub nodes: usize,
    /// Undirected edges, i.e. half the adjacency entries.
    pub edges: usize,
    pub memory_mb: f64,
    pub build_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimingRow {
    pub workload: String,
    pub solver: String,
    pub queries: usize,
    pub total_ms: f64,
    pub mean_us: f64,
    pub mean_hops: Option<f64>,
    pub not_found: usize,
}

#[derive(Debug, Default, Serialize)]
pub struct WorkloadOutcome {
    pub graphs: Vec<GraphSummary>,
    pub timings: Vec<TimingRow>,
    pub inconsistencies: Vec<Inconsistency>,
}

impl WorkloadOutcome {
    pub fn merge(&mut self, other: WorkloadOutcome) {
        self.graphs.extend(other.graphs);
        self.timings.extend(other.timings);
        self.inconsistencies.extend(other.inconsistencies);
    }
}

fn answer_all<F>(pairs: &[(NodeId, NodeId)], mut solve: F) -> Vec<Result<SearchResult, SearchError>>
where
    F: FnMut(NodeId, NodeId) -> Result<SearchResult, SearchError>,
{
    pairs.iter().map(|&(r, t)| solve(r, t)).collect()
}

fn run_solver(
    solver: Solver,
    graph: &Graph,
    dense: &DenseGraph,
    pairs: &[(NodeId, NodeId)],
) -> Result<Vec<Result<SearchResult, SearchError>>, SearchError> {
    let results = match solver {
        Solver::Unidirectional => answer_all(pairs, |r, t| unidirectional_path(graph, r, t)),
        Solver::SparseBidirectional => {
            let mut engine = BidirectionalSearch::new(graph, MatchStrategy::Hash)?;
            answer_all(pairs, |r, t| engine.shortest_path(r, t))
        }
        Solver::DenseBidirectional(strategy) => {
            let mut engine = BidirectionalSearch::new(dense, strategy)?;
            answer_all(pairs, |r, t| engine.shortest_path(r, t))
        }
    };
    Ok(results)
}

/// Time every solver over `pairs` on `graph` and check each answer against
/// the oracle. The dense form of the graph is built once and shared.
pub fn run(
    workload: &str,
    graph: &Graph,
    build_ms: f64,
    pairs: &[(NodeId, NodeId)],
    solvers: &[Solver],
) -> Result<WorkloadOutcome, SearchError> {
    let t = Instant::now();
    let dense = DenseGraph::from_graph(graph);
    debug!(
        workload,
        ms = t.elapsed().as_secs_f64() * 1000.0,
        "built dense index"
    );

    let summary = GraphSummary {
        workload: workload.to_string(),
        nodes: graph.node_count(),
        edges: graph.edge_count() / 2,
        memory_mb: (graph.memory_usage() + dense.memory_usage()) as f64 / 1_048_576.0,
        build_ms,
    };
    info!(
        workload,
        nodes = summary.nodes,
        edges = summary.edges,
        queries = pairs.len(),
        "running workload"
    );

    let mut outcome = WorkloadOutcome {
        graphs: vec![summary],
        ..Default::default()
    };

    for &solver in solvers {
        let name = solver.to_string();
        let t = Instant::now();
        let results = run_solver(solver, graph, &dense, pairs)?;
        let elapsed = t.elapsed().as_secs_f64() * 1000.0;

        let hops: Vec<usize> = results
            .iter()
            .filter_map(|r| r.as_ref().ok().and_then(SearchResult::hops))
            .collect();
        let not_found = results
            .iter()
            .filter(|r| matches!(r, Ok(SearchResult::NotFound)))
            .count();

        outcome.timings.push(TimingRow {
            workload: workload.to_string(),
            solver: name.clone(),
            queries: pairs.len(),
            total_ms: elapsed,
            mean_us: if pairs.is_empty() {
                0.0
            } else {
                elapsed * 1000.0 / pairs.len() as f64
            },
            mean_hops: (!hops.is_empty())
                .then(|| hops.iter().sum::<usize>() as f64 / hops.len() as f64),
            not_found,
        });
        outcome
            .inconsistencies
            .extend(check_results(workload, &name, graph, pairs, &results));
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::all_pairs;
    use crate::generators;

    #[test]
    fn test_lineup() {
        let all = Solver::lineup(&MatchStrategy::ALL);
        assert_eq!(all.len(), 5);
        assert_eq!(all[0], Solver::Unidirectional);
        let bitmap_only = Solver::lineup(&[MatchStrategy::Bitmap]);
        assert_eq!(
            bitmap_only,
            vec![
                Solver::Unidirectional,
                Solver::DenseBidirectional(MatchStrategy::Bitmap)
            ]
        );
    }

    #[test]
    fn test_solver_names() {
        assert_eq!(
            Solver::DenseBidirectional(MatchStrategy::SortMerge).to_string(),
            "bidirectional/sort-merge (dense)"
        );
    }

    #[test]
    fn test_run_tree_workload() {
        let g = generators::tree(3, 3).unwrap();
        let pair = generators::tree_far_pair(3, 3).unwrap();
        let solvers = Solver::lineup(&MatchStrategy::ALL);
        let outcome = run("tree", &g, 0.0, &[pair], &solvers).unwrap();
        assert!(outcome.inconsistencies.is_empty());
        assert_eq!(outcome.timings.len(), solvers.len());
        for row in &outcome.timings {
            assert_eq!(row.queries, 1);
            assert_eq!(row.mean_hops, Some(6.0));
            assert_eq!(row.not_found, 0);
        }
        assert_eq!(outcome.graphs[0].nodes, g.node_count());
    }

    #[test]
    fn test_run_random_all_pairs() {
        let g = generators::random(40, 0.04, 11);
        let pairs = all_pairs(&g);
        let outcome = run("random", &g, 0.0, &pairs, &Solver::lineup(&MatchStrategy::ALL)).unwrap();
        assert!(
            outcome.inconsistencies.is_empty(),
            "{:?}",
            outcome.inconsistencies
        );
    }

    #[test]
    fn test_merge() {
        let mut a = WorkloadOutcome::default();
        let g = generators::tree(2, 2).unwrap();
        let b = run("t", &g, 0.0, &[(1, 11)], &[Solver::Unidirectional]).unwrap();
        a.merge(b);
        assert_eq!(a.graphs.len(), 1);
        assert_eq!(a.timings.len(), 1);
    }
}
