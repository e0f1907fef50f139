use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::error::SearchError;
use crate::graph::{Adjacency, NodeId};
use crate::matcher::{FrontierMatcher, MatchStrategy, Matcher};
use crate::parents::{join_at, unwind, ParentMap, Path, SearchResult};

/// Counters for the most recent bidirectional query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub root_side_levels: u32,
    pub target_side_levels: u32,
    /// Nodes present in either parent map when the search stopped.
    pub nodes_discovered: usize,
    /// Meeting node in external ids, if a path was found through one.
    pub meeting: Option<NodeId>,
}

impl SearchStats {
    pub fn levels_expanded(&self) -> u32 {
        self.root_side_levels + self.target_side_levels
    }
}

/// Map both endpoints into the graph's internal id space.
///
/// Absent endpoints and empty graphs are reported as errors rather than
/// folded into `NotFound`, identically for both search algorithms.
fn resolve_endpoints<G: Adjacency + ?Sized>(
    graph: &G,
    root: NodeId,
    target: NodeId,
) -> Result<(NodeId, NodeId), SearchError> {
    if graph.node_count() == 0 {
        return Err(SearchError::EmptyGraph);
    }
    let r = graph
        .resolve(root)
        .ok_or(SearchError::UnknownNode { id: root })?;
    let t = graph
        .resolve(target)
        .ok_or(SearchError::UnknownNode { id: target })?;
    Ok((r, t))
}

/// Single-source BFS from `root` to `target`.
///
/// Starts from whichever endpoint has fewer neighbors; the returned path is
/// always oriented root → target. Stops as soon as the target is discovered
/// rather than when it is dequeued. O(V + E).
///
/// `root == target` yields the zero-hop path without consulting the graph.
pub fn unidirectional_path<G: Adjacency + ?Sized>(
    graph: &G,
    root: NodeId,
    target: NodeId,
) -> Result<SearchResult, SearchError> {
    if root == target {
        return Ok(SearchResult::Found(Path::single(root)));
    }
    let (r, t) = resolve_endpoints(graph, root, target)?;

    let swapped = graph.degree(r) > graph.degree(t);
    let (start, goal) = if swapped { (t, r) } else { (r, t) };

    let mut parents = ParentMap::rooted_at(start);
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for &next in graph.neighbors(current) {
            if !parents.discover(next, current) {
                continue;
            }
            if next == goal {
                let mut path = unwind(goal, &parents);
                if swapped {
                    path.reverse();
                }
                debug!(
                    root,
                    target,
                    hops = path.hops(),
                    visited = parents.len(),
                    "unidirectional path found"
                );
                return Ok(SearchResult::Found(path.to_external(graph)));
            }
            queue.push_back(next);
        }
    }

    debug!(root, target, visited = parents.len(), "unidirectional search exhausted");
    Ok(SearchResult::NotFound)
}

/// One direction of a bidirectional search.
struct Side {
    parents: ParentMap,
    frontier: Vec<NodeId>,
    levels: u32,
}

impl Side {
    fn new(origin: NodeId) -> Self {
        Self {
            parents: ParentMap::rooted_at(origin),
            frontier: vec![origin],
            levels: 0,
        }
    }

    /// Expand the entire current frontier by one level. The new frontier
    /// holds exactly the nodes first discovered during this expansion.
    fn expand<G: Adjacency + ?Sized>(&mut self, graph: &G) {
        let level = std::mem::take(&mut self.frontier);
        let mut next = Vec::new();
        for &node in &level {
            for &neighbor in graph.neighbors(node) {
                if self.parents.discover(neighbor, node) {
                    next.push(neighbor);
                }
            }
        }
        self.frontier = next;
        self.levels += 1;
    }
}

/// Level-synchronized bidirectional BFS over a read-only graph.
///
/// Two parent trees grow from root and target. Each iteration expands the
/// smaller frontier (root side on ties) by one *full* level, then asks the
/// matcher whether any newly discovered node is already known to the other
/// side. Checking only after a complete level guarantees the meeting node
/// lies on a shortest path.
///
/// The engine owns its matcher, including the bitmap scratch buffer, and
/// takes `&mut self` per query, so that buffer is never shared between two
/// in-flight queries. Parent maps and frontiers are per query. The graph is
/// only borrowed immutably, so one graph can back many engines on many
/// threads.
pub struct BidirectionalSearch<'g, G: ?Sized, M = Matcher> {
    graph: &'g G,
    matcher: M,
    stats: SearchStats,
}

impl<'g, G: Adjacency + ?Sized> BidirectionalSearch<'g, G, Matcher> {
    /// Engine using one of the built-in matchers. Fails with
    /// [`SearchError::DenseIndexRequired`] for [`MatchStrategy::Bitmap`] on
    /// a graph without contiguous internal ids.
    pub fn new(graph: &'g G, strategy: MatchStrategy) -> Result<Self, SearchError> {
        let matcher = Matcher::build(strategy, graph.dense_bound())?;
        Ok(Self {
            graph,
            matcher,
            stats: SearchStats::default(),
        })
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.matcher.strategy()
    }
}

impl<'g, G: Adjacency + ?Sized, M: FrontierMatcher> BidirectionalSearch<'g, G, M> {
    /// Engine with a caller-supplied matcher.
    pub fn with_matcher(graph: &'g G, matcher: M) -> Result<Self, SearchError> {
        if !matcher.accepts(graph.dense_bound()) {
            return Err(SearchError::DenseIndexRequired);
        }
        Ok(Self {
            graph,
            matcher,
            stats: SearchStats::default(),
        })
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// Counters of the last completed query.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Shortest path from `root` to `target`, both given as external ids.
    /// The returned path is in external ids as well.
    pub fn shortest_path(
        &mut self,
        root: NodeId,
        target: NodeId,
    ) -> Result<SearchResult, SearchError> {
        self.stats = SearchStats::default();
        if root == target {
            return Ok(SearchResult::Found(Path::single(root)));
        }
        let (r, t) = resolve_endpoints(self.graph, root, target)?;

        let mut from_root = Side::new(r);
        let mut from_target = Side::new(t);

        let meeting = loop {
            if from_root.frontier.is_empty() || from_target.frontier.is_empty() {
                break None;
            }

            let root_turn = from_root.frontier.len() <= from_target.frontier.len();
            let (active, other) = if root_turn {
                (&mut from_root, &from_target)
            } else {
                (&mut from_target, &from_root)
            };

            active.expand(self.graph);
            trace!(
                side = if root_turn { "root" } else { "target" },
                level = active.levels,
                frontier = active.frontier.len(),
                discovered = active.parents.len(),
                "expanded level"
            );

            if let Some(node) = self.matcher.find_common(&active.frontier, &other.parents) {
                break Some(node);
            }
        };

        self.stats = SearchStats {
            root_side_levels: from_root.levels,
            target_side_levels: from_target.levels,
            nodes_discovered: from_root.parents.len() + from_target.parents.len(),
            meeting: meeting.map(|m| self.graph.external(m)),
        };

        match meeting {
            Some(node) => {
                let path = join_at(node, &from_root.parents, &from_target.parents);
                debug!(
                    root,
                    target,
                    hops = path.hops(),
                    levels = self.stats.levels_expanded(),
                    discovered = self.stats.nodes_discovered,
                    "bidirectional path found"
                );
                Ok(SearchResult::Found(path.to_external(self.graph)))
            }
            None => {
                debug!(
                    root,
                    target,
                    levels = self.stats.levels_expanded(),
                    discovered = self.stats.nodes_discovered,
                    "bidirectional search exhausted"
                );
                Ok(SearchResult::NotFound)
            }
        }
    }
}

/// Shortest path between two external ids using bidirectional BFS with the
/// default hash matcher.
pub fn shortest_path<G: Adjacency + ?Sized>(
    graph: &G,
    root: NodeId,
    target: NodeId,
) -> Result<SearchResult, SearchError> {
    BidirectionalSearch::new(graph, MatchStrategy::Hash)?.shortest_path(root, target)
}
