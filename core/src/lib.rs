//! pathmeet-core: single-pair shortest paths in unweighted, undirected graphs.
//!
//! The primary algorithm is a level-synchronized bidirectional BFS: two
//! parent trees grow from the endpoints, the smaller frontier is expanded
//! one full level at a time, and a pluggable [`FrontierMatcher`] detects
//! where the trees meet. A plain unidirectional BFS is kept as a baseline
//! and correctness oracle.
//!
//! Graphs come in two representations: [`Graph`], keyed by arbitrary external
//! ids, and [`DenseGraph`], which renumbers nodes to contiguous internal
//! indices (required by the bitmap matcher) and translates results back.
//! Searches are synchronous and never mutate the graph.

mod error;
mod graph;
mod matcher;
mod parents;
mod search;

pub use error::SearchError;
pub use graph::{Adjacency, DenseGraph, Graph, NodeId};
pub use matcher::{
    BitmapMatcher, FrontierMatcher, HashMatcher, MatchStrategy, Matcher, ParseStrategyError,
    SortMergeMatcher,
};
pub use parents::{join_at, unwind, Parent, ParentMap, Path, SearchResult};
pub use search::{shortest_path, unidirectional_path, BidirectionalSearch, SearchStats};
