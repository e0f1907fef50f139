//! Frontier intersection strategies.
//!
//! After one side of the bidirectional search finishes a level, the engine
//! asks a matcher for any node that is both in the freshly built frontier and
//! in everything the other side has discovered so far. The three matchers
//! return a member of the same intersection and differ only in cost.

use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;
use crate::graph::NodeId;
use crate::parents::ParentMap;

/// Intersection test between a frontier and the other side's discovered set.
pub trait FrontierMatcher {
    /// Any node present in both `frontier` and `other`, or `None`.
    fn find_common(&mut self, frontier: &[NodeId], other: &ParentMap) -> Option<NodeId>;

    /// Whether this matcher can handle ids of a graph with the given
    /// [`dense_bound`](crate::Adjacency::dense_bound).
    fn accepts(&self, _dense_bound: Option<usize>) -> bool {
        true
    }
}

/// Which matcher a [`BidirectionalSearch`](crate::BidirectionalSearch) builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchStrategy {
    /// Probe the other side's parent map per frontier node. Good default for
    /// sparse or general graphs.
    #[default]
    Hash,
    /// Sort scratch copies of both sets and merge.
    SortMerge,
    /// Mark/scan over a boolean buffer indexed by internal id. Needs a
    /// [`DenseGraph`](crate::DenseGraph).
    Bitmap,
}

impl MatchStrategy {
    pub const ALL: [MatchStrategy; 3] = [
        MatchStrategy::Hash,
        MatchStrategy::SortMerge,
        MatchStrategy::Bitmap,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MatchStrategy::Hash => "hash",
            MatchStrategy::SortMerge => "sort-merge",
            MatchStrategy::Bitmap => "bitmap",
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown match strategy '{0}', use 'hash', 'sort-merge' or 'bitmap'")]
pub struct ParseStrategyError(String);

impl FromStr for MatchStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hash" => Ok(MatchStrategy::Hash),
            "sort-merge" | "sortmerge" | "sort" => Ok(MatchStrategy::SortMerge),
            "bitmap" | "dense" => Ok(MatchStrategy::Bitmap),
            other => Err(ParseStrategyError(other.to_string())),
        }
    }
}

/// Hash-membership matcher: O(|frontier|) expected probes into the other
/// side's parent map, which already exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashMatcher;

impl FrontierMatcher for HashMatcher {
    fn find_common(&mut self, frontier: &[NodeId], other: &ParentMap) -> Option<NodeId> {
        frontier.iter().copied().find(|&node| other.contains(node))
    }
}

/// Sort-merge matcher: sorts scratch copies of both sets, then walks two
/// cursors. Returns the smallest common id. The scratch vectors are reused
/// across calls; the parent maps are never reordered.
#[derive(Debug, Clone, Default)]
pub struct SortMergeMatcher {
    left: Vec<NodeId>,
    right: Vec<NodeId>,
}

impl SortMergeMatcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrontierMatcher for SortMergeMatcher {
    fn find_common(&mut self, frontier: &[NodeId], other: &ParentMap) -> Option<NodeId> {
        self.left.clear();
        self.left.extend_from_slice(frontier);
        self.right.clear();
        self.right.extend_from_slice(other.discovered());

        self.left.sort_unstable();
        self.right.sort_unstable();

        let (mut i, mut j) = (0, 0);
        while i < self.left.len() && j < self.right.len() {
            let (a, b) = (self.left[i], self.right[j]);
            if a == b {
                return Some(a);
            } else if a < b {
                i += 1;
            } else {
                j += 1;
            }
        }
        None
    }
}

/// Dense-bitmap matcher over internal indices `0..capacity`.
///
/// Marks the smaller of the two sets, scans the larger for the first marked
/// id, then clears exactly the entries it marked. The buffer is allocated
/// once and stays all-false between calls, so each call costs
/// O(|frontier| + |other|) regardless of graph size.
#[derive(Debug, Clone)]
pub struct BitmapMatcher {
    marks: Vec<bool>,
}

impl BitmapMatcher {
    pub fn new(capacity: usize) -> Self {
        Self {
            marks: vec![false; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.marks.len()
    }

    fn mark(&mut self, ids: &[NodeId], value: bool) {
        for &id in ids {
            if let Some(slot) = self.marks.get_mut(id as usize) {
                *slot = value;
            }
        }
    }

    fn is_marked(&self, id: NodeId) -> bool {
        self.marks.get(id as usize).copied().unwrap_or(false)
    }
}

impl FrontierMatcher for BitmapMatcher {
    fn find_common(&mut self, frontier: &[NodeId], other: &ParentMap) -> Option<NodeId> {
        let discovered = other.discovered();
        let (small, large) = if frontier.len() <= discovered.len() {
            (frontier, discovered)
        } else {
            (discovered, frontier)
        };

        self.mark(small, true);
        let hit = large.iter().copied().find(|&id| self.is_marked(id));
        self.mark(small, false);
        hit
    }

    fn accepts(&self, dense_bound: Option<usize>) -> bool {
        matches!(dense_bound, Some(n) if n <= self.marks.len())
    }
}

/// Static dispatch over the three built-in matchers.
#[derive(Debug, Clone)]
pub enum Matcher {
    Hash(HashMatcher),
    SortMerge(SortMergeMatcher),
    Bitmap(BitmapMatcher),
}

impl Matcher {
    /// Build the matcher for `strategy`, sized for a graph with the given
    /// dense bound. Bitmap matching on a sparse graph is rejected.
    pub fn build(
        strategy: MatchStrategy,
        dense_bound: Option<usize>,
    ) -> Result<Self, SearchError> {
        match strategy {
            MatchStrategy::Hash => Ok(Matcher::Hash(HashMatcher)),
            MatchStrategy::SortMerge => Ok(Matcher::SortMerge(SortMergeMatcher::new())),
            MatchStrategy::Bitmap => dense_bound
                .map(|n| Matcher::Bitmap(BitmapMatcher::new(n)))
                .ok_or(SearchError::DenseIndexRequired),
        }
    }

    pub fn strategy(&self) -> MatchStrategy {
        match self {
            Matcher::Hash(_) => MatchStrategy::Hash,
            Matcher::SortMerge(_) => MatchStrategy::SortMerge,
            Matcher::Bitmap(_) => MatchStrategy::Bitmap,
        }
    }
}

impl FrontierMatcher for Matcher {
    fn find_common(&mut self, frontier: &[NodeId], other: &ParentMap) -> Option<NodeId> {
        match self {
            Matcher::Hash(m) => m.find_common(frontier, other),
            Matcher::SortMerge(m) => m.find_common(frontier, other),
            Matcher::Bitmap(m) => m.find_common(frontier, other),
        }
    }

    fn accepts(&self, dense_bound: Option<usize>) -> bool {
        match self {
            Matcher::Hash(m) => m.accepts(dense_bound),
            Matcher::SortMerge(m) => m.accepts(dense_bound),
            Matcher::Bitmap(m) => m.accepts(dense_bound),
        }
    }
}
