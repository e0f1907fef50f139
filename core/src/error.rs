use thiserror::Error;

use crate::graph::NodeId;

/// Invalid queries. An unreachable target is not an error; it is
/// [`SearchResult::NotFound`](crate::SearchResult::NotFound).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("node {id} is not in the graph")]
    UnknownNode { id: NodeId },

    #[error("bitmap matching needs a graph with contiguous internal indices")]
    DenseIndexRequired,
}
