//! Error taxonomy shared by graph containers, views and algorithms

use plexgraph_algorithms::PathError;
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found in graph")]
    NodeNotFound(String),

    #[error("Edge {0}-{1} not found in graph")]
    EdgeNotFound(String, String),

    #[error("Key {0} not found")]
    KeyNotFound(String),

    #[error("Not implemented for {0} graphs")]
    NotImplementedForGraphType(String),

    #[error("{0}")]
    PointlessConcept(String),

    #[error("Unfeasible: {0}")]
    Unfeasible(String),

    #[error("{0}")]
    NoPath(String),

    #[error("{0}")]
    Unbounded(String),

    #[error("Contradictory paths found: negative weights?")]
    ContradictoryPaths,

    #[error("Graph is not weighted by attribute '{0}'")]
    NotWeighted(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl GraphError {
    /// Node, edge and key lookups that failed
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GraphError::NodeNotFound(_) | GraphError::EdgeNotFound(..) | GraphError::KeyNotFound(_)
        )
    }

    /// Problems with no feasible answer: missing paths and unbounded costs
    pub fn is_unfeasible(&self) -> bool {
        matches!(
            self,
            GraphError::Unfeasible(_) | GraphError::NoPath(_) | GraphError::Unbounded(_)
        )
    }
}

impl From<PathError> for GraphError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::NodeNotFound(n) => GraphError::NodeNotFound(n),
            PathError::NoPath(msg) => GraphError::NoPath(msg),
            PathError::NegativeCycle => {
                GraphError::Unbounded("Negative cost cycle detected.".to_string())
            }
            PathError::ContradictoryPaths => GraphError::ContradictoryPaths,
            PathError::InvalidArgument(msg) => GraphError::InvalidArgument(msg),
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

pub(crate) fn node_not_found<N: std::fmt::Debug>(node: &N) -> GraphError {
    GraphError::NodeNotFound(format!("{:?}", node))
}

pub(crate) fn edge_not_found<N: std::fmt::Debug>(u: &N, v: &N) -> GraphError {
    GraphError::EdgeNotFound(format!("{:?}", u), format!("{:?}", v))
}
