//! Errors raised by the shortest-path engine

use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("Node {0} not found in graph")]
    NodeNotFound(String),

    #[error("{0}")]
    NoPath(String),

    #[error("Negative cost cycle detected.")]
    NegativeCycle,

    #[error("Contradictory paths found: negative weights?")]
    ContradictoryPaths,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type PathResult<T> = Result<T, PathError>;

pub(crate) fn label<N: Debug>(node: &N) -> String {
    format!("{:?}", node)
}

pub(crate) fn node_not_found<N: Debug>(node: &N) -> PathError {
    PathError::NodeNotFound(label(node))
}
