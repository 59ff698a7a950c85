//! Core type definitions for the graph containers

use serde::{Deserialize, Serialize};
use std::fmt;

pub use plexgraph_algorithms::NodeId;

/// Key distinguishing parallel edges between the same pair of nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeKey(pub u64);

impl EdgeKey {
    /// Wrap a raw key
    pub fn new(key: u64) -> Self {
        EdgeKey(key)
    }

    /// The raw key value
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The key following this one, or `None` past `u64::MAX`
    pub fn checked_next(self) -> Option<Self> {
        self.0.checked_add(1).map(EdgeKey)
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EdgeKey {
    fn from(key: u64) -> Self {
        EdgeKey(key)
    }
}

/// Compile-time edge orientation of a graph
pub trait Direction: Copy + Default + fmt::Debug + 'static {
    const DIRECTED: bool;
}

/// Edges run from source to target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directed;

/// Edges have no orientation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Undirected;

impl Direction for Directed {
    const DIRECTED: bool = true;
}

impl Direction for Undirected {
    const DIRECTED: bool = false;
}

/// Selection of nodes handed to bulk queries.
///
/// `All` selects every node, `One` a single node that must exist, and `Many`
/// the listed nodes that exist (others are skipped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nbunch<N> {
    All,
    One(N),
    Many(Vec<N>),
}

impl<N> From<Vec<N>> for Nbunch<N> {
    fn from(nodes: Vec<N>) -> Self {
        Nbunch::Many(nodes)
    }
}
