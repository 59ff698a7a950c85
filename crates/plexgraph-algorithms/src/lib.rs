//! Weighted shortest-path engine for plexgraph.
//!
//! The searches here know nothing about attribute dictionaries or graph
//! flavours. They run over any [`WeightedAdjacency`], which the `plexgraph`
//! crate builds from a graph plus a weight function.

pub mod bellman_ford;
pub mod bidirectional;
pub mod common;
pub mod dijkstra;
pub mod error;
pub mod goldberg_radzik;
pub mod johnson;

pub use bellman_ford::{bellman_ford, has_negative_self_loop, negative_edge_cycle, potentials};
pub use bidirectional::bidirectional_dijkstra;
pub use common::{AdjacencyList, EdgeWeight, NodeId, Reweighted, WeightedAdjacency};
pub use dijkstra::{dijkstra_multisource, ShortestPaths};
pub use error::{PathError, PathResult};
pub use goldberg_radzik::{goldberg_radzik, RadzikResult};
pub use johnson::{johnson, JohnsonResult};
