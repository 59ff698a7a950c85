//! plexgraph
//!
//! In-memory attributed graphs with weighted shortest paths.
//!
//! # Overview
//!
//! - Four graph flavours: [`Graph`], [`DiGraph`], [`MultiGraph`] and
//!   [`MultiDiGraph`], all built on one generic [`graph::Network`]
//! - Attribute dictionaries on the graph, on nodes and on edges. An edge's
//!   dictionary is shared by both sides of the adjacency, so a write through
//!   either endpoint is seen from the other
//! - Read-only mapping views (`adj()`, `succ()`, `pred()`) and non-copying
//!   graph views (`subgraph`, `edge_subgraph`, `reverse_view`,
//!   `undirected_view`)
//! - Shortest paths: the Dijkstra family, bidirectional Dijkstra,
//!   Bellman-Ford, Goldberg-Radzik, negative cycle detection and Johnson.
//!   The searches live in the `plexgraph-algorithms` crate; [`algo`] adapts
//!   graphs and weight specifications to it
//! - Binary operators and node relabeling
//!
//! ## Example Usage
//!
//! ```rust
//! use plexgraph::prelude::*;
//! use plexgraph::algo::{dijkstra_path, dijkstra_path_length};
//!
//! let mut g: Graph<&str> = Graph::new();
//! g.add_edge_with("a", "b", attrs([("weight", 2)]));
//! g.add_edge_with("b", "c", attrs([("weight", 3)]));
//! g.add_edge_with("a", "c", attrs([("weight", 9)]));
//!
//! assert_eq!(dijkstra_path(&g, &"a", &"c", "weight").unwrap(), vec!["a", "b", "c"]);
//! assert_eq!(dijkstra_path_length(&g, &"a", &"c", "weight").unwrap(), 5.0);
//!
//! // Edge dictionaries are shared between both endpoints
//! g.adj().get(&"c").unwrap().get(&"b").unwrap().set("weight", 10);
//! assert_eq!(dijkstra_path_length(&g, &"a", &"c", "weight").unwrap(), 9.0);
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod graph;

// Re-export main types for convenience
pub use error::{GraphError, GraphResult};
pub use graph::{
    attrs, AttrDict, AttrMap, AttrValue, DiGraph, EdgeKey, Graph, GraphRef, Mapping, MultiDiGraph, MultiGraph,
    Nbunch, NodeId,
};

/// Everything needed to build and query graphs
pub mod prelude {
    pub use crate::algo::Weight;
    pub use crate::error::{GraphError, GraphResult};
    pub use crate::graph::{
        attrs, AttrDict, AttrMap, AttrValue, DiGraph, EdgeKey, Graph, GraphRef, Mapping, MultiDiGraph,
        MultiGraph, Nbunch,
    };
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
