//! Graph containers and views
//!
//! This module implements the attributed graph data model:
//! - Four container flavours over one generic [`Network`]
//! - Shared attribute dictionaries on nodes and edges
//! - Insertion-ordered adjacency storage
//! - Read-only mapping views and non-copying graph views

pub mod attr;
pub mod base;
pub mod filters;
pub mod graphviews;
pub mod multi;
pub mod network;
pub mod simple;
pub mod store;
pub mod types;
pub mod views;

// Re-export main types
pub use attr::{attrs, AttrDict, AttrMap, AttrValue};
pub use base::{EdgeData, GraphRef};
pub use filters::{
    edge_predicate, hide_edges, hide_multiedges, hide_nodes, no_edge_filter, no_filter, node_predicate,
    show_edges, show_multiedges, show_nodes, EdgePredicate, NodePredicate,
};
pub use graphviews::{ReverseView, SubgraphView, UndirectedView};
pub use multi::KeyedEdgeTuple;
pub use network::{DiGraph, Graph, MultiDiGraph, MultiGraph, Network};
pub use simple::EdgeTuple;
pub use store::{Adjacency, AdjacencyStore, Atlas, EdgeKind, FxIndexMap, KeyMap};
pub use types::{Directed, Direction, EdgeKey, Nbunch, NodeId, Undirected};
pub use views::{
    AdjacencyView, AtlasView, FilterAdjacency, FilterAtlas, FilterMultiAdjacency, FilterMultiInner, Mapping,
    MultiAdjacencyView, ToPlain, UnionAdjacency, UnionAtlas, UnionMultiAdjacency, UnionMultiInner,
};
