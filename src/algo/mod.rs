//! Graph algorithms module
//!
//! The shortest-path searches live in the `plexgraph-algorithms` crate,
//! which only sees nodes and numeric edge weights. This module is the
//! adapter layer: it pairs graphs and graph views with a [`Weight`],
//! converts engine errors into [`crate::GraphError`], and
//! adds the container-level operators (union, relabeling, ...).

pub mod operators;
pub mod relabel;
pub mod shortest_paths;
pub mod weight;

pub use operators::{compose, difference, disjoint_union, intersection, symmetric_difference, union};
pub use relabel::{
    convert_node_labels_to_integers, convert_node_labels_to_integers_by, relabel_nodes, relabel_nodes_map,
    LabelOrdering,
};
pub use shortest_paths::*;
pub use weight::{Weight, WeightFn, Weighted};
