//! Node relabeling
//!
//! Relabeling always builds a new graph. Nodes that map to the same new
//! label are merged: their attributes are combined in node order and their
//! edges are unioned.

use crate::graph::{AttrDict, Direction, EdgeKind, GraphRef, Network, NodeId};
use indexmap::{IndexMap, IndexSet};

/// Order in which [`convert_node_labels_to_integers_by`] numbers nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelOrdering {
    /// Node insertion order
    #[default]
    Default,
    IncreasingDegree,
    DecreasingDegree,
}

/// Copy of `graph` with every node `n` renamed to `mapping(n)`.
///
/// Graph-level attributes are carried over unchanged. On a multigraph,
/// parallel edges keep their keys; if two merged nodes contribute edges
/// under the same key, the attributes are merged into one edge.
pub fn relabel_nodes<N, M, E, D, F>(graph: &Network<N, E, D>, mapping: F) -> Network<M, E, D>
where
    N: NodeId,
    M: NodeId,
    E: EdgeKind,
    D: Direction,
    F: Fn(&N) -> M,
{
    let mut out = Network::with_attrs(graph.graph_attrs().clone());
    for (node, attrs) in graph.nodes_data() {
        out.add_node_with(mapping(node), attrs.snapshot());
    }
    relabel_edges_into(&mut out, graph, mapping);
    out
}

/// Copy of `graph` with the nodes named in `mapping` renamed; other nodes
/// keep their labels
pub fn relabel_nodes_map<N, E, D>(graph: &Network<N, E, D>, mapping: &IndexMap<N, N>) -> Network<N, E, D>
where
    N: NodeId,
    E: EdgeKind,
    D: Direction,
{
    relabel_nodes(graph, |n| mapping.get(n).cloned().unwrap_or_else(|| n.clone()))
}

/// Copy of `graph` with nodes numbered `first_label, first_label + 1, ...`
/// in insertion order
pub fn convert_node_labels_to_integers<N, E, D>(graph: &Network<N, E, D>, first_label: usize) -> Network<usize, E, D>
where
    N: NodeId,
    E: EdgeKind,
    D: Direction,
{
    convert_node_labels_to_integers_by(graph, first_label, LabelOrdering::Default)
}

/// Like [`convert_node_labels_to_integers`], numbering in `ordering`.
/// Degree orderings are stable: equal degrees keep insertion order.
pub fn convert_node_labels_to_integers_by<N, E, D>(
    graph: &Network<N, E, D>,
    first_label: usize,
    ordering: LabelOrdering,
) -> Network<usize, E, D>
where
    N: NodeId,
    E: EdgeKind,
    D: Direction,
{
    let mut nodes = graph.node_ids();
    match ordering {
        LabelOrdering::Default => {}
        LabelOrdering::IncreasingDegree => {
            nodes.sort_by_key(|n| GraphRef::degree(graph, n).unwrap_or(0));
        }
        LabelOrdering::DecreasingDegree => {
            nodes.sort_by_key(|n| std::cmp::Reverse(GraphRef::degree(graph, n).unwrap_or(0)));
        }
    }
    let order: IndexSet<N> = nodes.into_iter().collect();

    let mut out = Network::with_attrs(graph.graph_attrs().clone());
    for (i, node) in order.iter().enumerate() {
        let attrs = graph.node_attrs(node).map(AttrDict::snapshot).unwrap_or_default();
        out.add_node_with(first_label + i, attrs);
    }
    let label = |n: &N| order.get_index_of(n).map_or(first_label, |i| first_label + i);
    relabel_edges_into(&mut out, graph, label);
    out
}

fn relabel_edges_into<N, M, E, D>(out: &mut Network<M, E, D>, graph: &Network<N, E, D>, label: impl Fn(&N) -> M)
where
    N: NodeId,
    M: NodeId,
    E: EdgeKind,
    D: Direction,
{
    for (u, v, data) in graph.edge_entries() {
        out.absorb_edge(label(&u), label(&v), &data);
    }
}
