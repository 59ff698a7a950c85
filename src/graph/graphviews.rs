//! Non-copying graph views
//!
//! A graph view borrows a graph and presents a different graph on top of it:
//! a node/edge-filtered subgraph, the reverse of a directed graph, or the
//! undirected version of a directed graph. Views implement [`GraphRef`], so
//! degree queries and the shortest-path functions accept them directly, and
//! every view can be materialized with `to_graph()`.

use super::attr::AttrDict;
use super::base::{EdgeData, GraphRef};
use super::filters::{edge_predicate, node_predicate, show_nodes, EdgePredicate, NodePredicate};
use super::network::Network;
use super::store::{EdgeKind, KeyMap};
use super::types::{Directed, Direction, NodeId, Undirected};
use super::views::{
    AdjacencyView, FilterAdjacency, FilterAtlas, FilterMultiAdjacency, MultiAdjacencyView, UnionAdjacency,
    UnionMultiAdjacency,
};
use indexmap::map::Entry;
use indexmap::IndexMap;

/// Graph restricted to the nodes and edges accepted by two predicates
pub struct SubgraphView<'g, N: NodeId, E: EdgeKind, D: Direction> {
    graph: &'g Network<N, E, D>,
    node_ok: NodePredicate<'g, N>,
    edge_ok: EdgePredicate<'g, N>,
}

impl<'g, N: NodeId, E: EdgeKind, D: Direction> SubgraphView<'g, N, E, D> {
    pub fn new(graph: &'g Network<N, E, D>, node_ok: NodePredicate<'g, N>, edge_ok: EdgePredicate<'g, N>) -> Self {
        Self { graph, node_ok, edge_ok }
    }

    /// Node -> attributes for the visible nodes
    pub fn node_view(&self) -> FilterAtlas<'g, N, AttrDict> {
        FilterAtlas::new(self.graph.store.nodes(), self.node_ok.clone())
    }

    /// Narrow the view further to `nodes`
    pub fn subgraph(&self, nodes: impl IntoIterator<Item = N>) -> SubgraphView<'g, N, E, D> {
        let outer = self.node_ok.clone();
        let keep = show_nodes(nodes);
        SubgraphView {
            graph: self.graph,
            node_ok: node_predicate(move |n: &N| outer(n) && keep(n)),
            edge_ok: self.edge_ok.clone(),
        }
    }

    /// Independent graph holding the visible nodes and edges
    pub fn to_graph(&self) -> Network<N, E, D> {
        Network::from_graph_ref(self, self.graph.graph_attrs().clone(), |_, _| true)
    }
}

impl<'g, N: NodeId, D: Direction> SubgraphView<'g, N, AttrDict, D> {
    pub fn adj(&self) -> FilterAdjacency<'g, N> {
        FilterAdjacency::new(self.graph.store.succ(), self.node_ok.clone(), self.edge_ok.clone())
    }
}

impl<'g, N: NodeId, D: Direction> SubgraphView<'g, N, KeyMap, D> {
    pub fn adj(&self) -> FilterMultiAdjacency<'g, N> {
        FilterMultiAdjacency::new(self.graph.store.succ(), self.node_ok.clone(), self.edge_ok.clone())
    }
}

impl<'g, N: NodeId> SubgraphView<'g, N, AttrDict, Directed> {
    pub fn succ(&self) -> FilterAdjacency<'g, N> {
        self.adj()
    }

    pub fn pred(&self) -> FilterAdjacency<'g, N> {
        FilterAdjacency::new(self.graph.store.pred(), self.node_ok.clone(), flipped(&self.edge_ok))
    }
}

impl<'g, N: NodeId> SubgraphView<'g, N, KeyMap, Directed> {
    pub fn succ(&self) -> FilterMultiAdjacency<'g, N> {
        self.adj()
    }

    pub fn pred(&self) -> FilterMultiAdjacency<'g, N> {
        FilterMultiAdjacency::new(self.graph.store.pred(), self.node_ok.clone(), flipped(&self.edge_ok))
    }
}

/// Predecessor maps are keyed `v -> u`; the predicate expects `(u, v)`
fn flipped<'g, N: NodeId + 'g>(edge_ok: &EdgePredicate<'g, N>) -> EdgePredicate<'g, N> {
    let edge_ok = edge_ok.clone();
    edge_predicate(move |v: &N, u: &N, key| edge_ok(u, v, key))
}

impl<'g, N: NodeId, E: EdgeKind, D: Direction> GraphRef for SubgraphView<'g, N, E, D> {
    type Node = N;

    fn is_directed(&self) -> bool {
        D::DIRECTED
    }

    fn is_multigraph(&self) -> bool {
        E::MULTI
    }

    fn has_node(&self, node: &N) -> bool {
        self.graph.has_node(node) && (self.node_ok)(node)
    }

    fn node_ids(&self) -> Vec<N> {
        self.graph.nodes().filter(|n| (self.node_ok)(n)).cloned().collect()
    }

    fn node_attrs(&self, node: &N) -> Option<&AttrDict> {
        if (self.node_ok)(node) {
            self.graph.node_attrs(node)
        } else {
            None
        }
    }

    fn out_edges(&self, node: &N) -> Vec<(N, EdgeData<'_>)> {
        if !self.has_node(node) {
            return Vec::new();
        }
        self.graph
            .out_edges(node)
            .into_iter()
            .filter(|(v, _)| (self.node_ok)(v))
            .filter_map(|(v, data)| {
                let kept = data.retain(|key| (self.edge_ok)(node, &v, key))?;
                Some((v, kept))
            })
            .collect()
    }

    fn in_edges(&self, node: &N) -> Vec<(N, EdgeData<'_>)> {
        if !self.has_node(node) {
            return Vec::new();
        }
        self.graph
            .in_edges(node)
            .into_iter()
            .filter(|(u, _)| (self.node_ok)(u))
            .filter_map(|(u, data)| {
                let kept = data.retain(|key| (self.edge_ok)(&u, node, key))?;
                Some((u, kept))
            })
            .collect()
    }
}

/// Directed graph with every edge pointing the other way
pub struct ReverseView<'g, N: NodeId, E: EdgeKind> {
    graph: &'g Network<N, E, Directed>,
}

impl<'g, N: NodeId, E: EdgeKind> ReverseView<'g, N, E> {
    pub fn new(graph: &'g Network<N, E, Directed>) -> Self {
        Self { graph }
    }

    pub fn to_graph(&self) -> Network<N, E, Directed> {
        self.graph.reverse()
    }
}

impl<'g, N: NodeId> ReverseView<'g, N, AttrDict> {
    pub fn succ(&self) -> AdjacencyView<'g, N, N, AttrDict> {
        AdjacencyView::new(self.graph.store.pred())
    }

    pub fn pred(&self) -> AdjacencyView<'g, N, N, AttrDict> {
        AdjacencyView::new(self.graph.store.succ())
    }
}

impl<'g, N: NodeId> ReverseView<'g, N, KeyMap> {
    pub fn succ(&self) -> MultiAdjacencyView<'g, N> {
        MultiAdjacencyView::new(self.graph.store.pred())
    }

    pub fn pred(&self) -> MultiAdjacencyView<'g, N> {
        MultiAdjacencyView::new(self.graph.store.succ())
    }
}

impl<'g, N: NodeId, E: EdgeKind> GraphRef for ReverseView<'g, N, E> {
    type Node = N;

    fn is_directed(&self) -> bool {
        true
    }

    fn is_multigraph(&self) -> bool {
        E::MULTI
    }

    fn has_node(&self, node: &N) -> bool {
        self.graph.has_node(node)
    }

    fn node_ids(&self) -> Vec<N> {
        self.graph.node_ids()
    }

    fn node_attrs(&self, node: &N) -> Option<&AttrDict> {
        self.graph.node_attrs(node)
    }

    fn number_of_nodes(&self) -> usize {
        self.graph.number_of_nodes()
    }

    fn out_edges(&self, node: &N) -> Vec<(N, EdgeData<'_>)> {
        self.graph.in_edges(node)
    }

    fn in_edges(&self, node: &N) -> Vec<(N, EdgeData<'_>)> {
        self.graph.out_edges(node)
    }

    fn number_of_edges(&self) -> usize {
        self.graph.size()
    }
}

/// Directed graph seen without orientation.
///
/// The neighbors of a node are its successors followed by predecessors not
/// already listed. When both `u -> v` and `v -> u` exist the successor edge
/// is shown; for multigraphs the keys of both directions are joined.
pub struct UndirectedView<'g, N: NodeId, E: EdgeKind> {
    graph: &'g Network<N, E, Directed>,
}

impl<'g, N: NodeId, E: EdgeKind> UndirectedView<'g, N, E> {
    pub fn new(graph: &'g Network<N, E, Directed>) -> Self {
        Self { graph }
    }

    pub fn to_graph(&self) -> Network<N, E, Undirected> {
        self.graph.to_undirected(false)
    }
}

impl<'g, N: NodeId> UndirectedView<'g, N, AttrDict> {
    pub fn adj(&self) -> UnionAdjacency<'g, N> {
        UnionAdjacency::new(self.graph.store.succ(), self.graph.store.pred())
    }
}

impl<'g, N: NodeId> UndirectedView<'g, N, KeyMap> {
    pub fn adj(&self) -> UnionMultiAdjacency<'g, N> {
        UnionMultiAdjacency::new(self.graph.store.succ(), self.graph.store.pred())
    }
}

impl<'g, N: NodeId, E: EdgeKind> GraphRef for UndirectedView<'g, N, E> {
    type Node = N;

    fn is_directed(&self) -> bool {
        false
    }

    fn is_multigraph(&self) -> bool {
        E::MULTI
    }

    fn has_node(&self, node: &N) -> bool {
        self.graph.has_node(node)
    }

    fn node_ids(&self) -> Vec<N> {
        self.graph.node_ids()
    }

    fn node_attrs(&self, node: &N) -> Option<&AttrDict> {
        self.graph.node_attrs(node)
    }

    fn number_of_nodes(&self) -> usize {
        self.graph.number_of_nodes()
    }

    fn out_edges(&self, node: &N) -> Vec<(N, EdgeData<'_>)> {
        let mut merged: IndexMap<N, EdgeData<'_>> = self.graph.out_edges(node).into_iter().collect();
        for (u, data) in self.graph.in_edges(node) {
            match merged.entry(u) {
                Entry::Occupied(mut slot) => {
                    let joined = slot.get().clone().merge(data);
                    *slot.get_mut() = joined;
                }
                Entry::Vacant(slot) => {
                    slot.insert(data);
                }
            }
        }
        merged.into_iter().collect()
    }

    fn in_edges(&self, node: &N) -> Vec<(N, EdgeData<'_>)> {
        self.out_edges(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::attr::attrs;
    use crate::graph::filters::{hide_nodes, no_edge_filter};
    use crate::graph::network::{DiGraph, Graph, MultiDiGraph};
    use crate::graph::views::Mapping;

    fn path(n: u32) -> Graph<u32> {
        let mut g = Graph::new();
        g.add_edges_from((0..n - 1).map(|i| (i, i + 1)));
        g
    }

    #[test]
    fn test_subgraph_is_live() {
        let mut g = path(5);
        {
            let sub = g.subgraph(vec![1, 2, 3]);
            assert_eq!(sub.number_of_nodes(), 3);
            assert_eq!(sub.number_of_edges(), 2);
            assert!(!sub.has_node(&0));
            assert_eq!(sub.degree(&1), Ok(1));
            assert!(sub.degree(&0).unwrap_err().is_not_found());
        }
        g.add_edge(1, 3);
        let sub = g.subgraph(vec![1, 2, 3]);
        assert_eq!(sub.number_of_edges(), 3);
    }

    #[test]
    fn test_subgraph_adj_and_node_view() {
        let mut g = path(4);
        g.add_node_with(2, attrs([("color", "blue")]));
        let sub = g.subgraph(vec![0, 1, 2]);
        let adj = sub.adj();
        assert_eq!(adj.len(), 3);
        assert_eq!(adj.get(&2).unwrap().keys().copied().collect::<Vec<_>>(), vec![1]);
        assert!(adj.get(&3).is_none());
        let nodes = sub.node_view();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes.get(&2).unwrap().get("color"), Some("blue".into()));
    }

    #[test]
    fn test_nested_subgraph_intersects() {
        let g = path(5);
        let sub = g.subgraph(vec![0, 1, 2, 3]);
        let inner = sub.subgraph(vec![2, 3, 4]);
        assert_eq!(inner.node_ids(), vec![2, 3]);
        assert_eq!(inner.number_of_edges(), 1);
    }

    #[test]
    fn test_subgraph_to_graph_copies() {
        let mut g = path(4);
        g.add_edge_with(1, 2, attrs([("weight", 7)]));
        let h = g.subgraph(vec![1, 2]).to_graph();
        assert_eq!(h.number_of_nodes(), 2);
        assert_eq!(h.edges(), vec![(1, 2)]);
        h.edge_attrs(&1, &2).unwrap().set("weight", 0);
        assert_eq!(g.edge_attrs(&1, &2).unwrap().get_number("weight"), Some(7.0));
    }

    #[test]
    fn test_directed_subgraph_pred() {
        let mut g: DiGraph<u32> = DiGraph::new();
        g.add_edges_from(vec![(0, 1), (2, 1), (1, 3)]);
        let sub = SubgraphView::new(&g, hide_nodes(vec![2]), no_edge_filter());
        let pred = sub.pred();
        assert_eq!(pred.get(&1).unwrap().keys().copied().collect::<Vec<_>>(), vec![0]);
        assert_eq!(sub.in_degree(&1), Ok(1));
        assert_eq!(sub.succ().get(&1).unwrap().len(), 1);
    }

    #[test]
    fn test_reverse_view() {
        let mut g: DiGraph<&str> = DiGraph::new();
        g.add_edge_with("a", "b", attrs([("w", 2)]));
        let rev = g.reverse_view();
        assert_eq!(rev.out_degree(&"b"), Ok(1));
        assert_eq!(rev.out_degree(&"a"), Ok(0));
        assert!(rev.succ().get(&"b").unwrap().contains_key(&"a"));
        let dict = rev.succ().get(&"b").unwrap().get(&"a").unwrap();
        assert!(dict.ptr_eq(g.edge_attrs(&"a", &"b").unwrap()));
        let owned = rev.to_graph();
        assert!(owned.has_edge(&"b", &"a"));
        assert!(!owned.has_edge(&"a", &"b"));
    }

    #[test]
    fn test_undirected_view_joins_directions() {
        let mut g: DiGraph<u32> = DiGraph::new();
        g.add_edge_with(1, 2, attrs([("side", "out")]));
        g.add_edge_with(2, 1, attrs([("side", "in")]));
        g.add_edge(3, 1);
        let und = g.undirected_view();
        assert!(!und.is_directed());
        assert_eq!(und.neighbor_ids(&1), Ok(vec![2, 3]));
        assert_eq!(und.number_of_edges(), 2);
        assert_eq!(und.degree(&1), Ok(2));
        assert!(und.in_degree(&1).is_err());

        let adj = und.adj();
        let around_one = adj.get(&1).unwrap();
        assert_eq!(around_one.len(), 2);
        assert_eq!(around_one.get(&2).unwrap().get("side"), Some("out".into()));
        assert_eq!(und.to_graph().number_of_edges(), 2);
    }

    #[test]
    fn test_undirected_view_multi_keys_union() {
        let mut g: MultiDiGraph<u32> = MultiDiGraph::new();
        g.add_edge(1, 2);
        g.add_edge(1, 2);
        g.add_edge(2, 1);
        let und = g.undirected_view();
        assert_eq!(und.degree(&1), Ok(2));
        assert_eq!(und.adj().get(&1).unwrap().get(&2).unwrap().len(), 2);
    }
}
