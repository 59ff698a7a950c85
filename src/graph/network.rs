//! Graph containers
//!
//! [`Network`] is one container parameterised by node type, edge slot kind
//! and direction. The four familiar flavours are aliases:
//!
//! | alias            | edges per pair | direction  |
//! |------------------|----------------|------------|
//! | [`Graph`]        | one            | undirected |
//! | [`DiGraph`]      | one            | directed   |
//! | [`MultiGraph`]   | many, keyed    | undirected |
//! | [`MultiDiGraph`] | many, keyed    | directed   |
//!
//! Operations common to all flavours live here; edge insertion and removal
//! differ between simple and multigraphs and live in `simple.rs` and
//! `multi.rs`.

use super::attr::{AttrDict, AttrMap, AttrValue};
use super::base::{EdgeData, GraphRef};
use super::filters::{no_edge_filter, show_nodes};
use super::graphviews::{ReverseView, SubgraphView, UndirectedView};
use super::store::{adjacency_entries, AdjacencyStore, EdgeKind, KeyMap};
use super::types::{Directed, Direction, EdgeKey, NodeId, Undirected};
use super::views::AtlasView;
use crate::error::{node_not_found, GraphResult};
use std::fmt;
use std::marker::PhantomData;

/// Attributed graph container
pub struct Network<N: NodeId, E: EdgeKind, D: Direction> {
    graph: AttrMap,
    pub(crate) store: AdjacencyStore<N, E>,
    _direction: PhantomData<D>,
}

/// Undirected graph with at most one edge per node pair
pub type Graph<N> = Network<N, AttrDict, Undirected>;

/// Directed graph with at most one edge per ordered pair
pub type DiGraph<N> = Network<N, AttrDict, Directed>;

/// Undirected graph allowing parallel edges
pub type MultiGraph<N> = Network<N, KeyMap, Undirected>;

/// Directed graph allowing parallel edges
pub type MultiDiGraph<N> = Network<N, KeyMap, Directed>;

impl<N: NodeId, E: EdgeKind, D: Direction> Network<N, E, D> {
    /// Empty graph
    pub fn new() -> Self {
        Self::with_attrs(AttrMap::new())
    }

    /// Empty graph carrying the given graph-level attributes
    pub fn with_attrs(graph: AttrMap) -> Self {
        Self {
            graph,
            store: AdjacencyStore::new(D::DIRECTED),
            _direction: PhantomData,
        }
    }

    pub const fn is_directed(&self) -> bool {
        D::DIRECTED
    }

    pub const fn is_multigraph(&self) -> bool {
        E::MULTI
    }

    /// The `name` graph attribute, if it is a string
    pub fn name(&self) -> Option<&str> {
        self.graph.get("name").and_then(AttrValue::as_string)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.graph
            .insert("name".to_string(), AttrValue::String(name.into()));
    }

    /// Graph-level attributes
    pub fn graph_attrs(&self) -> &AttrMap {
        &self.graph
    }

    pub fn graph_attrs_mut(&mut self) -> &mut AttrMap {
        &mut self.graph
    }

    /// Add `node` if absent; an existing node keeps its attributes
    pub fn add_node(&mut self, node: N) {
        self.store.add_node(node);
    }

    /// Add `node` if absent and merge `attrs` into its attributes
    pub fn add_node_with(&mut self, node: N, attrs: AttrMap) {
        self.store.add_node(node).update(attrs);
    }

    pub fn add_nodes_from(&mut self, nodes: impl IntoIterator<Item = N>) {
        for node in nodes {
            self.store.add_node(node);
        }
    }

    pub fn add_nodes_with_from(&mut self, nodes: impl IntoIterator<Item = (N, AttrMap)>) {
        for (node, attrs) in nodes {
            self.add_node_with(node, attrs);
        }
    }

    /// Remove `node` and all its incident edges
    pub fn remove_node(&mut self, node: &N) -> GraphResult<()> {
        self.store.remove_node(node).map(|_| ())
    }

    /// Remove each listed node; absent nodes are skipped
    pub fn remove_nodes_from(&mut self, nodes: impl IntoIterator<Item = N>) {
        for node in nodes {
            if self.store.contains(&node) {
                self.store.remove_node(&node).ok();
            }
        }
    }

    pub fn has_node(&self, node: &N) -> bool {
        self.store.contains(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.store.nodes().keys()
    }

    pub fn nodes_data(&self) -> impl Iterator<Item = (&N, &AttrDict)> + '_ {
        self.store.nodes().iter()
    }

    pub fn node_attrs(&self, node: &N) -> Option<&AttrDict> {
        self.store.nodes().get(node)
    }

    /// Node -> attribute dictionary, read-only
    pub fn node_view(&self) -> AtlasView<'_, N, AttrDict> {
        AtlasView::new(self.store.nodes())
    }

    pub fn number_of_nodes(&self) -> usize {
        self.store.len()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Remove every node, edge and graph attribute
    pub fn clear(&mut self) {
        self.graph.clear();
        self.store.clear();
    }

    /// Remove every edge, keeping nodes and attributes
    pub fn clear_edges(&mut self) {
        self.store.clear_edges();
    }

    /// Number of edges, parallel edges counted separately
    pub fn size(&self) -> usize {
        self.store.edge_count()
    }

    pub fn has_edge(&self, u: &N, v: &N) -> bool {
        self.store.entry(u, v).is_some()
    }

    /// Neighbors of `node`; successors for directed graphs
    pub fn neighbors(&self, node: &N) -> GraphResult<impl Iterator<Item = &N> + '_> {
        self.store
            .succ()
            .get(node)
            .map(|nbrs| nbrs.keys())
            .ok_or_else(|| node_not_found(node))
    }

    /// Independent copy: no attribute dictionary is shared with `self`
    pub fn copy(&self) -> Self {
        Self::from_graph_ref(self, self.graph.clone(), |_, _| true)
    }

    /// Read-only view induced by `nodes`
    pub fn subgraph(&self, nodes: impl IntoIterator<Item = N>) -> SubgraphView<'_, N, E, D> {
        SubgraphView::new(self, show_nodes(nodes), no_edge_filter())
    }

    /// Directed copy; each undirected edge becomes two independent edges
    pub fn to_directed(&self) -> Network<N, E, Directed> {
        Network::from_graph_ref(self, self.graph.clone(), |_, _| true)
    }

    /// Undirected copy.
    ///
    /// With `reciprocal`, a directed edge is kept only when its reverse also
    /// exists. When both directions exist their attributes are merged.
    pub fn to_undirected(&self, reciprocal: bool) -> Network<N, E, Undirected> {
        let strict = reciprocal && D::DIRECTED;
        Network::from_graph_ref(self, self.graph.clone(), |u, v| !strict || self.has_edge(v, u))
    }

    /// Materialize any graph or view into a new container.
    ///
    /// Node and edge attributes are copied; every edge `u -> v` accepted by
    /// `keep` is merged into the result.
    pub(crate) fn from_graph_ref<G>(source: &G, graph: AttrMap, keep: impl Fn(&N, &N) -> bool) -> Self
    where
        G: GraphRef<Node = N>,
    {
        let mut out = Self::with_attrs(graph);
        let nodes = source.node_ids();
        for node in &nodes {
            let attrs = source
                .node_attrs(node)
                .map(AttrDict::snapshot)
                .unwrap_or_default();
            out.add_node_with(node.clone(), attrs);
        }
        for u in &nodes {
            for (v, data) in source.out_edges(u) {
                if keep(u, &v) {
                    out.absorb_edge(u.clone(), v, &data);
                }
            }
        }
        out
    }

    /// Merge a copy of `data` in as the `u -> v` edge(s)
    pub(crate) fn absorb_edge(&mut self, u: N, v: N, data: &EdgeData<'_>) {
        E::absorb(&mut self.store, u, v, data);
    }

    pub(crate) fn add_bare_edge(&mut self, u: N, v: N, key: Option<EdgeKey>) {
        E::link_bare(&mut self.store, u, v, key);
    }

    pub(crate) fn has_edge_slot(&self, u: &N, v: &N, key: Option<&EdgeKey>) -> bool {
        self.store.entry(u, v).is_some_and(|slot| slot.has_key(key))
    }
}

impl<N: NodeId, E: EdgeKind> Network<N, E, Directed> {
    pub fn successors(&self, node: &N) -> GraphResult<impl Iterator<Item = &N> + '_> {
        self.neighbors(node)
    }

    pub fn predecessors(&self, node: &N) -> GraphResult<impl Iterator<Item = &N> + '_> {
        self.store
            .pred()
            .get(node)
            .map(|nbrs| nbrs.keys())
            .ok_or_else(|| node_not_found(node))
    }

    /// Copy with every edge reversed
    pub fn reverse(&self) -> Self {
        Self::from_graph_ref(&self.reverse_view(), self.graph.clone(), |_, _| true)
    }

    /// Read-only view with every edge reversed
    pub fn reverse_view(&self) -> ReverseView<'_, N, E> {
        ReverseView::new(self)
    }

    /// Read-only undirected view joining successors and predecessors
    pub fn undirected_view(&self) -> UndirectedView<'_, N, E> {
        UndirectedView::new(self)
    }
}

impl<N: NodeId, E: EdgeKind, D: Direction> GraphRef for Network<N, E, D> {
    type Node = N;

    fn is_directed(&self) -> bool {
        D::DIRECTED
    }

    fn is_multigraph(&self) -> bool {
        E::MULTI
    }

    fn has_node(&self, node: &N) -> bool {
        self.store.contains(node)
    }

    fn node_ids(&self) -> Vec<N> {
        self.store.nodes().keys().cloned().collect()
    }

    fn node_attrs(&self, node: &N) -> Option<&AttrDict> {
        self.store.nodes().get(node)
    }

    fn number_of_nodes(&self) -> usize {
        self.store.len()
    }

    fn out_edges(&self, node: &N) -> Vec<(N, EdgeData<'_>)> {
        adjacency_entries(self.store.succ(), node)
    }

    fn in_edges(&self, node: &N) -> Vec<(N, EdgeData<'_>)> {
        adjacency_entries(self.store.pred(), node)
    }

    fn number_of_edges(&self) -> usize {
        self.store.edge_count()
    }
}

impl<N: NodeId, E: EdgeKind, D: Direction> Default for Network<N, E, D> {
    fn default() -> Self {
        Self::new()
    }
}

/// Deep copy, same as [`Network::copy`]
impl<N: NodeId, E: EdgeKind, D: Direction> Clone for Network<N, E, D> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<N: NodeId, E: EdgeKind, D: Direction> fmt::Debug for Network<N, E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Network")
            .field("directed", &D::DIRECTED)
            .field("multigraph", &E::MULTI)
            .field("graph", &self.graph)
            .field("store", &self.store)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::attr::attrs;
    use crate::graph::types::Nbunch;
    use crate::error::GraphError;

    #[test]
    fn test_capabilities() {
        let g: Graph<u32> = Graph::new();
        let d: DiGraph<u32> = DiGraph::new();
        let m: MultiGraph<u32> = MultiGraph::new();
        let md: MultiDiGraph<u32> = MultiDiGraph::new();
        assert!(!g.is_directed() && !g.is_multigraph());
        assert!(d.is_directed() && !d.is_multigraph());
        assert!(!m.is_directed() && m.is_multigraph());
        assert!(md.is_directed() && md.is_multigraph());
    }

    #[test]
    fn test_node_insertion_order_and_attrs() {
        let mut g: Graph<&str> = Graph::new();
        g.add_node_with("b", attrs([("color", "red")]));
        g.add_nodes_from(vec!["a", "c", "b"]);
        g.add_node_with("b", attrs([("size", 3)]));

        assert_eq!(g.nodes().copied().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        let b = g.node_attrs(&"b").unwrap();
        assert_eq!(b.len(), 2);
        assert_eq!(b.get("color"), Some("red".into()));
    }

    #[test]
    fn test_remove_node_errors_when_missing() {
        let mut g: DiGraph<u32> = DiGraph::new();
        g.add_edge(1, 2);
        assert_eq!(g.remove_node(&7), Err(GraphError::NodeNotFound("7".to_string())));
        g.remove_nodes_from(vec![7, 1]);
        assert_eq!(g.number_of_nodes(), 1);
        assert_eq!(g.number_of_edges(), 0);
    }

    #[test]
    fn test_name_and_graph_attrs() {
        let mut g: MultiDiGraph<u32> = MultiDiGraph::new();
        assert_eq!(g.name(), None);
        g.set_name("roads");
        g.graph_attrs_mut().insert("year".to_string(), 2024.into());
        assert_eq!(g.name(), Some("roads"));
        assert_eq!(g.copy().graph_attrs().len(), 2);
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.name(), None);
    }

    #[test]
    fn test_copy_does_not_alias() {
        let mut g: Graph<u32> = Graph::new();
        g.add_edge_with(1, 2, attrs([("weight", 1)]));
        g.add_node_with(3, attrs([("tag", "x")]));

        let h = g.copy();
        h.edge_attrs(&1, &2).unwrap().set("weight", 50);
        h.node_attrs(&3).unwrap().set("tag", "y");

        assert_eq!(g.edge_attrs(&1, &2).unwrap().get_number("weight"), Some(1.0));
        assert_eq!(g.node_attrs(&3).unwrap().get("tag"), Some("x".into()));
        assert!(!g.edge_attrs(&1, &2).unwrap().ptr_eq(h.edge_attrs(&1, &2).unwrap()));
    }

    #[test]
    fn test_to_directed_splits_edges() {
        let mut g: Graph<u32> = Graph::new();
        g.add_edge_with(1, 2, attrs([("weight", 4)]));
        g.add_edge(2, 2);

        let d = g.to_directed();
        assert_eq!(d.number_of_edges(), 3);
        let forward = d.edge_attrs(&1, &2).unwrap();
        let backward = d.edge_attrs(&2, &1).unwrap();
        assert!(!forward.ptr_eq(backward));
        assert_eq!(backward.get_number("weight"), Some(4.0));
    }

    #[test]
    fn test_to_undirected_reciprocal() {
        let mut d: DiGraph<u32> = DiGraph::new();
        d.add_edge_with(1, 2, attrs([("a", 1)]));
        d.add_edge_with(2, 1, attrs([("b", 2)]));
        d.add_edge(2, 3);

        let all = d.to_undirected(false);
        assert_eq!(all.number_of_edges(), 2);
        assert_eq!(all.edge_attrs(&1, &2).unwrap().len(), 2);

        let mutual = d.to_undirected(true);
        assert_eq!(mutual.number_of_edges(), 1);
        assert!(mutual.has_node(&3));
        assert!(!mutual.has_edge(&2, &3));
    }

    #[test]
    fn test_reverse() {
        let mut d: MultiDiGraph<&str> = MultiDiGraph::new();
        d.add_edge("a", "b");
        d.add_edge("a", "b");
        let r = d.reverse();
        assert_eq!(r.number_of_edges_between(&"b", &"a"), 2);
        assert!(!r.has_edge(&"a", &"b"));
        assert_eq!(r.predecessors(&"a").unwrap().count(), 1);
    }

    #[test]
    fn test_neighbors_and_degrees() {
        let mut d: DiGraph<u32> = DiGraph::new();
        d.add_edges_from(vec![(1, 2), (1, 3), (3, 1)]);
        assert_eq!(d.neighbors(&1).unwrap().copied().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(d.predecessors(&1).unwrap().copied().collect::<Vec<_>>(), vec![3]);
        assert_eq!(d.degree(&1), Ok(3));
        assert_eq!(d.in_degree(&1), Ok(1));
        assert_eq!(d.out_degree(&1), Ok(2));
        assert_eq!(d.degrees(Nbunch::Many(vec![2, 9])), Ok(vec![(2, 1)]));
        assert!(d.neighbors(&9).is_err());
    }
}
