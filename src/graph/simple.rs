//! Edge operations for graphs with at most one edge per node pair

use super::attr::{AttrDict, AttrMap, AttrValue};
use super::base::{EdgeData, GraphRef};
use super::filters::{hide_edges, hide_nodes, show_edges, show_nodes};
use super::graphviews::SubgraphView;
use super::network::Network;
use super::types::{Directed, Direction, NodeId};
use super::views::AdjacencyView;
use crate::error::GraphResult;
use tracing::trace;

/// One edge for [`Network::add_edges_from`]: endpoints plus attributes
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeTuple<N> {
    pub u: N,
    pub v: N,
    pub attrs: AttrMap,
}

impl<N> From<(N, N)> for EdgeTuple<N> {
    fn from((u, v): (N, N)) -> Self {
        EdgeTuple { u, v, attrs: AttrMap::new() }
    }
}

impl<N> From<(N, N, AttrMap)> for EdgeTuple<N> {
    fn from((u, v, attrs): (N, N, AttrMap)) -> Self {
        EdgeTuple { u, v, attrs }
    }
}

impl<N: NodeId, D: Direction> Network<N, AttrDict, D> {
    /// Add the edge `u -> v`, creating missing endpoints.
    ///
    /// Returns the edge's attribute dictionary, which is the same handle
    /// stored on both sides of the adjacency.
    pub fn add_edge(&mut self, u: N, v: N) -> AttrDict {
        self.store.add_simple_edge(u, v, AttrMap::new())
    }

    /// Add the edge `u -> v`, merging `attrs` into an existing edge
    pub fn add_edge_with(&mut self, u: N, v: N, attrs: AttrMap) -> AttrDict {
        self.store.add_simple_edge(u, v, attrs)
    }

    pub fn add_edges_from<T>(&mut self, edges: impl IntoIterator<Item = T>)
    where
        T: Into<EdgeTuple<N>>,
    {
        for edge in edges {
            let EdgeTuple { u, v, attrs } = edge.into();
            self.store.add_simple_edge(u, v, attrs);
        }
    }

    /// Add `(u, v, w)` triples, storing `w` under `weight`
    pub fn add_weighted_edges_from(&mut self, edges: impl IntoIterator<Item = (N, N, f64)>, weight: &str) {
        for (u, v, w) in edges {
            let mut attrs = AttrMap::new();
            attrs.insert(weight.to_string(), AttrValue::Float(w));
            self.store.add_simple_edge(u, v, attrs);
        }
    }

    pub fn remove_edge(&mut self, u: &N, v: &N) -> GraphResult<()> {
        self.store.remove_simple_edge(u, v)?;
        trace!(u = ?u, v = ?v, "removed edge");
        Ok(())
    }

    /// Remove each listed edge; absent edges are skipped
    pub fn remove_edges_from(&mut self, edges: impl IntoIterator<Item = (N, N)>) {
        for (u, v) in edges {
            self.store.remove_simple_edge(&u, &v).ok();
        }
    }

    pub fn edge_attrs(&self, u: &N, v: &N) -> Option<&AttrDict> {
        self.store.entry(u, v)
    }

    /// Every edge once, in adjacency order
    pub fn edges(&self) -> Vec<(N, N)> {
        self.edge_entries()
            .into_iter()
            .map(|(u, v, _)| (u, v))
            .collect()
    }

    /// Every edge once with its attribute dictionary handle
    pub fn edges_data(&self) -> Vec<(N, N, AttrDict)> {
        self.edge_entries()
            .into_iter()
            .filter_map(|(u, v, data)| match data {
                EdgeData::Single(dict) => Some((u, v, dict.clone())),
                EdgeData::Multi(_) => None,
            })
            .collect()
    }

    pub fn number_of_edges_between(&self, u: &N, v: &N) -> usize {
        usize::from(self.has_edge(u, v))
    }

    /// Node -> neighbor -> attributes, read-only
    pub fn adj(&self) -> AdjacencyView<'_, N, N, AttrDict> {
        AdjacencyView::new(self.store.succ())
    }

    /// View containing only the listed edges and their endpoints
    pub fn edge_subgraph(&self, edges: impl IntoIterator<Item = (N, N)>) -> SubgraphView<'_, N, AttrDict, D> {
        let edges: Vec<(N, N)> = edges.into_iter().collect();
        let nodes: Vec<N> = edges
            .iter()
            .flat_map(|(u, v)| [u.clone(), v.clone()])
            .collect();
        SubgraphView::new(self, show_nodes(nodes), show_edges(edges, D::DIRECTED))
    }

    /// View with the listed nodes and edges hidden
    pub fn restricted_view(
        &self,
        nodes: impl IntoIterator<Item = N>,
        edges: impl IntoIterator<Item = (N, N)>,
    ) -> SubgraphView<'_, N, AttrDict, D> {
        SubgraphView::new(self, hide_nodes(nodes), hide_edges(edges, D::DIRECTED))
    }
}

impl<N: NodeId> Network<N, AttrDict, Directed> {
    /// Node -> successor -> attributes
    pub fn succ(&self) -> AdjacencyView<'_, N, N, AttrDict> {
        AdjacencyView::new(self.store.succ())
    }

    /// Node -> predecessor -> attributes
    pub fn pred(&self) -> AdjacencyView<'_, N, N, AttrDict> {
        AdjacencyView::new(self.store.pred())
    }
}
