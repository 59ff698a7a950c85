//! Edge operations for multigraphs
//!
//! Parallel edges between the same pair are told apart by an [`EdgeKey`].
//! When no key is given the next unused one is assigned: one more than the
//! largest key between the pair, or 0 for the first edge. If the largest key
//! is already `u64::MAX` some other free key is picked.

use super::attr::{AttrDict, AttrMap, AttrValue};
use super::base::GraphRef;
use super::filters::{hide_multiedges, hide_nodes, show_multiedges, show_nodes};
use super::graphviews::SubgraphView;
use super::network::Network;
use super::store::KeyMap;
use super::types::{Directed, Direction, EdgeKey, NodeId};
use super::views::{AtlasView, MultiAdjacencyView};
use crate::error::GraphResult;
use tracing::trace;

/// One edge for [`Network::add_edges_from`] on multigraphs
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedEdgeTuple<N> {
    pub u: N,
    pub v: N,
    pub key: Option<EdgeKey>,
    pub attrs: AttrMap,
}

impl<N> From<(N, N)> for KeyedEdgeTuple<N> {
    fn from((u, v): (N, N)) -> Self {
        KeyedEdgeTuple { u, v, key: None, attrs: AttrMap::new() }
    }
}

impl<N> From<(N, N, AttrMap)> for KeyedEdgeTuple<N> {
    fn from((u, v, attrs): (N, N, AttrMap)) -> Self {
        KeyedEdgeTuple { u, v, key: None, attrs }
    }
}

impl<N> From<(N, N, EdgeKey)> for KeyedEdgeTuple<N> {
    fn from((u, v, key): (N, N, EdgeKey)) -> Self {
        KeyedEdgeTuple { u, v, key: Some(key), attrs: AttrMap::new() }
    }
}

impl<N> From<(N, N, EdgeKey, AttrMap)> for KeyedEdgeTuple<N> {
    fn from((u, v, key, attrs): (N, N, EdgeKey, AttrMap)) -> Self {
        KeyedEdgeTuple { u, v, key: Some(key), attrs }
    }
}

impl<N: NodeId, D: Direction> Network<N, KeyMap, D> {
    /// Add a new parallel edge `u -> v` and return its key
    pub fn add_edge(&mut self, u: N, v: N) -> EdgeKey {
        self.store.add_keyed_edge(u, v, None, AttrMap::new())
    }

    pub fn add_edge_with(&mut self, u: N, v: N, attrs: AttrMap) -> EdgeKey {
        self.store.add_keyed_edge(u, v, None, attrs)
    }

    /// Add or update the edge `u -> v` under `key`
    pub fn add_keyed_edge(&mut self, u: N, v: N, key: EdgeKey, attrs: AttrMap) -> EdgeKey {
        self.store.add_keyed_edge(u, v, Some(key), attrs)
    }

    /// Key the next keyless `add_edge(u, v)` would use
    pub fn new_edge_key(&self, u: &N, v: &N) -> EdgeKey {
        self.store.new_edge_key(u, v)
    }

    /// Add each edge; returns the keys used, in order
    pub fn add_edges_from<T>(&mut self, edges: impl IntoIterator<Item = T>) -> Vec<EdgeKey>
    where
        T: Into<KeyedEdgeTuple<N>>,
    {
        edges
            .into_iter()
            .map(|edge| {
                let KeyedEdgeTuple { u, v, key, attrs } = edge.into();
                self.store.add_keyed_edge(u, v, key, attrs)
            })
            .collect()
    }

    pub fn add_weighted_edges_from(
        &mut self,
        edges: impl IntoIterator<Item = (N, N, f64)>,
        weight: &str,
    ) -> Vec<EdgeKey> {
        edges
            .into_iter()
            .map(|(u, v, w)| {
                let mut attrs = AttrMap::new();
                attrs.insert(weight.to_string(), AttrValue::Float(w));
                self.store.add_keyed_edge(u, v, None, attrs)
            })
            .collect()
    }

    /// Remove one edge between `u` and `v`.
    ///
    /// Without a key the most recently added edge goes. Returns the key of
    /// the removed edge.
    pub fn remove_edge(&mut self, u: &N, v: &N, key: Option<EdgeKey>) -> GraphResult<EdgeKey> {
        let (key, _) = self.store.remove_keyed_edge(u, v, key)?;
        trace!(u = ?u, v = ?v, key = key.as_u64(), "removed edge");
        Ok(key)
    }

    /// Remove each listed edge; absent edges are skipped
    pub fn remove_edges_from(&mut self, edges: impl IntoIterator<Item = (N, N, Option<EdgeKey>)>) {
        for (u, v, key) in edges {
            self.store.remove_keyed_edge(&u, &v, key).ok();
        }
    }

    pub fn has_edge_key(&self, u: &N, v: &N, key: EdgeKey) -> bool {
        self.has_edge_slot(u, v, Some(&key))
    }

    /// Key -> attributes for the parallel edges `u -> v`
    pub fn edge_keys(&self, u: &N, v: &N) -> Option<AtlasView<'_, EdgeKey, AttrDict>> {
        self.store.entry(u, v).map(AtlasView::new)
    }

    pub fn edge_attrs(&self, u: &N, v: &N, key: EdgeKey) -> Option<&AttrDict> {
        self.store.entry(u, v)?.get(&key)
    }

    /// Every edge once, parallel edges repeated
    pub fn edges(&self) -> Vec<(N, N)> {
        self.edges_keyed()
            .into_iter()
            .map(|(u, v, _)| (u, v))
            .collect()
    }

    pub fn edges_keyed(&self) -> Vec<(N, N, EdgeKey)> {
        self.edge_entries()
            .into_iter()
            .flat_map(|(u, v, data)| {
                data.keys()
                    .into_iter()
                    .flatten()
                    .map(move |k| (u.clone(), v.clone(), k))
            })
            .collect()
    }

    pub fn edges_keyed_data(&self) -> Vec<(N, N, EdgeKey, AttrDict)> {
        let mut out = Vec::new();
        for (u, v, data) in self.edge_entries() {
            for (key, dict) in data.keys().into_iter().zip(data.dicts()) {
                if let Some(key) = key {
                    out.push((u.clone(), v.clone(), key, dict.clone()));
                }
            }
        }
        out
    }

    pub fn number_of_edges_between(&self, u: &N, v: &N) -> usize {
        self.store.entry(u, v).map_or(0, KeyMap::len)
    }

    /// Node -> neighbor -> key -> attributes, read-only
    pub fn adj(&self) -> MultiAdjacencyView<'_, N> {
        MultiAdjacencyView::new(self.store.succ())
    }

    /// View containing only the listed keyed edges and their endpoints
    pub fn edge_subgraph(
        &self,
        edges: impl IntoIterator<Item = (N, N, EdgeKey)>,
    ) -> SubgraphView<'_, N, KeyMap, D> {
        let edges: Vec<(N, N, EdgeKey)> = edges.into_iter().collect();
        let nodes: Vec<N> = edges
            .iter()
            .flat_map(|(u, v, _)| [u.clone(), v.clone()])
            .collect();
        SubgraphView::new(self, show_nodes(nodes), show_multiedges(edges, D::DIRECTED))
    }

    /// View with the listed nodes and keyed edges hidden
    pub fn restricted_view(
        &self,
        nodes: impl IntoIterator<Item = N>,
        edges: impl IntoIterator<Item = (N, N, EdgeKey)>,
    ) -> SubgraphView<'_, N, KeyMap, D> {
        SubgraphView::new(self, hide_nodes(nodes), hide_multiedges(edges, D::DIRECTED))
    }
}

impl<N: NodeId> Network<N, KeyMap, Directed> {
    pub fn succ(&self) -> MultiAdjacencyView<'_, N> {
        MultiAdjacencyView::new(self.store.succ())
    }

    pub fn pred(&self) -> MultiAdjacencyView<'_, N> {
        MultiAdjacencyView::new(self.store.pred())
    }
}
