//! Read-only graph interface shared by graphs and graph views

use super::attr::AttrDict;
use super::types::{EdgeKey, Nbunch, NodeId};
use crate::error::{node_not_found, GraphError, GraphResult};
use rustc_hash::FxHashSet;

/// Borrowed edge payload between one ordered pair of nodes
#[derive(Debug, Clone)]
pub enum EdgeData<'a> {
    /// The dictionary of a simple-graph edge
    Single(&'a AttrDict),
    /// Every parallel edge, keyed
    Multi(Vec<(&'a EdgeKey, &'a AttrDict)>),
}

impl<'a> EdgeData<'a> {
    /// Number of edges in the payload: 1, or the parallel edge count
    pub fn edge_count(&self) -> usize {
        match self {
            EdgeData::Single(_) => 1,
            EdgeData::Multi(entries) => entries.len(),
        }
    }

    /// Attribute dictionaries, parallel edges in insertion order
    pub fn dicts(&self) -> Vec<&'a AttrDict> {
        match self {
            EdgeData::Single(dict) => vec![*dict],
            EdgeData::Multi(entries) => entries.iter().map(|(_, d)| *d).collect(),
        }
    }

    /// Keys of the parallel edges; a single `None` for simple edges
    pub fn keys(&self) -> Vec<Option<EdgeKey>> {
        match self {
            EdgeData::Single(_) => vec![None],
            EdgeData::Multi(entries) => entries.iter().map(|(k, _)| Some(**k)).collect(),
        }
    }

    /// Numeric `attr` of the edge, or the minimum over parallel edges.
    ///
    /// Missing or non-numeric values count as `default`. `None` only when
    /// there is no edge at all.
    pub fn min_attr(&self, attr: &str, default: f64) -> Option<f64> {
        self.dicts()
            .into_iter()
            .map(|d| d.get_number(attr).unwrap_or(default))
            .reduce(f64::min)
    }

    /// Sum of `attr` over parallel edges, missing values counting as `default`
    pub fn attr_sum(&self, attr: &str, default: f64) -> f64 {
        self.dicts()
            .into_iter()
            .map(|d| d.get_number(attr).unwrap_or(default))
            .sum()
    }

    /// Keep only the parallel edges accepted by `keep`
    pub fn retain(self, keep: impl Fn(Option<&EdgeKey>) -> bool) -> Option<EdgeData<'a>> {
        match self {
            EdgeData::Single(dict) => keep(None).then_some(EdgeData::Single(dict)),
            EdgeData::Multi(entries) => {
                let kept: Vec<_> = entries.into_iter().filter(|(k, _)| keep(Some(*k))).collect();
                (!kept.is_empty()).then_some(EdgeData::Multi(kept))
            }
        }
    }

    /// Combine two payloads for the same pair; entries of `self` win
    pub fn merge(self, other: EdgeData<'a>) -> EdgeData<'a> {
        match (self, other) {
            (EdgeData::Multi(mut entries), EdgeData::Multi(more)) => {
                for (key, dict) in more {
                    if !entries.iter().any(|(k, _)| *k == key) {
                        entries.push((key, dict));
                    }
                }
                EdgeData::Multi(entries)
            }
            (first, _) => first,
        }
    }
}

/// Read-only access to a graph's nodes and adjacency.
///
/// Implemented by the four graph types and by the graph views, so that
/// degree queries, copies and the shortest-path algorithms work on either.
pub trait GraphRef {
    /// Node identifier type
    type Node: NodeId;

    /// Whether edges are ordered pairs
    fn is_directed(&self) -> bool;

    /// Whether parallel edges are kept apart by [`EdgeKey`]
    fn is_multigraph(&self) -> bool;

    /// Membership test; views answer through their node filter
    fn has_node(&self, node: &Self::Node) -> bool;

    /// Nodes in iteration order
    fn node_ids(&self) -> Vec<Self::Node>;

    /// Attribute dictionary of `node`, `None` if absent
    fn node_attrs(&self, node: &Self::Node) -> Option<&AttrDict>;

    /// Outgoing (or, undirected, all) neighbors with the edge payload
    fn out_edges(&self, node: &Self::Node) -> Vec<(Self::Node, EdgeData<'_>)>;

    /// Incoming neighbors with the payload of `nbr -> node`
    fn in_edges(&self, node: &Self::Node) -> Vec<(Self::Node, EdgeData<'_>)>;

    /// Node count
    fn number_of_nodes(&self) -> usize {
        self.node_ids().len()
    }

    /// Resolve an [`Nbunch`] to nodes present in the graph.
    ///
    /// A single missing node is an error; missing members of a collection
    /// are skipped.
    fn nbunch_iter(&self, nbunch: Nbunch<Self::Node>) -> GraphResult<Vec<Self::Node>> {
        match nbunch {
            Nbunch::All => Ok(self.node_ids()),
            Nbunch::One(node) => {
                if self.has_node(&node) {
                    Ok(vec![node])
                } else {
                    Err(node_not_found(&node))
                }
            }
            Nbunch::Many(nodes) => Ok(nodes.into_iter().filter(|n| self.has_node(n)).collect()),
        }
    }

    /// Successors of `node` (neighbors when undirected)
    fn neighbor_ids(&self, node: &Self::Node) -> GraphResult<Vec<Self::Node>> {
        if !self.has_node(node) {
            return Err(node_not_found(node));
        }
        Ok(self.out_edges(node).into_iter().map(|(v, _)| v).collect())
    }

    /// Edge count at `node`; a self-loop counts twice in undirected graphs
    fn degree(&self, node: &Self::Node) -> GraphResult<usize> {
        Ok(self.degree_by(node, |d| d.edge_count() as f64)? as usize)
    }

    /// Sum of `attr` over incident edges, missing values counting as 1
    fn weighted_degree(&self, node: &Self::Node, attr: &str) -> GraphResult<f64> {
        self.degree_by(node, |d| d.attr_sum(attr, 1.0))
    }

    /// Sum of `measure` over incident edge slots
    fn degree_by(
        &self,
        node: &Self::Node,
        measure: impl Fn(&EdgeData<'_>) -> f64,
    ) -> GraphResult<f64> {
        if !self.has_node(node) {
            return Err(node_not_found(node));
        }
        let mut total = 0.0;
        for (v, data) in self.out_edges(node) {
            let m = measure(&data);
            total += m;
            if !self.is_directed() && v == *node {
                total += m;
            }
        }
        if self.is_directed() {
            total += self.in_edges(node).iter().map(|(_, d)| measure(d)).sum::<f64>();
        }
        Ok(total)
    }

    /// `(node, degree)` for each node of `nbunch`
    fn degrees(&self, nbunch: Nbunch<Self::Node>) -> GraphResult<Vec<(Self::Node, usize)>> {
        self.nbunch_iter(nbunch)?
            .into_iter()
            .map(|n| self.degree(&n).map(|d| (n, d)))
            .collect()
    }

    /// Incoming edge count; directed graphs only
    fn in_degree(&self, node: &Self::Node) -> GraphResult<usize> {
        if !self.is_directed() {
            return Err(GraphError::NotImplementedForGraphType("undirected".to_string()));
        }
        if !self.has_node(node) {
            return Err(node_not_found(node));
        }
        Ok(self.in_edges(node).iter().map(|(_, d)| d.edge_count()).sum())
    }

    /// Outgoing edge count; directed graphs only
    fn out_degree(&self, node: &Self::Node) -> GraphResult<usize> {
        if !self.is_directed() {
            return Err(GraphError::NotImplementedForGraphType("undirected".to_string()));
        }
        if !self.has_node(node) {
            return Err(node_not_found(node));
        }
        Ok(self.out_edges(node).iter().map(|(_, d)| d.edge_count()).sum())
    }

    /// Every edge slot once: `(u, v, payload)`
    fn edge_entries(&self) -> Vec<(Self::Node, Self::Node, EdgeData<'_>)> {
        let mut out = Vec::new();
        let mut done: FxHashSet<Self::Node> = FxHashSet::default();
        for u in self.node_ids() {
            for (v, data) in self.out_edges(&u) {
                if !self.is_directed() && done.contains(&v) {
                    continue;
                }
                out.push((u.clone(), v, data));
            }
            if !self.is_directed() {
                done.insert(u);
            }
        }
        out
    }

    /// Edge count, parallel edges counted separately
    fn number_of_edges(&self) -> usize {
        self.edge_entries().iter().map(|(_, _, d)| d.edge_count()).sum()
    }

    /// Sum of `attr` over all edges, missing values counting as 1
    fn weighted_size(&self, attr: &str) -> f64 {
        self.edge_entries().iter().map(|(_, _, d)| d.attr_sum(attr, 1.0)).sum()
    }
}
