//! Shared abstractions for the shortest-path engine
//!
//! Every search in this crate runs over a [`WeightedAdjacency`]: a read-only
//! adjacency whose edges already carry the weight chosen by the caller.
//! A weight of `None` marks an edge as impassable.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Anything usable as a node identifier
pub trait NodeId: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> NodeId for T {}

/// Weight of one edge. `None` means the edge cannot be traversed.
pub type EdgeWeight = Option<f64>;

/// Read-only weighted topology consumed by the searches.
pub trait WeightedAdjacency {
    type Node: NodeId;

    fn is_directed(&self) -> bool;

    fn node_count(&self) -> usize;

    /// All nodes, in a stable order
    fn nodes(&self) -> Vec<Self::Node>;

    fn contains(&self, node: &Self::Node) -> bool;

    /// Neighbors reachable from `node`, paired with the weight of `node -> nbr`.
    ///
    /// For undirected topologies this is every neighbor.
    fn successors(&self, node: &Self::Node) -> Vec<(Self::Node, EdgeWeight)>;

    /// Neighbors that reach `node`, paired with the weight of `nbr -> node`.
    fn predecessors(&self, node: &Self::Node) -> Vec<(Self::Node, EdgeWeight)>;
}

impl<G: WeightedAdjacency + ?Sized> WeightedAdjacency for &G {
    type Node = G::Node;

    fn is_directed(&self) -> bool {
        (**self).is_directed()
    }

    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn nodes(&self) -> Vec<Self::Node> {
        (**self).nodes()
    }

    fn contains(&self, node: &Self::Node) -> bool {
        (**self).contains(node)
    }

    fn successors(&self, node: &Self::Node) -> Vec<(Self::Node, EdgeWeight)> {
        (**self).successors(node)
    }

    fn predecessors(&self, node: &Self::Node) -> Vec<(Self::Node, EdgeWeight)> {
        (**self).predecessors(node)
    }
}

/// Edge weights shifted by node potentials: `w(u, v) + h(u) - h(v)`.
///
/// With potentials taken from a Bellman-Ford pass the shifted weights are
/// non-negative, which lets Dijkstra run on graphs with negative edges.
pub struct Reweighted<'a, G: WeightedAdjacency> {
    inner: &'a G,
    potential: &'a FxHashMap<G::Node, f64>,
}

impl<'a, G: WeightedAdjacency> Reweighted<'a, G> {
    pub fn new(inner: &'a G, potential: &'a FxHashMap<G::Node, f64>) -> Self {
        Self { inner, potential }
    }

    fn shift(&self, u: &G::Node, v: &G::Node, weight: EdgeWeight) -> EdgeWeight {
        let hu = self.potential.get(u).copied().unwrap_or(0.0);
        let hv = self.potential.get(v).copied().unwrap_or(0.0);
        // Reduced costs are non-negative; clamp rounding noise.
        weight.map(|w| (w + hu - hv).max(0.0))
    }
}

impl<'a, G: WeightedAdjacency> WeightedAdjacency for Reweighted<'a, G> {
    type Node = G::Node;

    fn is_directed(&self) -> bool {
        self.inner.is_directed()
    }

    fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    fn nodes(&self) -> Vec<Self::Node> {
        self.inner.nodes()
    }

    fn contains(&self, node: &Self::Node) -> bool {
        self.inner.contains(node)
    }

    fn successors(&self, node: &Self::Node) -> Vec<(Self::Node, EdgeWeight)> {
        self.inner
            .successors(node)
            .into_iter()
            .map(|(v, w)| {
                let w = self.shift(node, &v, w);
                (v, w)
            })
            .collect()
    }

    fn predecessors(&self, node: &Self::Node) -> Vec<(Self::Node, EdgeWeight)> {
        self.inner
            .predecessors(node)
            .into_iter()
            .map(|(u, w)| {
                let w = self.shift(&u, node, w);
                (u, w)
            })
            .collect()
    }
}

/// Small owned adjacency, handy for tests and benchmarks.
///
/// Re-adding an edge replaces its weight.
#[derive(Debug, Clone)]
pub struct AdjacencyList<N: NodeId> {
    directed: bool,
    succ: IndexMap<N, IndexMap<N, EdgeWeight>>,
    pred: IndexMap<N, IndexMap<N, EdgeWeight>>,
}

impl<N: NodeId> AdjacencyList<N> {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            succ: IndexMap::new(),
            pred: IndexMap::new(),
        }
    }

    /// Build from `(u, v, weight)` triples
    pub fn from_edges(directed: bool, edges: impl IntoIterator<Item = (N, N, f64)>) -> Self {
        let mut list = Self::new(directed);
        for (u, v, w) in edges {
            list.add_edge(u, v, w);
        }
        list
    }

    pub fn add_node(&mut self, node: N) {
        self.succ.entry(node.clone()).or_default();
        self.pred.entry(node).or_default();
    }

    pub fn add_edge(&mut self, u: N, v: N, weight: f64) {
        self.set_edge(u, v, Some(weight));
    }

    /// Add an edge no search may traverse
    pub fn add_hidden_edge(&mut self, u: N, v: N) {
        self.set_edge(u, v, None);
    }

    fn set_edge(&mut self, u: N, v: N, weight: EdgeWeight) {
        self.add_node(u.clone());
        self.add_node(v.clone());
        if let Some(nbrs) = self.succ.get_mut(&u) {
            nbrs.insert(v.clone(), weight);
        }
        if let Some(nbrs) = self.pred.get_mut(&v) {
            nbrs.insert(u.clone(), weight);
        }
        if !self.directed {
            if let Some(nbrs) = self.succ.get_mut(&v) {
                nbrs.insert(u.clone(), weight);
            }
            if let Some(nbrs) = self.pred.get_mut(&u) {
                nbrs.insert(v, weight);
            }
        }
    }

    pub fn edge_count(&self) -> usize {
        let total: usize = self.succ.values().map(|nbrs| nbrs.len()).sum();
        if self.directed {
            return total;
        }
        let loops = self
            .succ
            .iter()
            .filter(|(u, nbrs)| nbrs.contains_key(*u))
            .count();
        (total + loops) / 2
    }
}

impl<N: NodeId> WeightedAdjacency for AdjacencyList<N> {
    type Node = N;

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn node_count(&self) -> usize {
        self.succ.len()
    }

    fn nodes(&self) -> Vec<N> {
        self.succ.keys().cloned().collect()
    }

    fn contains(&self, node: &N) -> bool {
        self.succ.contains_key(node)
    }

    fn successors(&self, node: &N) -> Vec<(N, EdgeWeight)> {
        self.succ
            .get(node)
            .map(|nbrs| nbrs.iter().map(|(v, w)| (v.clone(), *w)).collect())
            .unwrap_or_default()
    }

    fn predecessors(&self, node: &N) -> Vec<(N, EdgeWeight)> {
        self.pred
            .get(node)
            .map(|nbrs| nbrs.iter().map(|(u, w)| (u.clone(), *w)).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undirected_list_is_symmetric() {
        let list = AdjacencyList::from_edges(false, vec![(1, 2, 3.0), (2, 3, 1.0)]);
        assert_eq!(list.node_count(), 3);
        assert_eq!(list.edge_count(), 2);
        assert_eq!(list.successors(&2), vec![(1, Some(3.0)), (3, Some(1.0))]);
        assert_eq!(list.predecessors(&2), list.successors(&2));
    }

    #[test]
    fn test_directed_list_keeps_orientation() {
        let mut list = AdjacencyList::new(true);
        list.add_edge("a", "b", 2.0);
        list.add_edge("a", "b", 5.0);
        list.add_node("c");

        assert_eq!(list.edge_count(), 1);
        assert_eq!(list.successors(&"a"), vec![("b", Some(5.0))]);
        assert!(list.successors(&"b").is_empty());
        assert_eq!(list.predecessors(&"b"), vec![("a", Some(5.0))]);
        assert_eq!(list.nodes(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_self_loop_counts_once() {
        let list = AdjacencyList::from_edges(false, vec![(0, 0, 1.0), (0, 1, 1.0)]);
        assert_eq!(list.edge_count(), 2);
    }

    #[test]
    fn test_reweighted_shifts_by_potential() {
        let list = AdjacencyList::from_edges(true, vec![(0, 1, -5.0), (1, 2, 4.0)]);
        let mut h = FxHashMap::default();
        h.insert(0, 0.0);
        h.insert(1, -5.0);
        h.insert(2, -1.0);
        let shifted = Reweighted::new(&list, &h);

        assert_eq!(shifted.successors(&0), vec![(1, Some(0.0))]);
        assert_eq!(shifted.successors(&1), vec![(2, Some(0.0))]);
        assert_eq!(shifted.predecessors(&2), vec![(1, Some(0.0))]);
    }
}
