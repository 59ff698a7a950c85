//! Dijkstra's algorithm
//!
//! Multi-source search for non-negative weights. Ties in the frontier are
//! broken by insertion order, so results are deterministic for a given
//! adjacency order.

use crate::common::{NodeId, WeightedAdjacency};
use crate::error::{node_not_found, PathError, PathResult};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::trace;

/// State for the Dijkstra priority queue
#[derive(Clone)]
struct State<N> {
    cost: f64,
    seq: u64,
    node: N,
}

impl<N> PartialEq for State<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N> Eq for State<N> {}

impl<N> Ord for State<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse both keys for a min-heap
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<N> PartialOrd for State<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority frontier keyed by `(distance, insertion counter)`.
pub(crate) struct Frontier<N> {
    heap: BinaryHeap<State<N>>,
    counter: u64,
}

impl<N> Frontier<N> {
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            counter: 0,
        }
    }

    pub(crate) fn push(&mut self, cost: f64, node: N) {
        self.heap.push(State {
            cost,
            seq: self.counter,
            node,
        });
        self.counter += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<(f64, N)> {
        self.heap.pop().map(|s| (s.cost, s.node))
    }

    pub(crate) fn peek_cost(&self) -> Option<f64> {
        self.heap.peek().map(|s| s.cost)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Outcome of a single- or multi-source search
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShortestPaths<N: NodeId> {
    /// Final distances, in the order nodes were settled
    pub dist: IndexMap<N, f64>,
    /// Every tied-optimal predecessor; the first entry is the one used for paths
    pub pred: IndexMap<N, Vec<N>>,
    /// Nodes the search started from
    pub sources: Vec<N>,
}

impl<N: NodeId> ShortestPaths<N> {
    pub fn distance(&self, node: &N) -> Option<f64> {
        self.dist.get(node).copied()
    }

    /// Path from the nearest source to `target`, following first predecessors.
    pub fn path_to(&self, target: &N) -> Option<Vec<N>> {
        if !self.dist.contains_key(target) {
            return None;
        }
        let mut path = vec![target.clone()];
        let mut cur = target;
        while !self.sources.contains(cur) {
            match self.pred.get(cur).and_then(|p| p.first()) {
                Some(prev) => {
                    path.push(prev.clone());
                    cur = prev;
                }
                None => break,
            }
        }
        path.reverse();
        Some(path)
    }

    /// Paths to every reached node, in settle order
    pub fn paths(&self) -> IndexMap<N, Vec<N>> {
        self.dist
            .keys()
            .filter_map(|n| self.path_to(n).map(|p| (n.clone(), p)))
            .collect()
    }
}

/// Dijkstra from one or more sources at distance zero.
///
/// Stops once `target` is settled. Nodes farther than `cutoff` are never
/// reached. Edges whose weight is `None` are skipped.
///
/// Fails with [`PathError::ContradictoryPaths`] when a settled node is later
/// offered a strictly shorter distance, which only happens with negative
/// weights.
pub fn dijkstra_multisource<G: WeightedAdjacency>(
    graph: &G,
    sources: &[G::Node],
    target: Option<&G::Node>,
    cutoff: Option<f64>,
) -> PathResult<ShortestPaths<G::Node>> {
    if sources.is_empty() {
        return Err(PathError::InvalidArgument("sources must not be empty".to_string()));
    }
    if let Some(missing) = sources.iter().find(|s| !graph.contains(s)) {
        return Err(node_not_found(missing));
    }
    trace!(sources = sources.len(), ?cutoff, "dijkstra search");

    let mut dist: IndexMap<G::Node, f64> = IndexMap::new();
    let mut seen: FxHashMap<G::Node, f64> = FxHashMap::default();
    let mut pred: IndexMap<G::Node, Vec<G::Node>> = IndexMap::new();
    let mut fringe = Frontier::new();

    for source in sources {
        seen.insert(source.clone(), 0.0);
        pred.insert(source.clone(), Vec::new());
        fringe.push(0.0, source.clone());
    }

    while let Some((d, v)) = fringe.pop() {
        if dist.contains_key(&v) {
            continue;
        }
        dist.insert(v.clone(), d);
        if target == Some(&v) {
            break;
        }

        for (u, cost) in graph.successors(&v) {
            let Some(cost) = cost else { continue };
            let vu_dist = d + cost;
            if cutoff.is_some_and(|c| vu_dist > c) {
                continue;
            }

            if let Some(&settled) = dist.get(&u) {
                if vu_dist < settled {
                    return Err(PathError::ContradictoryPaths);
                }
                continue;
            }

            match seen.get(&u) {
                Some(&known) if vu_dist > known => {}
                Some(&known) if vu_dist == known => {
                    pred.entry(u).or_default().push(v.clone());
                }
                _ => {
                    seen.insert(u.clone(), vu_dist);
                    fringe.push(vu_dist, u.clone());
                    pred.insert(u, vec![v.clone()]);
                }
            }
        }
    }

    Ok(ShortestPaths {
        dist,
        pred,
        sources: sources.to_vec(),
    })
}
