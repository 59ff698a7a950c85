//! Node and edge predicates for filtered views and subgraphs
//!
//! Predicates are shared closures so a view can hand them down to the inner
//! views it creates. Edge predicates receive the edge key for multigraph
//! edges and `None` for simple ones.

use super::types::{EdgeKey, NodeId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::rc::Rc;

pub type NodePredicate<'a, N> = Rc<dyn Fn(&N) -> bool + 'a>;

/// Called as `(u, v, key)` for the edge `u -> v`
pub type EdgePredicate<'a, N> = Rc<dyn Fn(&N, &N, Option<&EdgeKey>) -> bool + 'a>;

/// Edge predicate with the source node already bound: `(v, key)`
pub type InnerEdgePredicate<'a, N> = Rc<dyn Fn(&N, &EdgeKey) -> bool + 'a>;

pub fn node_predicate<'a, N, F>(f: F) -> NodePredicate<'a, N>
where
    F: Fn(&N) -> bool + 'a,
{
    Rc::new(f)
}

pub fn edge_predicate<'a, N, F>(f: F) -> EdgePredicate<'a, N>
where
    F: Fn(&N, &N, Option<&EdgeKey>) -> bool + 'a,
{
    Rc::new(f)
}

pub(crate) fn inner_edge_predicate<'a, N, F>(f: F) -> InnerEdgePredicate<'a, N>
where
    F: Fn(&N, &EdgeKey) -> bool + 'a,
{
    Rc::new(f)
}

/// Accept every node
pub fn no_filter<'a, N: 'a>() -> NodePredicate<'a, N> {
    node_predicate(|_| true)
}

/// Accept every edge
pub fn no_edge_filter<'a, N: 'a>() -> EdgePredicate<'a, N> {
    edge_predicate(|_, _, _| true)
}

pub fn show_nodes<'a, N: NodeId + 'a>(nodes: impl IntoIterator<Item = N>) -> NodePredicate<'a, N> {
    let keep: FxHashSet<N> = nodes.into_iter().collect();
    node_predicate(move |n| keep.contains(n))
}

pub fn hide_nodes<'a, N: NodeId + 'a>(nodes: impl IntoIterator<Item = N>) -> NodePredicate<'a, N> {
    let hidden: FxHashSet<N> = nodes.into_iter().collect();
    node_predicate(move |n| !hidden.contains(n))
}

type PairSet<N> = FxHashMap<N, FxHashSet<N>>;

fn pair_set<N: NodeId>(edges: impl IntoIterator<Item = (N, N)>, directed: bool) -> PairSet<N> {
    let mut set: PairSet<N> = FxHashMap::default();
    for (u, v) in edges {
        if !directed {
            set.entry(v.clone()).or_default().insert(u.clone());
        }
        set.entry(u).or_default().insert(v);
    }
    set
}

/// Accept only the listed `(u, v)` edges; undirected pairs match both ways
pub fn show_edges<'a, N: NodeId + 'a>(
    edges: impl IntoIterator<Item = (N, N)>,
    directed: bool,
) -> EdgePredicate<'a, N> {
    let keep = pair_set(edges, directed);
    edge_predicate(move |u, v, _| keep.get(u).is_some_and(|vs| vs.contains(v)))
}

pub fn hide_edges<'a, N: NodeId + 'a>(
    edges: impl IntoIterator<Item = (N, N)>,
    directed: bool,
) -> EdgePredicate<'a, N> {
    let hidden = pair_set(edges, directed);
    edge_predicate(move |u, v, _| !hidden.get(u).is_some_and(|vs| vs.contains(v)))
}

type KeyedSet<N> = FxHashMap<N, FxHashMap<N, FxHashSet<EdgeKey>>>;

fn keyed_set<N: NodeId>(edges: impl IntoIterator<Item = (N, N, EdgeKey)>, directed: bool) -> KeyedSet<N> {
    let mut set: KeyedSet<N> = FxHashMap::default();
    for (u, v, k) in edges {
        if !directed {
            set.entry(v.clone())
                .or_default()
                .entry(u.clone())
                .or_default()
                .insert(k);
        }
        set.entry(u).or_default().entry(v).or_default().insert(k);
    }
    set
}

fn keyed_contains<N: NodeId>(set: &KeyedSet<N>, u: &N, v: &N, key: Option<&EdgeKey>) -> bool {
    match set.get(u).and_then(|vs| vs.get(v)) {
        Some(keys) => key.map_or(true, |k| keys.contains(k)),
        None => false,
    }
}

/// Accept only the listed `(u, v, key)` multigraph edges
pub fn show_multiedges<'a, N: NodeId + 'a>(
    edges: impl IntoIterator<Item = (N, N, EdgeKey)>,
    directed: bool,
) -> EdgePredicate<'a, N> {
    let keep = keyed_set(edges, directed);
    edge_predicate(move |u, v, key| keyed_contains(&keep, u, v, key))
}

pub fn hide_multiedges<'a, N: NodeId + 'a>(
    edges: impl IntoIterator<Item = (N, N, EdgeKey)>,
    directed: bool,
) -> EdgePredicate<'a, N> {
    let hidden = keyed_set(edges, directed);
    edge_predicate(move |u, v, key| !keyed_contains(&hidden, u, v, key))
}
