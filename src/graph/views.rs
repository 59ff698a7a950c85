//! Read-only views over the nested adjacency maps
//!
//! Views borrow the underlying maps and never copy them, so they always show
//! the current state of the graph. They expose no way to add or remove keys
//! at any level. The attribute dictionaries at the bottom are shared
//! [`AttrDict`] handles and stay writable through a view:
//!
//! ```
//! use plexgraph::prelude::*;
//!
//! let mut g: Graph<u32> = Graph::new();
//! g.add_edge_with(1, 2, attrs([("weight", 5)]));
//! g.adj().get(&2).unwrap().get(&1).unwrap().set("weight", 9);
//! assert_eq!(g.edge_attrs(&1, &2).unwrap().get_number("weight"), Some(9.0));
//! ```
//!
//! Structural writes do not compile:
//!
//! ```compile_fail
//! use plexgraph::prelude::*;
//!
//! let mut g: Graph<u32> = Graph::new();
//! g.add_edge(1, 2);
//! let adj = g.adj();
//! adj.insert(3, Default::default());
//! ```
//!
//! Each view also offers [`Mapping::copy`], which produces plain owned maps
//! detached from the graph.

use super::attr::{AttrDict, AttrMap};
use super::filters::{inner_edge_predicate, node_predicate, EdgePredicate, InnerEdgePredicate, NodePredicate};
use super::store::{Adjacency, Atlas, FxIndexMap, KeyMap};
use super::types::{EdgeKey, NodeId};
use crate::error::{GraphError, GraphResult};
use indexmap::IndexMap;
use std::fmt;
use std::hash::Hash;

/// Conversion of view contents into plain owned maps
pub trait ToPlain {
    type Plain;

    fn to_plain(&self) -> Self::Plain;
}

impl ToPlain for AttrDict {
    type Plain = AttrMap;

    fn to_plain(&self) -> AttrMap {
        self.snapshot()
    }
}

impl<K: Clone + Eq + Hash, V: ToPlain> ToPlain for FxIndexMap<K, V> {
    type Plain = IndexMap<K, V::Plain>;

    fn to_plain(&self) -> Self::Plain {
        self.iter().map(|(k, v)| (k.clone(), v.to_plain())).collect()
    }
}

/// Read-only mapping interface shared by every view.
///
/// Keys borrow from the graph for `'a`; values are either references into
/// the graph or lighter views one level down.
pub trait Mapping<'a> {
    type Key: NodeId + 'a;
    type Value;
    type Plain;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains_key(&self, key: &Self::Key) -> bool;

    fn get(&self, key: &Self::Key) -> Option<Self::Value>;

    /// Like [`Mapping::get`], failing with `KeyNotFound` for absent keys
    fn lookup(&self, key: &Self::Key) -> GraphResult<Self::Value> {
        self.get(key)
            .ok_or_else(|| GraphError::KeyNotFound(format!("{:?}", key)))
    }

    /// Keys in underlying insertion order
    fn keys(&self) -> Box<dyn Iterator<Item = &'a Self::Key> + 'a>;

    fn items(&self) -> Vec<(&'a Self::Key, Self::Value)> {
        self.keys()
            .filter_map(|k| self.get(k).map(|v| (k, v)))
            .collect()
    }

    /// Plain owned copy of everything visible through the view
    fn copy(&self) -> Self::Plain;
}

/// One level of an adjacency: key to value
pub struct AtlasView<'a, K, V> {
    atlas: &'a FxIndexMap<K, V>,
}

impl<'a, K, V> AtlasView<'a, K, V> {
    pub fn new(atlas: &'a FxIndexMap<K, V>) -> Self {
        Self { atlas }
    }
}

impl<'a, K, V> Clone for AtlasView<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V> Copy for AtlasView<'a, K, V> {}

impl<'a, K: fmt::Debug, V: fmt::Debug> fmt::Debug for AtlasView<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.atlas.iter()).finish()
    }
}

impl<'a, K: NodeId + 'a, V: ToPlain + 'a> Mapping<'a> for AtlasView<'a, K, V> {
    type Key = K;
    type Value = &'a V;
    type Plain = IndexMap<K, V::Plain>;

    fn len(&self) -> usize {
        self.atlas.len()
    }

    fn contains_key(&self, key: &K) -> bool {
        self.atlas.contains_key(key)
    }

    fn get(&self, key: &K) -> Option<&'a V> {
        self.atlas.get(key)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &'a K> + 'a> {
        Box::new(self.atlas.keys())
    }

    fn copy(&self) -> Self::Plain {
        self.atlas.to_plain()
    }
}

/// Two levels: node to an [`AtlasView`] of its neighbors
pub struct AdjacencyView<'a, K, J, V> {
    adj: &'a FxIndexMap<K, FxIndexMap<J, V>>,
}

impl<'a, K, J, V> AdjacencyView<'a, K, J, V> {
    pub fn new(adj: &'a FxIndexMap<K, FxIndexMap<J, V>>) -> Self {
        Self { adj }
    }
}

impl<'a, K, J, V> Clone for AdjacencyView<'a, K, J, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, J, V> Copy for AdjacencyView<'a, K, J, V> {}

impl<'a, K: NodeId + 'a, J: NodeId + 'a, V: ToPlain + 'a> Mapping<'a> for AdjacencyView<'a, K, J, V> {
    type Key = K;
    type Value = AtlasView<'a, J, V>;
    type Plain = IndexMap<K, IndexMap<J, V::Plain>>;

    fn len(&self) -> usize {
        self.adj.len()
    }

    fn contains_key(&self, key: &K) -> bool {
        self.adj.contains_key(key)
    }

    fn get(&self, key: &K) -> Option<Self::Value> {
        self.adj.get(key).map(AtlasView::new)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &'a K> + 'a> {
        Box::new(self.adj.keys())
    }

    fn copy(&self) -> Self::Plain {
        self.adj.to_plain()
    }
}

/// Three levels for multigraphs: node to neighbor to key to attributes
#[derive(Clone, Copy)]
pub struct MultiAdjacencyView<'a, N: NodeId> {
    adj: &'a Adjacency<N, KeyMap>,
}

impl<'a, N: NodeId> MultiAdjacencyView<'a, N> {
    pub fn new(adj: &'a Adjacency<N, KeyMap>) -> Self {
        Self { adj }
    }
}

impl<'a, N: NodeId + 'a> Mapping<'a> for MultiAdjacencyView<'a, N> {
    type Key = N;
    type Value = AdjacencyView<'a, N, EdgeKey, AttrDict>;
    type Plain = IndexMap<N, IndexMap<N, IndexMap<EdgeKey, AttrMap>>>;

    fn len(&self) -> usize {
        self.adj.len()
    }

    fn contains_key(&self, key: &N) -> bool {
        self.adj.contains_key(key)
    }

    fn get(&self, key: &N) -> Option<Self::Value> {
        self.adj.get(key).map(AdjacencyView::new)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &'a N> + 'a> {
        Box::new(self.adj.keys())
    }

    fn copy(&self) -> Self::Plain {
        self.adj.to_plain()
    }
}

/// Keys of `succ` followed by keys only in `pred`
fn union_keys<'a, K: NodeId + 'a, V: 'a>(
    succ: Option<&'a FxIndexMap<K, V>>,
    pred: Option<&'a FxIndexMap<K, V>>,
) -> Box<dyn Iterator<Item = &'a K> + 'a> {
    let first = succ.into_iter().flat_map(|m| m.keys());
    let rest = pred
        .into_iter()
        .flat_map(|m| m.keys())
        .filter(move |k| !succ.is_some_and(|s| s.contains_key(*k)));
    Box::new(first.chain(rest))
}

/// Union of two atlases; on shared keys the successor side wins
pub struct UnionAtlas<'a, K, V> {
    succ: Option<&'a FxIndexMap<K, V>>,
    pred: Option<&'a FxIndexMap<K, V>>,
}

impl<'a, K, V> UnionAtlas<'a, K, V> {
    pub fn new(succ: Option<&'a FxIndexMap<K, V>>, pred: Option<&'a FxIndexMap<K, V>>) -> Self {
        Self { succ, pred }
    }
}

impl<'a, K, V> Clone for UnionAtlas<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V> Copy for UnionAtlas<'a, K, V> {}

impl<'a, K: NodeId + 'a, V: ToPlain + 'a> Mapping<'a> for UnionAtlas<'a, K, V> {
    type Key = K;
    type Value = &'a V;
    type Plain = IndexMap<K, V::Plain>;

    /// Number of distinct keys across both sides
    fn len(&self) -> usize {
        self.keys().count()
    }

    fn contains_key(&self, key: &K) -> bool {
        self.succ.is_some_and(|m| m.contains_key(key)) || self.pred.is_some_and(|m| m.contains_key(key))
    }

    fn get(&self, key: &K) -> Option<&'a V> {
        self.succ
            .and_then(|m| m.get(key))
            .or_else(|| self.pred.and_then(|m| m.get(key)))
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &'a K> + 'a> {
        union_keys(self.succ, self.pred)
    }

    fn copy(&self) -> Self::Plain {
        self.items()
            .into_iter()
            .map(|(k, v)| (k.clone(), v.to_plain()))
            .collect()
    }
}

/// Union of the successor and predecessor adjacency of a directed graph
#[derive(Clone, Copy)]
pub struct UnionAdjacency<'a, N: NodeId> {
    succ: &'a Adjacency<N, AttrDict>,
    pred: &'a Adjacency<N, AttrDict>,
}

impl<'a, N: NodeId> UnionAdjacency<'a, N> {
    pub fn new(succ: &'a Adjacency<N, AttrDict>, pred: &'a Adjacency<N, AttrDict>) -> Self {
        Self { succ, pred }
    }
}

impl<'a, N: NodeId + 'a> Mapping<'a> for UnionAdjacency<'a, N> {
    type Key = N;
    type Value = UnionAtlas<'a, N, AttrDict>;
    type Plain = IndexMap<N, IndexMap<N, AttrMap>>;

    fn len(&self) -> usize {
        self.succ.len()
    }

    fn contains_key(&self, key: &N) -> bool {
        self.succ.contains_key(key)
    }

    fn get(&self, key: &N) -> Option<Self::Value> {
        self.succ
            .get(key)
            .map(|out| UnionAtlas::new(Some(out), self.pred.get(key)))
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &'a N> + 'a> {
        Box::new(self.succ.keys())
    }

    fn copy(&self) -> Self::Plain {
        self.items()
            .into_iter()
            .map(|(k, v)| (k.clone(), v.copy()))
            .collect()
    }
}

/// Union of one node's successor and predecessor multigraph atlases
#[derive(Clone, Copy)]
pub struct UnionMultiInner<'a, N: NodeId> {
    succ: Option<&'a Atlas<N, KeyMap>>,
    pred: Option<&'a Atlas<N, KeyMap>>,
}

impl<'a, N: NodeId> UnionMultiInner<'a, N> {
    pub fn new(succ: Option<&'a Atlas<N, KeyMap>>, pred: Option<&'a Atlas<N, KeyMap>>) -> Self {
        Self { succ, pred }
    }
}

impl<'a, N: NodeId + 'a> Mapping<'a> for UnionMultiInner<'a, N> {
    type Key = N;
    type Value = UnionAtlas<'a, EdgeKey, AttrDict>;
    type Plain = IndexMap<N, IndexMap<EdgeKey, AttrMap>>;

    fn len(&self) -> usize {
        self.keys().count()
    }

    fn contains_key(&self, key: &N) -> bool {
        self.succ.is_some_and(|m| m.contains_key(key)) || self.pred.is_some_and(|m| m.contains_key(key))
    }

    fn get(&self, key: &N) -> Option<Self::Value> {
        if !self.contains_key(key) {
            return None;
        }
        Some(UnionAtlas::new(
            self.succ.and_then(|m| m.get(key)),
            self.pred.and_then(|m| m.get(key)),
        ))
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &'a N> + 'a> {
        union_keys(self.succ, self.pred)
    }

    fn copy(&self) -> Self::Plain {
        self.items()
            .into_iter()
            .map(|(k, v)| (k.clone(), v.copy()))
            .collect()
    }
}

/// Union of the successor and predecessor adjacency of a directed multigraph
#[derive(Clone, Copy)]
pub struct UnionMultiAdjacency<'a, N: NodeId> {
    succ: &'a Adjacency<N, KeyMap>,
    pred: &'a Adjacency<N, KeyMap>,
}

impl<'a, N: NodeId> UnionMultiAdjacency<'a, N> {
    pub fn new(succ: &'a Adjacency<N, KeyMap>, pred: &'a Adjacency<N, KeyMap>) -> Self {
        Self { succ, pred }
    }
}

impl<'a, N: NodeId + 'a> Mapping<'a> for UnionMultiAdjacency<'a, N> {
    type Key = N;
    type Value = UnionMultiInner<'a, N>;
    type Plain = IndexMap<N, IndexMap<N, IndexMap<EdgeKey, AttrMap>>>;

    fn len(&self) -> usize {
        self.succ.len()
    }

    fn contains_key(&self, key: &N) -> bool {
        self.succ.contains_key(key)
    }

    fn get(&self, key: &N) -> Option<Self::Value> {
        self.succ
            .get(key)
            .map(|out| UnionMultiInner::new(Some(out), self.pred.get(key)))
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &'a N> + 'a> {
        Box::new(self.succ.keys())
    }

    fn copy(&self) -> Self::Plain {
        self.items()
            .into_iter()
            .map(|(k, v)| (k.clone(), v.copy()))
            .collect()
    }
}

/// Atlas showing only the keys accepted by a predicate
pub struct FilterAtlas<'a, K, V> {
    atlas: &'a FxIndexMap<K, V>,
    keep: NodePredicate<'a, K>,
}

impl<'a, K, V> FilterAtlas<'a, K, V> {
    pub fn new(atlas: &'a FxIndexMap<K, V>, keep: NodePredicate<'a, K>) -> Self {
        Self { atlas, keep }
    }
}

impl<'a, K, V> Clone for FilterAtlas<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            atlas: self.atlas,
            keep: self.keep.clone(),
        }
    }
}

impl<'a, K: NodeId + 'a, V: ToPlain + 'a> Mapping<'a> for FilterAtlas<'a, K, V> {
    type Key = K;
    type Value = &'a V;
    type Plain = IndexMap<K, V::Plain>;

    /// Number of keys passing the filter
    fn len(&self) -> usize {
        self.keys().count()
    }

    fn contains_key(&self, key: &K) -> bool {
        self.atlas.contains_key(key) && (self.keep)(key)
    }

    fn get(&self, key: &K) -> Option<&'a V> {
        if (self.keep)(key) {
            self.atlas.get(key)
        } else {
            None
        }
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &'a K> + 'a> {
        let keep = self.keep.clone();
        Box::new(self.atlas.keys().filter(move |k| keep(*k)))
    }

    fn copy(&self) -> Self::Plain {
        self.items()
            .into_iter()
            .map(|(k, v)| (k.clone(), v.to_plain()))
            .collect()
    }
}

/// Simple-graph adjacency restricted by node and edge predicates
pub struct FilterAdjacency<'a, N: NodeId> {
    adj: &'a Adjacency<N, AttrDict>,
    node_ok: NodePredicate<'a, N>,
    edge_ok: EdgePredicate<'a, N>,
}

impl<'a, N: NodeId> FilterAdjacency<'a, N> {
    pub fn new(
        adj: &'a Adjacency<N, AttrDict>,
        node_ok: NodePredicate<'a, N>,
        edge_ok: EdgePredicate<'a, N>,
    ) -> Self {
        Self { adj, node_ok, edge_ok }
    }
}

impl<'a, N: NodeId + 'a> Mapping<'a> for FilterAdjacency<'a, N> {
    type Key = N;
    type Value = FilterAtlas<'a, N, AttrDict>;
    type Plain = IndexMap<N, IndexMap<N, AttrMap>>;

    fn len(&self) -> usize {
        self.keys().count()
    }

    fn contains_key(&self, key: &N) -> bool {
        self.adj.contains_key(key) && (self.node_ok)(key)
    }

    fn get(&self, key: &N) -> Option<Self::Value> {
        if !(self.node_ok)(key) {
            return None;
        }
        let nbrs = self.adj.get(key)?;
        let node_ok = self.node_ok.clone();
        let edge_ok = self.edge_ok.clone();
        let u = key.clone();
        let keep = node_predicate(move |v: &N| node_ok(v) && edge_ok(&u, v, None));
        Some(FilterAtlas::new(nbrs, keep))
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &'a N> + 'a> {
        let node_ok = self.node_ok.clone();
        Box::new(self.adj.keys().filter(move |n| node_ok(*n)))
    }

    fn copy(&self) -> Self::Plain {
        self.items()
            .into_iter()
            .map(|(k, v)| (k.clone(), v.copy()))
            .collect()
    }
}

/// One node's multigraph neighbors, restricted by node and edge predicates
pub struct FilterMultiInner<'a, N: NodeId> {
    atlas: &'a Atlas<N, KeyMap>,
    node_ok: NodePredicate<'a, N>,
    edge_ok: InnerEdgePredicate<'a, N>,
}

impl<'a, N: NodeId + 'a> FilterMultiInner<'a, N> {
    fn visible(&self, nbr: &N, keys: &KeyMap) -> bool {
        (self.node_ok)(nbr) && keys.keys().any(|k| (self.edge_ok)(nbr, k))
    }
}

impl<'a, N: NodeId + 'a> Mapping<'a> for FilterMultiInner<'a, N> {
    type Key = N;
    type Value = FilterAtlas<'a, EdgeKey, AttrDict>;
    type Plain = IndexMap<N, IndexMap<EdgeKey, AttrMap>>;

    fn len(&self) -> usize {
        self.keys().count()
    }

    fn contains_key(&self, key: &N) -> bool {
        self.atlas.get(key).is_some_and(|keys| self.visible(key, keys))
    }

    fn get(&self, key: &N) -> Option<Self::Value> {
        let keys = self.atlas.get(key)?;
        if !self.visible(key, keys) {
            return None;
        }
        let edge_ok = self.edge_ok.clone();
        let nbr = key.clone();
        Some(FilterAtlas::new(keys, node_predicate(move |k: &EdgeKey| edge_ok(&nbr, k))))
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &'a N> + 'a> {
        let node_ok = self.node_ok.clone();
        let edge_ok = self.edge_ok.clone();
        Box::new(
            self.atlas
                .iter()
                .filter(move |(nbr, keys)| node_ok(*nbr) && keys.keys().any(|k| edge_ok(*nbr, k)))
                .map(|(nbr, _)| nbr),
        )
    }

    fn copy(&self) -> Self::Plain {
        self.items()
            .into_iter()
            .map(|(k, v)| (k.clone(), v.copy()))
            .collect()
    }
}

/// Multigraph adjacency restricted by node and edge predicates
pub struct FilterMultiAdjacency<'a, N: NodeId> {
    adj: &'a Adjacency<N, KeyMap>,
    node_ok: NodePredicate<'a, N>,
    edge_ok: EdgePredicate<'a, N>,
}

impl<'a, N: NodeId> FilterMultiAdjacency<'a, N> {
    pub fn new(
        adj: &'a Adjacency<N, KeyMap>,
        node_ok: NodePredicate<'a, N>,
        edge_ok: EdgePredicate<'a, N>,
    ) -> Self {
        Self { adj, node_ok, edge_ok }
    }
}

impl<'a, N: NodeId + 'a> Mapping<'a> for FilterMultiAdjacency<'a, N> {
    type Key = N;
    type Value = FilterMultiInner<'a, N>;
    type Plain = IndexMap<N, IndexMap<N, IndexMap<EdgeKey, AttrMap>>>;

    fn len(&self) -> usize {
        self.keys().count()
    }

    fn contains_key(&self, key: &N) -> bool {
        self.adj.contains_key(key) && (self.node_ok)(key)
    }

    fn get(&self, key: &N) -> Option<Self::Value> {
        if !(self.node_ok)(key) {
            return None;
        }
        let atlas = self.adj.get(key)?;
        let edge_ok = self.edge_ok.clone();
        let u = key.clone();
        Some(FilterMultiInner {
            atlas,
            node_ok: self.node_ok.clone(),
            edge_ok: inner_edge_predicate(move |v: &N, k: &EdgeKey| edge_ok(&u, v, Some(k))),
        })
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &'a N> + 'a> {
        let node_ok = self.node_ok.clone();
        Box::new(self.adj.keys().filter(move |n| node_ok(*n)))
    }

    fn copy(&self) -> Self::Plain {
        self.items()
            .into_iter()
            .map(|(k, v)| (k.clone(), v.copy()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::attr::{attrs, AttrValue};
    use crate::graph::filters::{hide_edges, no_edge_filter, show_multiedges, show_nodes};
    use crate::graph::store::AdjacencyStore;

    fn path_store() -> AdjacencyStore<u32, AttrDict> {
        let mut store = AdjacencyStore::new(false);
        for i in 0..4 {
            store.add_simple_edge(i, i + 1, attrs([("weight", i as i64)]));
        }
        store
    }

    #[test]
    fn test_atlas_view_reads_through() {
        let store = path_store();
        let view = AtlasView::new(&store.succ()[&1]);
        assert_eq!(view.len(), 2);
        assert!(view.contains_key(&0));
        assert_eq!(view.keys().copied().collect::<Vec<_>>(), vec![0, 2]);
        assert!(view.lookup(&3).unwrap_err().is_not_found());
        assert_eq!(view.copy()[&2]["weight"], AttrValue::Integer(1));
    }

    #[test]
    fn test_adjacency_view_nested_lookup() {
        let store = path_store();
        let adj = AdjacencyView::new(store.succ());
        assert_eq!(adj.len(), 5);
        let inner = adj.get(&2).unwrap();
        assert_eq!(inner.get(&3).unwrap().get_number("weight"), Some(2.0));
        assert!(adj.get(&9).is_none());
    }

    #[test]
    fn test_copy_is_detached() {
        let store = path_store();
        let adj = AdjacencyView::new(store.succ());
        let mut plain = adj.copy();
        plain[&0][&1].insert("weight".to_string(), 100.into());
        assert_eq!(store.entry(&0, &1).unwrap().get_number("weight"), Some(0.0));
    }

    #[test]
    fn test_filter_adjacency_len_and_iteration() {
        let store = path_store();
        let adj = FilterAdjacency::new(store.succ(), show_nodes(vec![0, 1, 2]), no_edge_filter());
        assert_eq!(adj.len(), 3);
        assert_eq!(adj.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
        let nbrs = adj.get(&2).unwrap();
        assert_eq!(nbrs.len(), 1);
        assert_eq!(nbrs.keys().copied().collect::<Vec<_>>(), vec![1]);
        assert!(adj.get(&3).is_none());
        assert!(!nbrs.contains_key(&3));
    }

    #[test]
    fn test_filter_adjacency_hides_edges_both_ways() {
        let store = path_store();
        let adj = FilterAdjacency::new(
            store.succ(),
            crate::graph::filters::no_filter(),
            hide_edges(vec![(1, 2)], false),
        );
        assert!(!adj.get(&1).unwrap().contains_key(&2));
        assert!(!adj.get(&2).unwrap().contains_key(&1));
        assert_eq!(adj.get(&1).unwrap().len(), 1);
    }

    #[test]
    fn test_union_atlas_counts_distinct_keys() {
        let mut store: AdjacencyStore<&str, AttrDict> = AdjacencyStore::new(true);
        store.add_simple_edge("a", "b", attrs([("side", "out")]));
        store.add_simple_edge("b", "a", attrs([("side", "in")]));
        store.add_simple_edge("c", "a", AttrMap::new());

        let union = UnionAdjacency::new(store.succ(), store.pred());
        let around_a = union.get(&"a").unwrap();
        assert_eq!(around_a.len(), 2);
        assert_eq!(around_a.keys().copied().collect::<Vec<_>>(), vec!["b", "c"]);
        assert_eq!(around_a.get(&"b").unwrap().get("side"), Some("out".into()));
    }

    #[test]
    fn test_multi_views() {
        let mut store: AdjacencyStore<u32, KeyMap> = AdjacencyStore::new(true);
        store.add_keyed_edge(1, 2, None, AttrMap::new());
        store.add_keyed_edge(1, 2, None, AttrMap::new());
        store.add_keyed_edge(2, 1, None, AttrMap::new());

        let multi = MultiAdjacencyView::new(store.succ());
        assert_eq!(multi.get(&1).unwrap().get(&2).unwrap().len(), 2);

        let union = UnionMultiAdjacency::new(store.succ(), store.pred());
        let keys = union.get(&1).unwrap().get(&2).unwrap();
        assert_eq!(keys.len(), 2);

        let filtered = FilterMultiAdjacency::new(
            store.succ(),
            crate::graph::filters::no_filter(),
            show_multiedges(vec![(1, 2, EdgeKey(1))], true),
        );
        let inner = filtered.get(&1).unwrap();
        assert_eq!(inner.len(), 1);
        assert_eq!(inner.get(&2).unwrap().keys().copied().collect::<Vec<_>>(), vec![EdgeKey(1)]);
        assert_eq!(filtered.get(&2).unwrap().len(), 0);
    }
}
