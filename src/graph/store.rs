//! Adjacency storage shared by all four graph flavours
//!
//! Nodes map to attribute dictionaries and every node owns an outer
//! successor map. Directed stores keep a mirrored predecessor map; undirected
//! stores record each edge under both endpoints. Either way both sides of an
//! edge hold the same [`AttrDict`] (or the same keyed dictionaries for
//! multigraphs), so attribute writes are visible from both ends.
//!
//! Maps are insertion ordered, so iteration follows the order in which nodes
//! and neighbors were first added.

use super::attr::{AttrDict, AttrMap};
use super::base::EdgeData;
use super::types::{EdgeKey, NodeId};
use crate::error::{edge_not_found, node_not_found, GraphError, GraphResult};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use std::fmt::Debug;
use tracing::trace;

/// Insertion-ordered map with the fast hasher
pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Parallel edges between one ordered pair of nodes, by key
pub type KeyMap = FxIndexMap<EdgeKey, AttrDict>;

/// Neighbor -> edge entry
pub type Atlas<N, E> = FxIndexMap<N, E>;

/// Node -> neighbor -> edge entry
pub type Adjacency<N, E> = FxIndexMap<N, Atlas<N, E>>;

/// Neighbors of `node` in `adj` with their edge payloads
pub(crate) fn adjacency_entries<'a, N: NodeId, E: EdgeKind>(
    adj: &'a Adjacency<N, E>,
    node: &N,
) -> Vec<(N, EdgeData<'a>)> {
    adj.get(node)
        .map(|nbrs| {
            nbrs.iter()
                .map(|(v, slot)| (v.clone(), slot.as_edge_data()))
                .collect()
        })
        .unwrap_or_default()
}

/// What an adjacency slot holds: one dictionary for simple graphs, a
/// [`KeyMap`] for multigraphs.
pub trait EdgeKind: Default + Debug + Sized + 'static {
    const MULTI: bool;

    /// Number of edges the slot stands for
    fn edge_count(&self) -> usize;

    fn has_key(&self, key: Option<&EdgeKey>) -> bool;

    fn as_edge_data(&self) -> EdgeData<'_>;

    /// Add a copy of `data` as the `u -> v` edge(s) of `store`, merging into
    /// anything already there.
    fn absorb<N: NodeId>(store: &mut AdjacencyStore<N, Self>, u: N, v: N, data: &EdgeData<'_>);

    /// Add an attribute-free `u -> v` edge
    fn link_bare<N: NodeId>(store: &mut AdjacencyStore<N, Self>, u: N, v: N, key: Option<EdgeKey>);
}

impl EdgeKind for AttrDict {
    const MULTI: bool = false;

    fn edge_count(&self) -> usize {
        1
    }

    fn has_key(&self, _key: Option<&EdgeKey>) -> bool {
        true
    }

    fn as_edge_data(&self) -> EdgeData<'_> {
        EdgeData::Single(self)
    }

    fn absorb<N: NodeId>(store: &mut AdjacencyStore<N, Self>, u: N, v: N, data: &EdgeData<'_>) {
        let mut merged = AttrMap::new();
        for dict in data.dicts() {
            merged.extend(dict.snapshot());
        }
        store.add_simple_edge(u, v, merged);
    }

    fn link_bare<N: NodeId>(store: &mut AdjacencyStore<N, Self>, u: N, v: N, _key: Option<EdgeKey>) {
        store.add_simple_edge(u, v, AttrMap::new());
    }
}

impl EdgeKind for KeyMap {
    const MULTI: bool = true;

    fn edge_count(&self) -> usize {
        self.len()
    }

    fn has_key(&self, key: Option<&EdgeKey>) -> bool {
        key.map_or(!self.is_empty(), |k| self.contains_key(k))
    }

    fn as_edge_data(&self) -> EdgeData<'_> {
        EdgeData::Multi(self.iter().collect())
    }

    fn absorb<N: NodeId>(store: &mut AdjacencyStore<N, Self>, u: N, v: N, data: &EdgeData<'_>) {
        match data {
            EdgeData::Single(dict) => {
                store.add_keyed_edge(u, v, None, dict.snapshot());
            }
            EdgeData::Multi(entries) => {
                for (key, dict) in entries {
                    store.add_keyed_edge(u.clone(), v.clone(), Some(**key), dict.snapshot());
                }
            }
        }
    }

    fn link_bare<N: NodeId>(store: &mut AdjacencyStore<N, Self>, u: N, v: N, key: Option<EdgeKey>) {
        store.add_keyed_edge(u, v, key, AttrMap::new());
    }
}

/// Node and adjacency storage
#[derive(Debug)]
pub struct AdjacencyStore<N: NodeId, E: EdgeKind> {
    directed: bool,
    nodes: FxIndexMap<N, AttrDict>,
    succ: Adjacency<N, E>,
    /// Empty for undirected stores
    pred: Adjacency<N, E>,
}

impl<N: NodeId, E: EdgeKind> AdjacencyStore<N, E> {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            nodes: FxIndexMap::default(),
            succ: FxIndexMap::default(),
            pred: FxIndexMap::default(),
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn nodes(&self) -> &FxIndexMap<N, AttrDict> {
        &self.nodes
    }

    pub fn succ(&self) -> &Adjacency<N, E> {
        &self.succ
    }

    /// Incoming adjacency; the successor map itself when undirected
    pub fn pred(&self) -> &Adjacency<N, E> {
        if self.directed {
            &self.pred
        } else {
            &self.succ
        }
    }

    pub fn contains(&self, node: &N) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert `node` if absent and return its attribute dictionary
    pub fn add_node(&mut self, node: N) -> &AttrDict {
        if !self.nodes.contains_key(&node) {
            self.succ.insert(node.clone(), Atlas::default());
            if self.directed {
                self.pred.insert(node.clone(), Atlas::default());
            }
        }
        self.nodes.entry(node).or_default()
    }

    /// Remove `node` and every incident edge
    pub fn remove_node(&mut self, node: &N) -> GraphResult<AttrDict> {
        let attrs = self
            .nodes
            .shift_remove(node)
            .ok_or_else(|| node_not_found(node))?;
        let out = self.succ.shift_remove(node).unwrap_or_default();
        if self.directed {
            for v in out.keys() {
                if let Some(back) = self.pred.get_mut(v) {
                    back.shift_remove(node);
                }
            }
            let incoming = self.pred.shift_remove(node).unwrap_or_default();
            for u in incoming.keys() {
                if let Some(fwd) = self.succ.get_mut(u) {
                    fwd.shift_remove(node);
                }
            }
        } else {
            for v in out.keys() {
                if let Some(back) = self.succ.get_mut(v) {
                    back.shift_remove(node);
                }
            }
        }
        trace!(node = ?node, degree = out.len(), "removed node");
        Ok(attrs)
    }

    /// Edge slot for `u -> v`
    pub fn entry(&self, u: &N, v: &N) -> Option<&E> {
        self.succ.get(u)?.get(v)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.succ.clear();
        self.pred.clear();
    }

    pub fn clear_edges(&mut self) {
        for nbrs in self.succ.values_mut() {
            nbrs.clear();
        }
        for nbrs in self.pred.values_mut() {
            nbrs.clear();
        }
    }

    pub fn edge_count(&self) -> usize {
        let total: usize = self
            .succ
            .values()
            .flat_map(|nbrs| nbrs.values())
            .map(E::edge_count)
            .sum();
        if self.directed {
            return total;
        }
        let loops: usize = self
            .succ
            .iter()
            .filter_map(|(u, nbrs)| nbrs.get(u))
            .map(E::edge_count)
            .sum();
        (total + loops) / 2
    }

    /// Apply `f` to the `u -> v` slot on both sides, creating it if needed
    fn with_slots(&mut self, u: &N, v: &N, mut f: impl FnMut(&mut E)) {
        if let Some(nbrs) = self.succ.get_mut(u) {
            f(nbrs.entry(v.clone()).or_default());
        }
        if self.directed {
            if let Some(nbrs) = self.pred.get_mut(v) {
                f(nbrs.entry(u.clone()).or_default());
            }
        } else if u != v {
            if let Some(nbrs) = self.succ.get_mut(v) {
                f(nbrs.entry(u.clone()).or_default());
            }
        }
    }

    /// Drop the `u -> v` slot on both sides
    fn unlink(&mut self, u: &N, v: &N) -> Option<E> {
        let slot = self.succ.get_mut(u)?.shift_remove(v)?;
        if self.directed {
            if let Some(nbrs) = self.pred.get_mut(v) {
                nbrs.shift_remove(u);
            }
        } else if u != v {
            if let Some(nbrs) = self.succ.get_mut(v) {
                nbrs.shift_remove(u);
            }
        }
        Some(slot)
    }
}

impl<N: NodeId> AdjacencyStore<N, AttrDict> {
    /// Add or update the `u -> v` edge; returns its shared dictionary
    pub fn add_simple_edge(&mut self, u: N, v: N, attrs: AttrMap) -> AttrDict {
        self.add_node(u.clone());
        self.add_node(v.clone());
        if let Some(existing) = self.entry(&u, &v) {
            let dict = existing.clone();
            dict.update(attrs);
            return dict;
        }
        let dict = AttrDict::from_map(attrs);
        self.with_slots(&u, &v, |slot| *slot = dict.clone());
        dict
    }

    pub fn remove_simple_edge(&mut self, u: &N, v: &N) -> GraphResult<AttrDict> {
        self.unlink(u, v).ok_or_else(|| edge_not_found(u, v))
    }
}

impl<N: NodeId> AdjacencyStore<N, KeyMap> {
    /// One more than the largest key currently between `u` and `v`.
    ///
    /// When the largest key is `u64::MAX` the first unused key counting up
    /// from the number of parallel edges is taken instead.
    pub fn new_edge_key(&self, u: &N, v: &N) -> EdgeKey {
        let keys = match self.entry(u, v) {
            Some(keys) => keys,
            None => return EdgeKey(0),
        };
        if let Some(next) = keys.keys().max().map_or(Some(EdgeKey(0)), |k| k.checked_next()) {
            return next;
        }
        // At most `keys.len()` keys lie at or above the start, so this ends
        let mut key = EdgeKey(keys.len() as u64);
        while keys.contains_key(&key) {
            key = EdgeKey(key.0.wrapping_add(1));
        }
        key
    }

    /// Add a parallel edge, or update the attributes of an existing key
    pub fn add_keyed_edge(&mut self, u: N, v: N, key: Option<EdgeKey>, attrs: AttrMap) -> EdgeKey {
        self.add_node(u.clone());
        self.add_node(v.clone());
        let key = key.unwrap_or_else(|| self.new_edge_key(&u, &v));
        if let Some(dict) = self.entry(&u, &v).and_then(|keys| keys.get(&key)) {
            dict.update(attrs);
            return key;
        }
        let dict = AttrDict::from_map(attrs);
        self.with_slots(&u, &v, |keys| {
            keys.insert(key, dict.clone());
        });
        key
    }

    /// Remove one parallel edge; without a key the most recently added goes
    pub fn remove_keyed_edge(
        &mut self,
        u: &N,
        v: &N,
        key: Option<EdgeKey>,
    ) -> GraphResult<(EdgeKey, AttrDict)> {
        let keys = self.entry(u, v).ok_or_else(|| edge_not_found(u, v))?;
        let key = match key {
            Some(k) if keys.contains_key(&k) => k,
            Some(k) => {
                return Err(GraphError::KeyNotFound(format!(
                    "{} for edge {:?}-{:?}",
                    k, u, v
                )))
            }
            None => match keys.keys().last() {
                Some(k) => *k,
                None => return Err(edge_not_found(u, v)),
            },
        };

        let mut removed = None;
        let mut emptied = false;
        self.with_slots(u, v, |keys| {
            if let Some(dict) = keys.shift_remove(&key) {
                removed = Some(dict);
            }
            emptied = keys.is_empty();
        });
        if emptied {
            self.unlink(u, v);
        }
        removed
            .map(|dict| (key, dict))
            .ok_or_else(|| edge_not_found(u, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::attr::attrs;

    #[test]
    fn test_undirected_edge_shares_dict() {
        let mut store: AdjacencyStore<u32, AttrDict> = AdjacencyStore::new(false);
        let dict = store.add_simple_edge(1, 2, attrs([("weight", 3)]));

        let forward = store.entry(&1, &2).unwrap();
        let backward = store.entry(&2, &1).unwrap();
        assert!(forward.ptr_eq(backward));
        assert!(forward.ptr_eq(&dict));
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn test_directed_edge_mirrors_pred() {
        let mut store: AdjacencyStore<&str, AttrDict> = AdjacencyStore::new(true);
        store.add_simple_edge("a", "b", AttrMap::new());

        assert!(store.entry(&"a", &"b").is_some());
        assert!(store.entry(&"b", &"a").is_none());
        let pred = &store.pred()[&"b"][&"a"];
        assert!(pred.ptr_eq(store.entry(&"a", &"b").unwrap()));
    }

    #[test]
    fn test_readding_edge_merges_attrs() {
        let mut store: AdjacencyStore<u32, AttrDict> = AdjacencyStore::new(false);
        store.add_simple_edge(1, 2, attrs([("a", 1)]));
        store.add_simple_edge(2, 1, attrs([("b", 2)]));
        let dict = store.entry(&1, &2).unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn test_remove_node_cascades() {
        let mut store: AdjacencyStore<u32, AttrDict> = AdjacencyStore::new(true);
        store.add_simple_edge(1, 2, AttrMap::new());
        store.add_simple_edge(3, 1, AttrMap::new());
        store.add_simple_edge(2, 3, AttrMap::new());

        store.remove_node(&1).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.pred()[&2].is_empty());
        assert!(store.succ()[&3].is_empty());
        assert_eq!(store.edge_count(), 1);
        assert!(store.remove_node(&1).unwrap_err().is_not_found());
    }

    #[test]
    fn test_keyed_edges() {
        let mut store: AdjacencyStore<u32, KeyMap> = AdjacencyStore::new(false);
        assert_eq!(store.add_keyed_edge(1, 2, None, AttrMap::new()), EdgeKey(0));
        assert_eq!(store.add_keyed_edge(2, 1, None, AttrMap::new()), EdgeKey(1));
        assert_eq!(store.add_keyed_edge(1, 2, Some(EdgeKey(7)), AttrMap::new()), EdgeKey(7));
        assert_eq!(store.new_edge_key(&1, &2), EdgeKey(8));
        assert_eq!(store.edge_count(), 3);

        let (key, _) = store.remove_keyed_edge(&1, &2, None).unwrap();
        assert_eq!(key, EdgeKey(7));
        store.remove_keyed_edge(&2, &1, Some(EdgeKey(0))).unwrap();
        assert!(matches!(
            store.remove_keyed_edge(&1, &2, Some(EdgeKey(0))),
            Err(GraphError::KeyNotFound(_))
        ));
        store.remove_keyed_edge(&1, &2, None).unwrap();
        assert!(store.entry(&1, &2).is_none());
        assert!(store.entry(&2, &1).is_none());
    }

    #[test]
    fn test_multi_self_loop_single_slot() {
        let mut store: AdjacencyStore<u32, KeyMap> = AdjacencyStore::new(false);
        store.add_keyed_edge(1, 1, None, AttrMap::new());
        store.add_keyed_edge(1, 1, None, AttrMap::new());
        assert_eq!(store.entry(&1, &1).unwrap().len(), 2);
        assert_eq!(store.edge_count(), 2);
    }

    #[test]
    fn test_clear_edges_keeps_nodes() {
        let mut store: AdjacencyStore<u32, AttrDict> = AdjacencyStore::new(true);
        store.add_simple_edge(1, 2, AttrMap::new());
        store.clear_edges();
        assert_eq!(store.len(), 2);
        assert_eq!(store.edge_count(), 0);
        store.clear();
        assert!(store.is_empty());
    }
}
