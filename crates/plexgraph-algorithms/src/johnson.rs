//! Johnson's all-pairs shortest paths
//!
//! One Bellman-Ford pass computes node potentials; Dijkstra then runs from
//! every node over the reweighted, non-negative edges.

use crate::bellman_ford::potentials;
use crate::common::{NodeId, Reweighted, WeightedAdjacency};
use crate::dijkstra::dijkstra_multisource;
use crate::error::PathResult;
use indexmap::IndexMap;
use tracing::debug;

/// All-pairs paths and their lengths in the original weights
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JohnsonResult<N: NodeId> {
    pub paths: IndexMap<N, IndexMap<N, Vec<N>>>,
    pub distances: IndexMap<N, IndexMap<N, f64>>,
}

pub fn johnson<G: WeightedAdjacency>(graph: &G) -> PathResult<JohnsonResult<G::Node>> {
    let h = potentials(graph)?;
    debug!(nodes = h.len(), "johnson potentials computed");

    let reweighted = Reweighted::new(graph, &h);
    let mut paths = IndexMap::new();
    let mut distances = IndexMap::new();

    for source in graph.nodes() {
        let search = dijkstra_multisource(&reweighted, std::slice::from_ref(&source), None, None)?;
        let h_source = h.get(&source).copied().unwrap_or(0.0);
        let lengths = search
            .dist
            .iter()
            .map(|(t, d)| (t.clone(), d - h_source + h.get(t).copied().unwrap_or(0.0)))
            .collect();
        paths.insert(source.clone(), search.paths());
        distances.insert(source, lengths);
    }

    Ok(JohnsonResult { paths, distances })
}
