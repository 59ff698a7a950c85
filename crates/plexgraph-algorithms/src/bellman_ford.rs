//! Bellman-Ford with a FIFO work queue
//!
//! Handles negative weights. A node enqueued as many times as the graph has
//! nodes proves a negative cycle is reachable from the sources.

use crate::common::WeightedAdjacency;
use crate::dijkstra::ShortestPaths;
use crate::error::{node_not_found, PathError, PathResult};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Relax from `sources` until no distance improves.
///
/// With `target` set, candidates longer than the current best distance to the
/// target are pruned. Candidates longer than `cutoff` are dropped.
pub fn bellman_ford<G: WeightedAdjacency>(
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

    let n = graph.node_count();
    trace!(sources = sources.len(), nodes = n, "bellman-ford search");

    let mut dist: IndexMap<G::Node, f64> = IndexMap::new();
    let mut pred: IndexMap<G::Node, Vec<G::Node>> = IndexMap::new();
    let mut queue: VecDeque<G::Node> = VecDeque::new();
    let mut in_queue: FxHashSet<G::Node> = FxHashSet::default();
    let mut count: FxHashMap<G::Node, usize> = FxHashMap::default();

    for source in sources {
        dist.insert(source.clone(), 0.0);
        pred.insert(source.clone(), Vec::new());
        if in_queue.insert(source.clone()) {
            queue.push_back(source.clone());
        }
    }

    while let Some(u) = queue.pop_front() {
        in_queue.remove(&u);

        // A predecessor still waiting will relax this node again later
        let stale = pred
            .get(&u)
            .is_some_and(|ps| ps.iter().any(|p| in_queue.contains(p)));
        if stale {
            continue;
        }

        let Some(&dist_u) = dist.get(&u) else { continue };
        for (v, weight) in graph.successors(&u) {
            let Some(weight) = weight else { continue };
            let dist_v = dist_u + weight;

            if cutoff.is_some_and(|c| dist_v > c) {
                continue;
            }
            if let Some(t) = target {
                if dist.get(t).is_some_and(|&best| dist_v > best) {
                    continue;
                }
            }

            match dist.get(&v) {
                Some(&known) if dist_v > known => {}
                Some(&known) if dist_v == known => {
                    pred.entry(v).or_default().push(u.clone());
                }
                _ => {
                    if in_queue.insert(v.clone()) {
                        queue.push_back(v.clone());
                        let c = count.entry(v.clone()).or_insert(0);
                        *c += 1;
                        if *c >= n {
                            debug!(node = ?v, "negative cost cycle detected");
                            return Err(PathError::NegativeCycle);
                        }
                    }
                    dist.insert(v.clone(), dist_v);
                    pred.insert(v, vec![u.clone()]);
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

/// True when some node carries a self-loop of negative weight.
pub fn has_negative_self_loop<G: WeightedAdjacency>(graph: &G) -> bool {
    graph.nodes().iter().any(|u| {
        graph
            .successors(u)
            .iter()
            .any(|(v, w)| v == u && w.is_some_and(|w| w < 0.0))
    })
}

/// Whether any negative cycle exists anywhere in the graph.
///
/// Every node starts at distance zero, which is the same as relaxing from a
/// virtual source joined to all nodes, without touching the graph.
pub fn negative_edge_cycle<G: WeightedAdjacency>(graph: &G) -> PathResult<bool> {
    if has_negative_self_loop(graph) {
        return Ok(true);
    }
    let nodes = graph.nodes();
    if nodes.is_empty() {
        return Ok(false);
    }
    match bellman_ford(graph, &nodes, None, None) {
        Ok(_) => Ok(false),
        Err(PathError::NegativeCycle) => Ok(true),
        Err(e) => Err(e),
    }
}

/// Node potentials for reweighting: shortest distance from a virtual source
/// joined to every node by a zero-weight edge.
pub fn potentials<G: WeightedAdjacency>(graph: &G) -> PathResult<FxHashMap<G::Node, f64>> {
    let nodes = graph.nodes();
    if nodes.is_empty() {
        return Ok(FxHashMap::default());
    }
    let result = bellman_ford(graph, &nodes, None, None)?;
    Ok(result.dist.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::AdjacencyList;

    fn cycle(n: u32, directed: bool) -> AdjacencyList<u32> {
        AdjacencyList::from_edges(directed, (0..n).map(|i| (i, (i + 1) % n, 1.0)).collect::<Vec<_>>())
    }

    #[test]
    fn test_bellman_ford_negative_edge() {
        let graph = AdjacencyList::from_edges(
            true,
            vec![(0, 1, 4.0), (0, 2, 2.0), (2, 1, -3.0), (1, 3, 1.0)],
        );
        let result = bellman_ford(&graph, &[0], None, None).unwrap();
        assert_eq!(result.distance(&1), Some(-1.0));
        assert_eq!(result.distance(&3), Some(0.0));
        assert_eq!(result.path_to(&3), Some(vec![0, 2, 1, 3]));
    }

    #[test]
    fn test_bellman_ford_detects_negative_cycle() {
        let mut graph = cycle(5, true);
        graph.add_edge(1, 2, -7.0);
        let result = bellman_ford(&graph, &[0], None, None);
        assert_eq!(result, Err(PathError::NegativeCycle));
        assert_eq!(negative_edge_cycle(&graph), Ok(true));
    }

    #[test]
    fn test_bellman_ford_undirected_negative_edge_is_a_cycle() {
        let mut graph = cycle(5, false);
        graph.add_edge(1, 2, -3.0);
        assert_eq!(bellman_ford(&graph, &[0], None, None), Err(PathError::NegativeCycle));
    }

    #[test]
    fn test_negative_edge_cycle_false_without_cycle() {
        let graph = cycle(5, true);
        assert_eq!(negative_edge_cycle(&graph), Ok(false));

        let empty: AdjacencyList<u32> = AdjacencyList::new(true);
        assert_eq!(negative_edge_cycle(&empty), Ok(false));
    }

    #[test]
    fn test_negative_self_loop() {
        let mut graph = cycle(3, true);
        graph.add_edge(2, 2, -1.0);
        assert!(has_negative_self_loop(&graph));
        assert_eq!(negative_edge_cycle(&graph), Ok(true));
    }

    #[test]
    fn test_bellman_ford_tied_predecessors() {
        let graph = AdjacencyList::from_edges(
            true,
            vec![(0, 1, 1.0), (0, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0)],
        );
        let result = bellman_ford(&graph, &[0], None, None).unwrap();
        assert_eq!(result.pred[&3], vec![1, 2]);
        assert_eq!(result.distance(&3), Some(2.0));
    }

    #[test]
    fn test_potentials_cover_every_node() {
        let graph = AdjacencyList::from_edges(
            true,
            vec![(0, 3, 3.0), (0, 1, -5.0), (0, 2, 2.0), (1, 2, 4.0), (2, 3, 1.0)],
        );
        let h = potentials(&graph).unwrap();
        assert_eq!(h[&0], 0.0);
        assert_eq!(h[&1], -5.0);
        assert_eq!(h[&2], -1.0);
        assert_eq!(h[&3], 0.0);
    }
}
