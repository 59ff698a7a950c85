//! Bidirectional Dijkstra
//!
//! Grows one frontier forward from the source and one backward from the
//! target, alternating between them, and keeps the best meeting point seen so
//! far.

use crate::common::{NodeId, WeightedAdjacency};
use crate::dijkstra::Frontier;
use crate::error::{label, PathError, PathResult};
use rustc_hash::FxHashMap;
use tracing::trace;

const FORWARD: usize = 0;
const BACKWARD: usize = 1;

/// Length and node sequence of the shortest `source -> target` path.
pub fn bidirectional_dijkstra<G: WeightedAdjacency>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
) -> PathResult<(f64, Vec<G::Node>)> {
    if !graph.contains(source) || !graph.contains(target) {
        return Err(PathError::NodeNotFound(format!(
            "Either source {} or target {} is not in G",
            label(source),
            label(target)
        )));
    }
    if source == target {
        return Ok((0.0, vec![source.clone()]));
    }

    let mut dists: [FxHashMap<G::Node, f64>; 2] = [FxHashMap::default(), FxHashMap::default()];
    let mut seen: [FxHashMap<G::Node, f64>; 2] = [FxHashMap::default(), FxHashMap::default()];
    let mut parent: [FxHashMap<G::Node, G::Node>; 2] = [FxHashMap::default(), FxHashMap::default()];
    let mut fringe = [Frontier::new(), Frontier::new()];

    seen[FORWARD].insert(source.clone(), 0.0);
    seen[BACKWARD].insert(target.clone(), 0.0);
    fringe[FORWARD].push(0.0, source.clone());
    fringe[BACKWARD].push(0.0, target.clone());

    // Best (length, meeting node) found so far
    let mut best: Option<(f64, G::Node)> = None;
    let mut dir = BACKWARD;

    while !fringe[FORWARD].is_empty() && !fringe[BACKWARD].is_empty() {
        if let (Some((length, _)), Some(f), Some(b)) = (
            best.as_ref(),
            fringe[FORWARD].peek_cost(),
            fringe[BACKWARD].peek_cost(),
        ) {
            if f + b >= *length {
                break;
            }
        }

        dir = 1 - dir;
        let Some((d, v)) = fringe[dir].pop() else { break };
        if dists[dir].contains_key(&v) {
            continue;
        }
        dists[dir].insert(v.clone(), d);
        if dists[1 - dir].contains_key(&v) {
            break;
        }

        let edges = if dir == FORWARD {
            graph.successors(&v)
        } else {
            graph.predecessors(&v)
        };
        for (w, cost) in edges {
            let Some(cost) = cost else { continue };
            let vw = d + cost;
            if let Some(&settled) = dists[dir].get(&w) {
                if vw < settled {
                    return Err(PathError::ContradictoryPaths);
                }
                continue;
            }
            if seen[dir].get(&w).is_some_and(|&known| vw >= known) {
                continue;
            }
            seen[dir].insert(w.clone(), vw);
            fringe[dir].push(vw, w.clone());
            parent[dir].insert(w.clone(), v.clone());

            if let Some(&other) = seen[1 - dir].get(&w) {
                let total = vw + other;
                if best.as_ref().map_or(true, |(length, _)| total < *length) {
                    best = Some((total, w.clone()));
                }
            }
        }
    }

    let Some((length, meet)) = best else {
        return Err(PathError::NoPath(format!(
            "No path between {} and {}.",
            label(source),
            label(target)
        )));
    };
    trace!(length, meet = ?meet, "bidirectional search met");

    let mut path = walk(&parent[FORWARD], &meet);
    path.reverse();
    let tail = walk(&parent[BACKWARD], &meet);
    path.extend(tail.into_iter().skip(1));
    Ok((length, path))
}

/// Follow parent links from `start` until a root is reached.
fn walk<N: NodeId>(parent: &FxHashMap<N, N>, start: &N) -> Vec<N> {
    let mut out = vec![start.clone()];
    let mut cur = start;
    while let Some(prev) = parent.get(cur) {
        out.push(prev.clone());
        cur = prev;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::AdjacencyList;

    #[test]
    fn test_bidirectional_path_graph() {
        let graph = AdjacencyList::from_edges(
            false,
            (0..4).map(|i| (i, i + 1, 1.0)).collect::<Vec<_>>(),
        );
        let (length, path) = bidirectional_dijkstra(&graph, &0, &4).unwrap();
        assert_eq!(length, 4.0);
        assert_eq!(path, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_bidirectional_prefers_cheaper_detour() {
        let graph = AdjacencyList::from_edges(
            true,
            vec![("s", "t", 10.0), ("s", "a", 1.0), ("a", "b", 1.0), ("b", "t", 1.0)],
        );
        let (length, path) = bidirectional_dijkstra(&graph, &"s", &"t").unwrap();
        assert_eq!(length, 3.0);
        assert_eq!(path, vec!["s", "a", "b", "t"]);
    }

    #[test]
    fn test_bidirectional_same_node() {
        let graph = AdjacencyList::from_edges(true, vec![(1, 2, 1.0)]);
        assert_eq!(bidirectional_dijkstra(&graph, &1, &1), Ok((0.0, vec![1])));
    }

    #[test]
    fn test_bidirectional_respects_direction() {
        let graph = AdjacencyList::from_edges(true, vec![(1, 2, 1.0)]);
        let result = bidirectional_dijkstra(&graph, &2, &1);
        assert!(matches!(result, Err(PathError::NoPath(_))));
    }

    #[test]
    fn test_bidirectional_missing_node() {
        let graph = AdjacencyList::from_edges(true, vec![(1, 2, 1.0)]);
        let result = bidirectional_dijkstra(&graph, &1, &7);
        assert!(matches!(result, Err(PathError::NodeNotFound(_))));
    }
}
