//! Goldberg-Radzik single-source shortest paths
//!
//! Alternates two phases until no distance changes: a depth-first pass that
//! orders the nodes reachable through improving edges (and spots negative
//! cycles as back edges that improved a distance), then a relaxation sweep in
//! that order.

use crate::bellman_ford::has_negative_self_loop;
use crate::common::{EdgeWeight, NodeId, WeightedAdjacency};
use crate::error::{node_not_found, PathError, PathResult};
use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

/// Predecessor tree and distances from a Goldberg-Radzik run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadzikResult<N: NodeId> {
    /// Parent of every reached node; the source maps to `None`
    pub pred: IndexMap<N, Option<N>>,
    pub dist: IndexMap<N, f64>,
}

struct Frame<N> {
    node: N,
    edges: Vec<(N, EdgeWeight)>,
    next: usize,
}

pub fn goldberg_radzik<G: WeightedAdjacency>(
    graph: &G,
    source: &G::Node,
) -> PathResult<RadzikResult<G::Node>> {
    if !graph.contains(source) {
        return Err(node_not_found(source));
    }
    if has_negative_self_loop(graph) {
        return Err(PathError::NegativeCycle);
    }

    let mut pred: IndexMap<G::Node, Option<G::Node>> = IndexMap::new();
    pred.insert(source.clone(), None);
    if graph.node_count() == 1 {
        let dist = IndexMap::from([(source.clone(), 0.0)]);
        return Ok(RadzikResult { pred, dist });
    }

    let mut d: FxHashMap<G::Node, f64> = graph
        .nodes()
        .into_iter()
        .map(|n| (n, f64::INFINITY))
        .collect();
    d.insert(source.clone(), 0.0);

    let mut relabeled: IndexSet<G::Node> = IndexSet::from([source.clone()]);
    let mut rounds = 0usize;
    while !relabeled.is_empty() {
        let to_scan = topo_sort(graph, &relabeled, &mut d, &mut pred)?;
        relabeled = relax(graph, &to_scan, &mut d, &mut pred);
        rounds += 1;
    }
    trace!(rounds, "goldberg-radzik converged");

    let dist = pred
        .keys()
        .map(|u| (u.clone(), d.get(u).copied().unwrap_or(f64::INFINITY)))
        .collect();
    Ok(RadzikResult { pred, dist })
}

fn distance<N: NodeId>(d: &FxHashMap<N, f64>, node: &N) -> f64 {
    d.get(node).copied().unwrap_or(f64::INFINITY)
}

/// Order the nodes reachable from `relabeled` through improving edges.
fn topo_sort<G: WeightedAdjacency>(
    graph: &G,
    relabeled: &IndexSet<G::Node>,
    d: &mut FxHashMap<G::Node, f64>,
    pred: &mut IndexMap<G::Node, Option<G::Node>>,
) -> PathResult<Vec<G::Node>> {
    let mut to_scan = Vec::new();
    // Improving edges on the DFS path to each visited node
    let mut neg_count: FxHashMap<G::Node, usize> = FxHashMap::default();

    for root in relabeled {
        if neg_count.contains_key(root) {
            continue;
        }
        let d_root = distance(d, root);
        let edges = graph.successors(root);
        let improves = edges
            .iter()
            .any(|(v, w)| w.is_some_and(|w| d_root + w < distance(d, v)));
        if !improves {
            continue;
        }

        neg_count.insert(root.clone(), 0);
        let mut in_stack: FxHashSet<G::Node> = FxHashSet::default();
        in_stack.insert(root.clone());
        let mut stack = vec![Frame {
            node: root.clone(),
            edges,
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let edge = frame.edges.get(frame.next).cloned();
            frame.next += 1;
            let u = frame.node.clone();

            let Some((v, weight)) = edge else {
                stack.pop();
                in_stack.remove(&u);
                to_scan.push(u);
                continue;
            };
            let Some(weight) = weight else { continue };

            let t = distance(d, &u) + weight;
            let d_v = distance(d, &v);
            // Only strictly improving edges join the DFS tree, so a zero
            // cost cycle never closes as a back edge
            if t >= d_v {
                continue;
            }
            d.insert(v.clone(), t);
            pred.insert(v.clone(), Some(u.clone()));

            let depth = neg_count.get(&u).copied().unwrap_or(0) + 1;
            match neg_count.get(&v) {
                None => {
                    neg_count.insert(v.clone(), depth);
                    in_stack.insert(v.clone());
                    let edges = graph.successors(&v);
                    stack.push(Frame {
                        node: v,
                        edges,
                        next: 0,
                    });
                }
                Some(&seen) if in_stack.contains(&v) && depth > seen => {
                    debug!(node = ?v, "negative cost cycle detected");
                    return Err(PathError::NegativeCycle);
                }
                Some(_) => {}
            }
        }
    }

    to_scan.reverse();
    Ok(to_scan)
}

/// Relax the out-edges of `to_scan` in order; returns the improved nodes.
fn relax<G: WeightedAdjacency>(
    graph: &G,
    to_scan: &[G::Node],
    d: &mut FxHashMap<G::Node, f64>,
    pred: &mut IndexMap<G::Node, Option<G::Node>>,
) -> IndexSet<G::Node> {
    let mut relabeled = IndexSet::new();
    for u in to_scan {
        let d_u = distance(d, u);
        for (v, weight) in graph.successors(u) {
            let Some(weight) = weight else { continue };
            let candidate = d_u + weight;
            if candidate < distance(d, &v) {
                d.insert(v.clone(), candidate);
                pred.insert(v.clone(), Some(u.clone()));
                relabeled.insert(v);
            }
        }
    }
    relabeled
}
