//! Weighted shortest paths over graphs and graph views
//!
//! Every function takes anything implementing [`GraphRef`] and a weight
//! choice: an attribute name (`"weight"`), a [`Weight`], or
//! `Weight::default()`. Searches run in the `plexgraph-algorithms` engine.
//!
//! Unreachable targets fail with [`GraphError::NoPath`]; negative cycles with
//! [`GraphError::Unbounded`]. A Dijkstra search that meets a negative edge
//! fails with [`GraphError::ContradictoryPaths`].

use super::weight::{Weight, Weighted};
use crate::error::{node_not_found, GraphError, GraphResult};
use crate::graph::GraphRef;
use indexmap::IndexMap;
use plexgraph_algorithms as engine;
use plexgraph_algorithms::{ShortestPaths, WeightedAdjacency};
use std::fmt::Debug;
use tracing::debug;

/// Distances and paths from a search, keyed by reached node
pub type DistancesAndPaths<N> = (IndexMap<N, f64>, IndexMap<N, Vec<N>>);

/// Every tied-optimal predecessor, and distances, keyed by reached node
pub type PredecessorsAndDistances<N> = (IndexMap<N, Vec<N>>, IndexMap<N, f64>);

fn no_path<N: Debug>(target: &N) -> GraphError {
    GraphError::NoPath(format!("No path to {:?}.", target))
}

fn ensure_node<G: GraphRef>(graph: &G, node: &G::Node) -> GraphResult<()> {
    if graph.has_node(node) {
        Ok(())
    } else {
        Err(node_not_found(node))
    }
}

fn dijkstra_search<G: GraphRef>(
    weighted: &Weighted<'_, G>,
    sources: &[G::Node],
    target: Option<&G::Node>,
    cutoff: Option<f64>,
) -> GraphResult<ShortestPaths<G::Node>> {
    Ok(engine::dijkstra_multisource(weighted, sources, target, cutoff)?)
}

/// Length and path to `target` from a finished search
fn reached<N: engine::NodeId>(search: &ShortestPaths<N>, target: &N) -> GraphResult<(f64, Vec<N>)> {
    match (search.distance(target), search.path_to(target)) {
        (Some(length), Some(path)) => Ok((length, path)),
        _ => Err(no_path(target)),
    }
}

fn split<N: engine::NodeId>(search: ShortestPaths<N>) -> DistancesAndPaths<N> {
    let paths = search.paths();
    (search.dist, paths)
}

/// Shortest weighted path from `source` to `target`.
///
/// ```
/// use plexgraph::prelude::*;
/// use plexgraph::algo::dijkstra_path;
///
/// let mut g: Graph<u32> = Graph::new();
/// g.add_edges_from((0..4).map(|i| (i, i + 1)));
/// assert_eq!(dijkstra_path(&g, &0, &4, "weight").unwrap(), vec![0, 1, 2, 3, 4]);
/// ```
pub fn dijkstra_path<G: GraphRef>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<Vec<G::Node>> {
    let weighted = Weighted::new(graph, weight);
    let search = dijkstra_search(&weighted, std::slice::from_ref(source), Some(target), None)?;
    reached(&search, target).map(|(_, path)| path)
}

/// Length of the shortest weighted path from `source` to `target`
pub fn dijkstra_path_length<G: GraphRef>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<f64> {
    ensure_node(graph, source)?;
    if source == target {
        return Ok(0.0);
    }
    let weighted = Weighted::new(graph, weight);
    let search = dijkstra_search(&weighted, std::slice::from_ref(source), Some(target), None)?;
    search.distance(target).ok_or_else(|| no_path(target))
}

/// Distances and paths from `source` to every node within `cutoff`
pub fn single_source_dijkstra<G: GraphRef>(
    graph: &G,
    source: &G::Node,
    cutoff: Option<f64>,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<DistancesAndPaths<G::Node>> {
    multi_source_dijkstra(graph, std::slice::from_ref(source), cutoff, weight)
}

/// Shortest paths from `source` to every node within `cutoff`
pub fn single_source_dijkstra_path<G: GraphRef>(
    graph: &G,
    source: &G::Node,
    cutoff: Option<f64>,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<IndexMap<G::Node, Vec<G::Node>>> {
    single_source_dijkstra(graph, source, cutoff, weight).map(|(_, paths)| paths)
}

/// Distances from `source` to every node within `cutoff`
pub fn single_source_dijkstra_path_length<G: GraphRef>(
    graph: &G,
    source: &G::Node,
    cutoff: Option<f64>,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<IndexMap<G::Node, f64>> {
    single_source_dijkstra(graph, source, cutoff, weight).map(|(dist, _)| dist)
}

/// Distances and paths from the nearest of `sources`.
///
/// Every source starts at distance zero; each node is attributed to the
/// source whose frontier settles it first.
pub fn multi_source_dijkstra<G: GraphRef>(
    graph: &G,
    sources: &[G::Node],
    cutoff: Option<f64>,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<DistancesAndPaths<G::Node>> {
    let weighted = Weighted::new(graph, weight);
    dijkstra_search(&weighted, sources, None, cutoff).map(split)
}

/// Shortest path to each node from its nearest source
pub fn multi_source_dijkstra_path<G: GraphRef>(
    graph: &G,
    sources: &[G::Node],
    cutoff: Option<f64>,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<IndexMap<G::Node, Vec<G::Node>>> {
    multi_source_dijkstra(graph, sources, cutoff, weight).map(|(_, paths)| paths)
}

/// Distance to each node from its nearest source
pub fn multi_source_dijkstra_path_length<G: GraphRef>(
    graph: &G,
    sources: &[G::Node],
    cutoff: Option<f64>,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<IndexMap<G::Node, f64>> {
    multi_source_dijkstra(graph, sources, cutoff, weight).map(|(dist, _)| dist)
}

/// Length and path from the nearest of `sources` to `target`
pub fn multi_source_dijkstra_to<G: GraphRef>(
    graph: &G,
    sources: &[G::Node],
    target: &G::Node,
    cutoff: Option<f64>,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<(f64, Vec<G::Node>)> {
    let weighted = Weighted::new(graph, weight);
    let search = dijkstra_search(&weighted, sources, Some(target), cutoff)?;
    reached(&search, target)
}

/// All tied-optimal predecessors and the distance of every reached node
pub fn dijkstra_predecessor_and_distance<G: GraphRef>(
    graph: &G,
    source: &G::Node,
    cutoff: Option<f64>,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<PredecessorsAndDistances<G::Node>> {
    let weighted = Weighted::new(graph, weight);
    let search = dijkstra_search(&weighted, std::slice::from_ref(source), None, cutoff)?;
    Ok(predecessors_of_reached(search))
}

fn predecessors_of_reached<N: engine::NodeId>(search: ShortestPaths<N>) -> PredecessorsAndDistances<N> {
    let ShortestPaths { dist, mut pred, .. } = search;
    pred.retain(|node, _| dist.contains_key(node));
    (pred, dist)
}

/// Distances and paths between every pair of nodes
pub fn all_pairs_dijkstra<G: GraphRef>(
    graph: &G,
    cutoff: Option<f64>,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<IndexMap<G::Node, DistancesAndPaths<G::Node>>> {
    let weighted = Weighted::new(graph, weight);
    let nodes = weighted.nodes();
    debug!(nodes = nodes.len(), "all-pairs dijkstra");
    nodes
        .into_iter()
        .map(|source| {
            let search = dijkstra_search(&weighted, std::slice::from_ref(&source), None, cutoff)?;
            Ok((source, split(search)))
        })
        .collect()
}

pub fn all_pairs_dijkstra_path<G: GraphRef>(
    graph: &G,
    cutoff: Option<f64>,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<IndexMap<G::Node, IndexMap<G::Node, Vec<G::Node>>>> {
    let all = all_pairs_dijkstra(graph, cutoff, weight)?;
    Ok(all.into_iter().map(|(n, (_, paths))| (n, paths)).collect())
}

/// Distances between every ordered pair, one search per node
pub fn all_pairs_dijkstra_path_length<G: GraphRef>(
    graph: &G,
    cutoff: Option<f64>,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<IndexMap<G::Node, IndexMap<G::Node, f64>>> {
    let all = all_pairs_dijkstra(graph, cutoff, weight)?;
    Ok(all.into_iter().map(|(n, (dist, _))| (n, dist)).collect())
}

/// Shortest path by searching from both ends at once
pub fn bidirectional_dijkstra<G: GraphRef>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<(f64, Vec<G::Node>)> {
    let weighted = Weighted::new(graph, weight);
    Ok(engine::bidirectional_dijkstra(&weighted, source, target)?)
}

/// Bellman-Ford from one source, after the checks every entry point shares
fn bellman_ford_search<G: GraphRef>(
    weighted: &Weighted<'_, G>,
    source: &G::Node,
    target: Option<&G::Node>,
    cutoff: Option<f64>,
) -> GraphResult<ShortestPaths<G::Node>> {
    if !weighted.contains(source) {
        return Err(node_not_found(source));
    }
    if engine::has_negative_self_loop(weighted) {
        return Err(engine::PathError::NegativeCycle.into());
    }
    if weighted.node_count() == 1 {
        return Ok(ShortestPaths {
            dist: IndexMap::from([(source.clone(), 0.0)]),
            pred: IndexMap::from([(source.clone(), Vec::new())]),
            sources: vec![source.clone()],
        });
    }
    Ok(engine::bellman_ford(weighted, std::slice::from_ref(source), target, cutoff)?)
}

/// Predecessors and distances from `source`; negative weights allowed.
///
/// With `target` set the search prunes candidates that cannot beat the best
/// distance to the target found so far.
pub fn bellman_ford_predecessor_and_distance<G: GraphRef>(
    graph: &G,
    source: &G::Node,
    target: Option<&G::Node>,
    cutoff: Option<f64>,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<PredecessorsAndDistances<G::Node>> {
    let weighted = Weighted::new(graph, weight);
    let search = bellman_ford_search(&weighted, source, target, cutoff)?;
    Ok(predecessors_of_reached(search))
}

/// Shortest path allowing negative weights; `Unbounded` on a negative cycle
pub fn bellman_ford_path<G: GraphRef>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<Vec<G::Node>> {
    single_source_bellman_ford_to(graph, source, target, weight).map(|(_, path)| path)
}

pub fn bellman_ford_path_length<G: GraphRef>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<f64> {
    ensure_node(graph, source)?;
    if source == target {
        return Ok(0.0);
    }
    single_source_bellman_ford_to(graph, source, target, weight).map(|(length, _)| length)
}

/// Length and path from `source` to `target`; negative weights allowed
pub fn single_source_bellman_ford_to<G: GraphRef>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<(f64, Vec<G::Node>)> {
    ensure_node(graph, source)?;
    if source == target {
        return Ok((0.0, vec![source.clone()]));
    }
    let weighted = Weighted::new(graph, weight);
    let search = bellman_ford_search(&weighted, source, Some(target), None)?;
    reached(&search, target)
}

/// Distances and paths from `source`, negative weights allowed
pub fn single_source_bellman_ford<G: GraphRef>(
    graph: &G,
    source: &G::Node,
    cutoff: Option<f64>,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<DistancesAndPaths<G::Node>> {
    let weighted = Weighted::new(graph, weight);
    bellman_ford_search(&weighted, source, None, cutoff).map(split)
}

pub fn single_source_bellman_ford_path<G: GraphRef>(
    graph: &G,
    source: &G::Node,
    cutoff: Option<f64>,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<IndexMap<G::Node, Vec<G::Node>>> {
    single_source_bellman_ford(graph, source, cutoff, weight).map(|(_, paths)| paths)
}

pub fn single_source_bellman_ford_path_length<G: GraphRef>(
    graph: &G,
    source: &G::Node,
    cutoff: Option<f64>,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<IndexMap<G::Node, f64>> {
    single_source_bellman_ford(graph, source, cutoff, weight).map(|(dist, _)| dist)
}

/// Bellman-Ford paths from every node
pub fn all_pairs_bellman_ford_path<G: GraphRef>(
    graph: &G,
    cutoff: Option<f64>,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<IndexMap<G::Node, IndexMap<G::Node, Vec<G::Node>>>> {
    let weighted = Weighted::new(graph, weight);
    weighted
        .nodes()
        .into_iter()
        .map(|source| {
            let search = bellman_ford_search(&weighted, &source, None, cutoff)?;
            Ok((source, search.paths()))
        })
        .collect()
}

pub fn all_pairs_bellman_ford_path_length<G: GraphRef>(
    graph: &G,
    cutoff: Option<f64>,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<IndexMap<G::Node, IndexMap<G::Node, f64>>> {
    let weighted = Weighted::new(graph, weight);
    weighted
        .nodes()
        .into_iter()
        .map(|source| {
            let search = bellman_ford_search(&weighted, &source, None, cutoff)?;
            Ok((source, search.dist))
        })
        .collect()
}

/// Parent tree and distances from `source` by Goldberg-Radzik
pub fn goldberg_radzik<G: GraphRef>(
    graph: &G,
    source: &G::Node,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<(IndexMap<G::Node, Option<G::Node>>, IndexMap<G::Node, f64>)> {
    let weighted = Weighted::new(graph, weight);
    let result = engine::goldberg_radzik(&weighted, source)?;
    Ok((result.pred, result.dist))
}

/// Whether the graph contains a negative cycle anywhere
pub fn negative_edge_cycle<G: GraphRef>(graph: &G, weight: impl Into<Weight<G::Node>>) -> GraphResult<bool> {
    let weighted = Weighted::new(graph, weight);
    Ok(engine::negative_edge_cycle(&weighted)?)
}

/// Shortest paths between every ordered pair; negative weights allowed.
///
/// Weighing by attribute requires the attribute on every edge.
///
/// ```
/// use plexgraph::prelude::*;
/// use plexgraph::algo::johnson;
///
/// let mut g: DiGraph<&str> = DiGraph::new();
/// g.add_weighted_edges_from(
///     vec![("0", "3", 3.0), ("0", "1", -5.0), ("0", "2", 2.0), ("1", "2", 4.0), ("2", "3", 1.0)],
///     "weight",
/// );
/// let paths = johnson(&g, "weight").unwrap();
/// assert_eq!(paths[&"0"][&"2"], vec!["0", "1", "2"]);
/// ```
pub fn johnson<G: GraphRef>(
    graph: &G,
    weight: impl Into<Weight<G::Node>>,
) -> GraphResult<IndexMap<G::Node, IndexMap<G::Node, Vec<G::Node>>>> {
    if graph.number_of_nodes() == 0 {
        return Err(GraphError::PointlessConcept(
            "Johnson's algorithm is not defined for the null graph.".to_string(),
        ));
    }
    let weighted = Weighted::new(graph, weight);
    if let Some(attr) = weighted.weight().attr_name() {
        let edges = graph.edge_entries();
        let weighted_everywhere = !edges.is_empty()
            && edges
                .iter()
                .all(|(_, _, data)| data.dicts().iter().all(|d| d.contains_key(attr)));
        if !weighted_everywhere {
            return Err(GraphError::NotWeighted(attr.to_string()));
        }
    }
    debug!(nodes = graph.number_of_nodes(), "johnson all-pairs");
    Ok(engine::johnson(&weighted)?.paths)
}
