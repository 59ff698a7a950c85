//! Binary graph operators
//!
//! Both operands share one container type, so mixing simple graphs with
//! multigraphs or directed with undirected graphs is rejected at compile
//! time. Every operator returns a new graph; nothing is shared with the
//! inputs.

use super::relabel::convert_node_labels_to_integers;
use crate::error::{GraphError, GraphResult};
use crate::graph::{AttrMap, Direction, EdgeKind, GraphRef, Network, NodeId};
use tracing::debug;

fn merged_graph_attrs<N: NodeId, E: EdgeKind, D: Direction>(
    g: &Network<N, E, D>,
    h: &Network<N, E, D>,
) -> AttrMap {
    let mut attrs = g.graph_attrs().clone();
    attrs.extend(h.graph_attrs().clone());
    attrs
}

/// Nodes of `h` with their attributes, then every edge of `h`, merged into `out`
fn absorb_graph<N: NodeId, E: EdgeKind, D: Direction>(out: &mut Network<N, E, D>, h: &Network<N, E, D>) {
    for (node, attrs) in h.nodes_data() {
        out.add_node_with(node.clone(), attrs.snapshot());
    }
    for (u, v, data) in h.edge_entries() {
        out.absorb_edge(u, v, &data);
    }
}

fn ensure_same_nodes<N: NodeId, E: EdgeKind, D: Direction>(
    g: &Network<N, E, D>,
    h: &Network<N, E, D>,
) -> GraphResult<()> {
    if g.number_of_nodes() == h.number_of_nodes() && g.nodes().all(|n| h.has_node(n)) {
        Ok(())
    } else {
        Err(GraphError::InvalidArgument("Node sets of graphs are not equal".to_string()))
    }
}

/// Nodes and graph attributes of `g`, no edges
fn empty_copy<N: NodeId, E: EdgeKind, D: Direction>(g: &Network<N, E, D>) -> Network<N, E, D> {
    Network::from_graph_ref(g, g.graph_attrs().clone(), |_, _| false)
}

/// Edges of `from` (by key on multigraphs) whose presence in `other`
/// equals `wanted`, added attribute-free to `out`
fn copy_edges_where<N: NodeId, E: EdgeKind, D: Direction>(
    out: &mut Network<N, E, D>,
    from: &Network<N, E, D>,
    other: &Network<N, E, D>,
    wanted: bool,
) {
    for (u, v, data) in from.edge_entries() {
        for key in data.keys() {
            if other.has_edge_slot(&u, &v, key.as_ref()) == wanted {
                out.add_bare_edge(u.clone(), v.clone(), key);
            }
        }
    }
}

/// Union of two graphs with disjoint node sets.
///
/// Node, edge and graph attributes are copied; on graph-level attribute
/// conflicts `h` wins. Overlapping node sets fail with
/// [`GraphError::InvalidArgument`]; relabel first or use
/// [`disjoint_union`].
pub fn union<N: NodeId, E: EdgeKind, D: Direction>(
    g: &Network<N, E, D>,
    h: &Network<N, E, D>,
) -> GraphResult<Network<N, E, D>> {
    if h.nodes().any(|n| g.has_node(n)) {
        return Err(GraphError::InvalidArgument(
            "The node sets of G and H are not disjoint. Relabel the nodes or use disjoint_union".to_string(),
        ));
    }
    let mut out = Network::from_graph_ref(g, merged_graph_attrs(g, h), |_, _| true);
    absorb_graph(&mut out, h);
    debug!(nodes = out.number_of_nodes(), edges = out.number_of_edges(), "union built");
    Ok(out)
}

/// Union after renumbering: `g` becomes `0..len(g)`, `h` follows it
pub fn disjoint_union<N: NodeId, E: EdgeKind, D: Direction>(
    g: &Network<N, E, D>,
    h: &Network<N, E, D>,
) -> Network<usize, E, D> {
    let mut out = convert_node_labels_to_integers(g, 0);
    out.graph_attrs_mut().extend(h.graph_attrs().clone());
    absorb_graph(&mut out, &convert_node_labels_to_integers(h, g.number_of_nodes()));
    out
}

/// Graph with the nodes and edges of both `g` and `h`.
///
/// Where both graphs carry the same node or edge, attributes from `h`
/// overwrite those from `g`. Parallel edges are matched by key.
pub fn compose<N: NodeId, E: EdgeKind, D: Direction>(g: &Network<N, E, D>, h: &Network<N, E, D>) -> Network<N, E, D> {
    let mut out = Network::from_graph_ref(g, merged_graph_attrs(g, h), |_, _| true);
    absorb_graph(&mut out, h);
    out
}

/// Edges present in both graphs. Node sets must be equal.
///
/// The result has the nodes and graph attributes of `g`; edges carry no
/// attributes.
pub fn intersection<N: NodeId, E: EdgeKind, D: Direction>(
    g: &Network<N, E, D>,
    h: &Network<N, E, D>,
) -> GraphResult<Network<N, E, D>> {
    ensure_same_nodes(g, h)?;
    let mut out = empty_copy(g);
    if g.number_of_edges() <= h.number_of_edges() {
        copy_edges_where(&mut out, g, h, true);
    } else {
        copy_edges_where(&mut out, h, g, true);
    }
    Ok(out)
}

/// Edges of `g` missing from `h`. Node sets must be equal.
pub fn difference<N: NodeId, E: EdgeKind, D: Direction>(
    g: &Network<N, E, D>,
    h: &Network<N, E, D>,
) -> GraphResult<Network<N, E, D>> {
    ensure_same_nodes(g, h)?;
    let mut out = empty_copy(g);
    copy_edges_where(&mut out, g, h, false);
    Ok(out)
}

/// Edges in exactly one of the graphs. Node sets must be equal.
pub fn symmetric_difference<N: NodeId, E: EdgeKind, D: Direction>(
    g: &Network<N, E, D>,
    h: &Network<N, E, D>,
) -> GraphResult<Network<N, E, D>> {
    ensure_same_nodes(g, h)?;
    let mut out = empty_copy(g);
    copy_edges_where(&mut out, g, h, false);
    copy_edges_where(&mut out, h, g, false);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{attrs, AttrValue, DiGraph, EdgeKey, Graph, MultiGraph};

    fn path(nodes: &[u32]) -> Graph<u32> {
        let mut g = Graph::new();
        g.add_nodes_from(nodes.iter().copied());
        for pair in nodes.windows(2) {
            g.add_edge(pair[0], pair[1]);
        }
        g
    }

    #[test]
    fn test_union_requires_disjoint_nodes() {
        let g = path(&[0, 1, 2]);
        let h = path(&[2, 3]);
        assert!(matches!(union(&g, &h), Err(GraphError::InvalidArgument(_))));
    }

    #[test]
    fn test_union_keeps_attributes() {
        let mut g = path(&[0, 1]);
        g.graph_attrs_mut().insert("name".into(), AttrValue::from("g"));
        g.graph_attrs_mut().insert("owner".into(), AttrValue::from("alice"));
        let mut h: Graph<u32> = Graph::new();
        h.add_edge_with(5, 6, attrs([("weight", 2)]));
        h.set_name("h");

        let u = union(&g, &h).unwrap();
        assert_eq!(u.node_ids(), vec![0, 1, 5, 6]);
        assert_eq!(u.edges(), vec![(0, 1), (5, 6)]);
        assert_eq!(u.name(), Some("h"));
        assert!(u.graph_attrs().contains_key("owner"));
        assert_eq!(u.edge_attrs(&6, &5).and_then(|d| d.get_number("weight")), Some(2.0));
    }

    #[test]
    fn test_disjoint_union_renumbers() {
        let g = path(&[7, 8, 9]);
        let h = path(&[7, 8]);
        let u = disjoint_union(&g, &h);
        assert_eq!(u.node_ids(), vec![0, 1, 2, 3, 4]);
        assert_eq!(u.edges(), vec![(0, 1), (1, 2), (3, 4)]);
    }

    #[test]
    fn test_compose_overlapping() {
        let mut g: DiGraph<&str> = DiGraph::new();
        g.add_edge_with("a", "b", attrs([("w", 1)]));
        g.add_edge("b", "c");
        let mut h: DiGraph<&str> = DiGraph::new();
        h.add_edge_with("a", "b", attrs([("w", 5)]));
        h.add_edge("c", "d");

        let r = compose(&g, &h);
        assert_eq!(r.edges(), vec![("a", "b"), ("b", "c"), ("c", "d")]);
        assert_eq!(r.edge_attrs(&"a", &"b").and_then(|d| d.get_number("w")), Some(5.0));
    }

    #[test]
    fn test_intersection_and_difference() {
        let mut g: Graph<u32> = Graph::new();
        g.add_edges_from([(0, 1), (1, 2), (2, 3)]);
        let mut h: Graph<u32> = Graph::new();
        h.add_nodes_from(0..4);
        h.add_edges_from([(1, 0), (3, 0)]);

        assert_eq!(intersection(&g, &h).unwrap().edges(), vec![(0, 1)]);
        assert_eq!(difference(&g, &h).unwrap().edges(), vec![(1, 2), (2, 3)]);
        assert_eq!(
            symmetric_difference(&g, &h).unwrap().edges(),
            vec![(0, 3), (1, 2), (2, 3)]
        );
    }

    #[test]
    fn test_node_sets_must_match() {
        let g = path(&[0, 1, 2]);
        let h = path(&[0, 1]);
        assert!(matches!(intersection(&g, &h), Err(GraphError::InvalidArgument(_))));
        assert!(difference(&g, &h).is_err());
        assert!(symmetric_difference(&h, &g).is_err());
    }

    #[test]
    fn test_multigraph_operators_match_keys() {
        let mut g: MultiGraph<u32> = MultiGraph::new();
        g.add_edge(0, 1);
        g.add_edge(0, 1);
        let mut h: MultiGraph<u32> = MultiGraph::new();
        h.add_edge(0, 1);

        assert_eq!(intersection(&g, &h).unwrap().edges_keyed(), vec![(0, 1, EdgeKey(0))]);
        assert_eq!(difference(&g, &h).unwrap().edges_keyed(), vec![(0, 1, EdgeKey(1))]);
    }
}
