use plexgraph::algo::{relabel_nodes, union};
use plexgraph::prelude::*;
use std::collections::BTreeSet;

#[test]
fn test_edge_dict_shared_between_endpoints() {
    let mut g: Graph<&str> = Graph::new();
    g.add_edge_with("a", "b", attrs([("color", "red")]));

    // Mutate through the view of one endpoint, observe through the other
    let adj = g.adj();
    let dict = adj.get(&"b").and_then(|nbrs| nbrs.get(&"a")).cloned().unwrap();
    dict.set("color", "blue");
    assert_eq!(
        g.edge_attrs(&"a", &"b").and_then(|d| d.get("color")),
        Some(AttrValue::from("blue"))
    );
    assert!(g.edge_attrs(&"a", &"b").unwrap().ptr_eq(g.edge_attrs(&"b", &"a").unwrap()));
}

#[test]
fn test_directed_succ_and_pred_share_dict() {
    let mut g: DiGraph<u32> = DiGraph::new();
    g.add_edge_with(1, 2, attrs([("weight", 4)]));

    let from_pred = g.pred().get(&2).and_then(|nbrs| nbrs.get(&1)).cloned().unwrap();
    from_pred.set("weight", 7);
    let from_succ = g.succ().get(&1).and_then(|nbrs| nbrs.get(&2)).cloned().unwrap();
    assert_eq!(from_succ.get_number("weight"), Some(7.0));
}

#[test]
fn test_self_loop_degree() {
    let mut g: Graph<u32> = Graph::new();
    g.add_edge(1, 1);
    g.add_edge(1, 2);
    assert_eq!(g.degree(&1), Ok(3));
    assert_eq!(g.number_of_edges(), 2);

    let mut d: DiGraph<u32> = DiGraph::new();
    d.add_edge(1, 1);
    assert_eq!(d.in_degree(&1), Ok(1));
    assert_eq!(d.out_degree(&1), Ok(1));
    assert_eq!(d.degree(&1), Ok(2));
}

#[test]
fn test_remove_node_cascades_to_edges() {
    let mut g: DiGraph<u32> = DiGraph::new();
    g.add_edges_from([(0, 1), (1, 2), (2, 0)]);
    g.remove_node(&1).unwrap();

    assert_eq!(g.edges(), vec![(2, 0)]);
    assert!(g.pred().get(&2).map(|nbrs| nbrs.is_empty()).unwrap_or(false));
    assert!(matches!(g.remove_node(&1), Err(GraphError::NodeNotFound(_))));
}

#[test]
fn test_view_reflects_live_mutation() {
    let mut g: Graph<u32> = Graph::new();
    g.add_edges_from([(0, 1), (1, 2)]);
    {
        let view = g.subgraph([0, 1]);
        assert_eq!(view.number_of_edges(), 1);
    }
    g.add_edge(0, 1);
    g.add_edge_with(1, 0, attrs([("new", true)]));
    let view = g.subgraph([0, 1]);
    let dict = view.adj().get(&0).and_then(|nbrs| nbrs.get(&1)).cloned().unwrap();
    assert_eq!(dict.get("new"), Some(AttrValue::Boolean(true)));
}

#[test]
fn test_filter_view_len_matches_iteration() {
    let mut g: Graph<u32> = Graph::new();
    g.add_edges_from((0..10).map(|i| (i, (i + 1) % 10)));

    let view = g.subgraph((0..10).filter(|n| n % 3 != 0));
    let adj = view.adj();
    let keys: Vec<u32> = adj.keys().copied().collect();
    assert_eq!(keys, vec![1, 2, 4, 5, 7, 8]);
    assert_eq!(adj.len(), keys.len());
    assert!(adj.get(&3).is_none());
    assert!(matches!(adj.lookup(&3), Err(GraphError::KeyNotFound(_))));

    // 1-2, 4-5 and 7-8 survive
    assert_eq!(view.number_of_edges(), 3);

    let restricted = g.restricted_view([0], Vec::new());
    assert_eq!(restricted.number_of_nodes(), 9);
    assert_eq!(restricted.number_of_edges(), 8);
}

#[test]
fn test_union_then_project_recovers_operands() {
    let mut g: Graph<u32> = Graph::new();
    g.add_edges_from([(0, 1), (1, 2), (2, 0)]);
    let mut h: Graph<u32> = Graph::new();
    h.add_edges_from([(0, 1), (1, 3)]);

    let tagged_g = relabel_nodes(&g, |n| ('g', *n));
    let tagged_h = relabel_nodes(&h, |n| ('h', *n));
    let both = union(&tagged_g, &tagged_h).unwrap();
    assert_eq!(both.number_of_nodes(), g.number_of_nodes() + h.number_of_nodes());
    assert_eq!(both.number_of_edges(), g.number_of_edges() + h.number_of_edges());

    for (tag, original) in [('g', &g), ('h', &h)] {
        let side: Vec<(char, u32)> = both.nodes().filter(|(t, _)| *t == tag).copied().collect();
        let projected = relabel_nodes(&both.subgraph(side).to_graph(), |(_, n)| *n);
        let edges = |x: &Graph<u32>| -> BTreeSet<(u32, u32)> {
            x.edges().into_iter().map(|(u, v)| (u.min(v), u.max(v))).collect()
        };
        assert_eq!(edges(&projected), edges(original), "side {}", tag);
    }
}

#[test]
fn test_copy_is_independent() {
    let mut g: Graph<u32> = Graph::new();
    g.add_edge_with(0, 1, attrs([("weight", 1)]));
    let h = g.clone();
    g.edge_attrs(&0, &1).unwrap().set("weight", 5);
    assert_eq!(h.edge_attrs(&0, &1).and_then(|d| d.get_number("weight")), Some(1.0));
}

#[test]
fn test_attributes_survive_json() {
    let mut g: MultiDiGraph<&str> = MultiDiGraph::new();
    let tags = AttrValue::Array(vec![AttrValue::from("x")]);
    g.add_edge_with("a", "b", attrs([("weight", AttrValue::from(2.5)), ("tags", tags)]));
    g.add_edge_with("a", "b", attrs([("weight", 1)]));

    for (_, _, _, dict) in g.edges_keyed_data() {
        let snapshot = dict.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: AttrMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
