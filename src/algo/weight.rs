//! Edge weight specifications
//!
//! A [`Weight`] names an edge attribute or wraps a function. [`Weighted`]
//! pairs a graph (or graph view) with a weight and hands the result to the
//! shortest-path engine.

use crate::graph::{EdgeData, GraphRef};
use plexgraph_algorithms::{EdgeWeight, WeightedAdjacency};
use std::fmt;
use std::rc::Rc;

/// Weight callback: `(u, v, edge data) -> weight`; `None` hides the edge
pub type WeightFn<N> = Rc<dyn Fn(&N, &N, &EdgeData<'_>) -> Option<f64>>;

/// How to weigh an edge
pub enum Weight<N> {
    /// Numeric attribute of that name. Absent or non-numeric values count as
    /// 1; for parallel edges the smallest value is used.
    Attr(String),
    /// Custom function; `None` hides the edge
    Func(WeightFn<N>),
}

impl<N> Weight<N> {
    pub fn attr(name: impl Into<String>) -> Self {
        Weight::Attr(name.into())
    }

    /// Weigh edges with a closure over `(u, v, payload)`
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&N, &N, &EdgeData<'_>) -> Option<f64> + 'static,
    {
        Weight::Func(Rc::new(f))
    }

    /// Attribute name, when weighing by attribute
    pub fn attr_name(&self) -> Option<&str> {
        match self {
            Weight::Attr(name) => Some(name),
            Weight::Func(_) => None,
        }
    }

    /// Weight of the `u -> v` edge(s) described by `data`
    pub fn evaluate(&self, u: &N, v: &N, data: &EdgeData<'_>) -> Option<f64> {
        match self {
            Weight::Attr(name) => data.min_attr(name, 1.0),
            Weight::Func(f) => f(u, v, data),
        }
    }
}

impl<N> Default for Weight<N> {
    fn default() -> Self {
        Weight::Attr("weight".to_string())
    }
}

impl<N> Clone for Weight<N> {
    fn clone(&self) -> Self {
        match self {
            Weight::Attr(name) => Weight::Attr(name.clone()),
            Weight::Func(f) => Weight::Func(Rc::clone(f)),
        }
    }
}

impl<N> fmt::Debug for Weight<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weight::Attr(name) => f.debug_tuple("Attr").field(name).finish(),
            Weight::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl<N> From<&str> for Weight<N> {
    fn from(name: &str) -> Self {
        Weight::Attr(name.to_string())
    }
}

impl<N> From<String> for Weight<N> {
    fn from(name: String) -> Self {
        Weight::Attr(name)
    }
}

/// A graph seen through a weight specification
pub struct Weighted<'g, G: GraphRef> {
    graph: &'g G,
    weight: Weight<G::Node>,
}

impl<'g, G: GraphRef> Weighted<'g, G> {
    pub fn new(graph: &'g G, weight: impl Into<Weight<G::Node>>) -> Self {
        Self {
            graph,
            weight: weight.into(),
        }
    }

    pub fn weight(&self) -> &Weight<G::Node> {
        &self.weight
    }
}

impl<'g, G: GraphRef> WeightedAdjacency for Weighted<'g, G> {
    type Node = G::Node;

    fn is_directed(&self) -> bool {
        self.graph.is_directed()
    }

    fn node_count(&self) -> usize {
        self.graph.number_of_nodes()
    }

    fn nodes(&self) -> Vec<G::Node> {
        self.graph.node_ids()
    }

    fn contains(&self, node: &G::Node) -> bool {
        self.graph.has_node(node)
    }

    fn successors(&self, node: &G::Node) -> Vec<(G::Node, EdgeWeight)> {
        self.graph
            .out_edges(node)
            .into_iter()
            .map(|(v, data)| {
                let w = self.weight.evaluate(node, &v, &data);
                (v, w)
            })
            .collect()
    }

    fn predecessors(&self, node: &G::Node) -> Vec<(G::Node, EdgeWeight)> {
        self.graph
            .in_edges(node)
            .into_iter()
            .map(|(u, data)| {
                let w = self.weight.evaluate(&u, node, &data);
                (u, w)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{attrs, AttrValue, DiGraph, MultiGraph};

    #[test]
    fn test_attr_weight_defaults_to_one() {
        let mut g: DiGraph<u32> = DiGraph::new();
        g.add_edge_with(0, 1, attrs([("weight", 4)]));
        g.add_edge(1, 2);
        g.add_edge_with(2, 3, attrs([("weight", "heavy")]));

        let w = Weighted::new(&g, "weight");
        assert_eq!(w.successors(&0), vec![(1, Some(4.0))]);
        assert_eq!(w.successors(&1), vec![(2, Some(1.0))]);
        assert_eq!(w.successors(&2), vec![(3, Some(1.0))]);
        assert_eq!(w.predecessors(&1), vec![(0, Some(4.0))]);
    }

    #[test]
    fn test_multigraph_uses_smallest_parallel_weight() {
        let mut g: MultiGraph<u32> = MultiGraph::new();
        g.add_edge_with(0, 1, attrs([("cost", 7)]));
        g.add_edge_with(0, 1, attrs([("cost", 2.5)]));
        let w = Weighted::new(&g, "cost");
        assert_eq!(w.successors(&1), vec![(0, Some(2.5))]);
    }

    #[test]
    fn test_func_weight_can_hide_edges() {
        let mut g: DiGraph<u32> = DiGraph::new();
        g.add_edge_with(0, 1, attrs([("color", "red")]));
        g.add_edge_with(0, 2, attrs([("color", "blue")]));

        let red_only = Weight::func(|_: &u32, _: &u32, data: &EdgeData<'_>| {
            let red = data
                .dicts()
                .iter()
                .any(|d| d.get("color") == Some(AttrValue::from("red")));
            red.then_some(1.0)
        });
        let w = Weighted::new(&g, red_only);
        assert_eq!(w.successors(&0), vec![(1, Some(1.0)), (2, None)]);
        assert_eq!(format!("{:?}", w.weight()), "Func(..)");
    }

    #[test]
    fn test_weight_conversions() {
        let w: Weight<u32> = Weight::default();
        assert_eq!(w.attr_name(), Some("weight"));
        let w: Weight<u32> = String::from("length").into();
        assert_eq!(w.clone().attr_name(), Some("length"));
        assert_eq!(Weight::<u32>::attr("cap").attr_name(), Some("cap"));
    }
}
