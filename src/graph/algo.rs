//! Deterministic cyclic topological sort.
//!
//! A modified Kahn's algorithm at node granularity: repeatedly remove the
//! lexicographically smallest zero-indegree node (by a caller-supplied key,
//! default node identity); when a cycle leaves no node at indegree zero,
//! forcibly remove the smallest-key node among those still remaining and
//! keep decrementing its successors. This never blocks on a cycle and is
//! deterministic for a given graph and key.

use std::collections::{HashMap, HashSet};

use petgraph::stable_graph::NodeIndex;

use super::edge::EdgeRelation;
use super::node::Node;
use super::Graph;

/// Yield nodes in an order respecting edges of `rel` where possible, but
/// never blocking on cycles. Returns exactly `|nodes|` elements and is
/// deterministic for a given graph and `key`.
pub fn topo_sort(graph: &Graph, rel: Option<EdgeRelation>, key: impl Fn(&Node) -> String) -> Vec<NodeIndex> {
    let mut in_degree: HashMap<NodeIndex, usize> =
        graph.graph.node_indices().map(|idx| (idx, 0)).collect();
    let mut successors: HashMap<NodeIndex, Vec<NodeIndex>> = HashMap::new();

    if let Some(r) = rel {
        for (u, v, _) in graph.edges_of_relation(&[r]) {
            let u_idx = graph.find_node(&u.identity()).unwrap();
            let v_idx = graph.find_node(&v.identity()).unwrap();
            *in_degree.get_mut(&v_idx).unwrap() += 1;
            successors.entry(u_idx).or_default().push(v_idx);
        }
    }

    let mut remaining: HashSet<NodeIndex> = graph.graph.node_indices().collect();
    let mut order = Vec::with_capacity(remaining.len());

    while !remaining.is_empty() {
        let pick = remaining
            .iter()
            .filter(|idx| in_degree[idx] == 0)
            .min_by_key(|&&idx| key(&graph.graph[idx]))
            .copied()
            .unwrap_or_else(|| {
                *remaining.iter().min_by_key(|&&idx| key(&graph.graph[idx])).unwrap()
            });

        remaining.remove(&pick);
        order.push(pick);

        if let Some(succs) = successors.get(&pick) {
            for &s in succs {
                if remaining.contains(&s) {
                    let d = in_degree.get_mut(&s).unwrap();
                    *d = d.saturating_sub(1);
                }
            }
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::edge::Edge;
    use crate::graph::node::Node;
    use crate::location::Location;

    fn module(name: &str) -> Node {
        Node::module(name, Location::whole_file(format!("/repo/{name}.py")))
    }

    fn key_by_name(n: &Node) -> String {
        n.name.clone()
    }

    #[test]
    fn topo_sort_yields_every_node() {
        let mut g = Graph::new("/repo");
        g.add_edge(module("a"), module("b"), Edge::new(EdgeRelation::ImportedBy), None);
        g.add_edge(module("b"), module("c"), Edge::new(EdgeRelation::ImportedBy), None);
        let order = topo_sort(&g, Some(EdgeRelation::ImportedBy), key_by_name);
        assert_eq!(order.len(), g.node_count());
    }

    #[test]
    fn topo_sort_respects_acyclic_edges() {
        let mut g = Graph::new("/repo");
        // x -> y -> z via ImportedBy, must come out in that order.
        g.add_edge(module("x"), module("y"), Edge::new(EdgeRelation::ImportedBy), None);
        g.add_edge(module("y"), module("z"), Edge::new(EdgeRelation::ImportedBy), None);
        let order = topo_sort(&g, Some(EdgeRelation::ImportedBy), key_by_name);
        let names: Vec<String> = order.iter().map(|&i| g.graph[i].name.clone()).collect();
        let pos = |n: &str| names.iter().position(|x| x == n).unwrap();
        assert!(pos("x") < pos("y"));
        assert!(pos("y") < pos("z"));
    }

    #[test]
    fn topo_sort_tolerates_cycles() {
        let mut g = Graph::new("/repo");
        g.add_edge(module("a"), module("b"), Edge::new(EdgeRelation::ImportedBy), None);
        g.add_edge(module("b"), module("a"), Edge::new(EdgeRelation::ImportedBy), None);
        let order = topo_sort(&g, Some(EdgeRelation::ImportedBy), key_by_name);
        assert_eq!(order.len(), 2);
    }

    #[test]
    fn topo_sort_is_deterministic() {
        let mut g = Graph::new("/repo");
        g.add_edge(module("a"), module("b"), Edge::new(EdgeRelation::ImportedBy), None);
        g.add_edge(module("c"), module("b"), Edge::new(EdgeRelation::ImportedBy), None);
        let a = topo_sort(&g, Some(EdgeRelation::ImportedBy), key_by_name);
        let b = topo_sort(&g, Some(EdgeRelation::ImportedBy), key_by_name);
        assert_eq!(a, b);
    }

    /// `b->a, a->d, d->c, c->b, d->e, y->x, z->y` on `ImportedBy` yields the
    /// exact sequence `[z, y, x, a, d, c, b, e]`: z/y/x resolve cleanly, the
    /// a-b-c-d cycle is broken by repeatedly forcing out its smallest-key
    /// member (a), and e trails since it only depends on d.
    #[test]
    fn cyclic_import_seed_scenario_matches_exact_sequence() {
        let mut g = Graph::new("/repo");
        for (u, v) in [("b", "a"), ("a", "d"), ("d", "c"), ("c", "b"), ("d", "e"), ("y", "x"), ("z", "y")] {
            g.add_edge(module(u), module(v), Edge::new(EdgeRelation::ImportedBy), None);
        }

        let order = topo_sort(&g, Some(EdgeRelation::ImportedBy), key_by_name);
        let names: Vec<String> = order.iter().map(|&i| g.graph[i].name.clone()).collect();

        assert_eq!(names, vec!["z", "y", "x", "a", "d", "c", "b", "e"]);
    }
}
