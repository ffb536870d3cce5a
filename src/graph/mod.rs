pub mod algo;
pub mod edge;
pub mod json;
pub mod node;

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Directed;

use crate::error::RssgError;
use crate::language::Language;
use edge::{Edge, EdgeRelation};
use node::Node;

/// The in-memory semantic graph: a directed petgraph `StableGraph` keyed by
/// node identity, plus an epoch counter for cache invalidation so relation
/// queries can memoise safely across mutations.
pub struct Graph {
    pub repo_path: PathBuf,
    pub languages: std::collections::HashSet<Language>,
    pub graph: StableGraph<Node, Edge, Directed>,
    /// Node identity -> index, for idempotent `add_node`.
    identity_index: HashMap<String, NodeIndex>,
    /// Bumped on every mutation (add_node/add_edge/add_edges/compose).
    epoch: u64,
    /// Memoised `edges_of_relation` results keyed by (relation set key, epoch).
    relation_cache: RefCell<HashMap<String, (u64, Vec<petgraph::stable_graph::EdgeIndex>)>>,
}

impl Graph {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
            languages: Default::default(),
            graph: StableGraph::new(),
            identity_index: HashMap::new(),
            epoch: 0,
            relation_cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    fn bump_epoch(&mut self) {
        self.epoch += 1;
    }

    /// Idempotent node insertion: re-inserting an equal `(kind, name,
    /// location)` triple returns the existing index.
    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        let identity = node.identity();
        if let Some(&idx) = self.identity_index.get(&identity) {
            return idx;
        }
        let idx = self.graph.add_node(node);
        self.identity_index.insert(identity, idx);
        self.bump_epoch();
        idx
    }

    pub fn find_node(&self, identity: &str) -> Option<NodeIndex> {
        self.identity_index.get(identity).copied()
    }

    /// Insert `u -> v` with `fwd`, and if `rev` is given also `v -> u` with
    /// `rev`. Both endpoints are auto-added. Returns `(u_idx, v_idx)`.
    pub fn add_edge(&mut self, u: Node, v: Node, fwd: Edge, rev: Option<Edge>) -> (NodeIndex, NodeIndex) {
        let u_idx = self.add_node(u);
        let v_idx = self.add_node(v);
        self.graph.add_edge(u_idx, v_idx, fwd);
        if let Some(rev) = rev {
            self.graph.add_edge(v_idx, u_idx, rev);
        }
        self.bump_epoch();
        (u_idx, v_idx)
    }

    /// Batch form of `add_edge`.
    pub fn add_edges(&mut self, edges: impl IntoIterator<Item = (Node, Node, Edge, Option<Edge>)>) {
        for (u, v, fwd, rev) in edges {
            self.add_edge(u, v, fwd, rev);
        }
    }

    /// Union of nodes and edges with `other`; the language set accumulates.
    /// An edge already present with the same identity between the same
    /// (now-deduped) endpoints is not duplicated.
    pub fn compose(&mut self, other: &Graph) {
        use petgraph::visit::EdgeRef;

        let mut idx_map: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        for idx in other.graph.node_indices() {
            let node = other.graph[idx].clone();
            let new_idx = self.add_node(node);
            idx_map.insert(idx, new_idx);
        }
        for edge_idx in other.graph.edge_indices() {
            let (src, dst) = other.graph.edge_endpoints(edge_idx).unwrap();
            let edge = other.graph[edge_idx].clone();
            let (new_src, new_dst) = (idx_map[&src], idx_map[&dst]);

            let identity = edge.identity();
            let already_present = self
                .graph
                .edges_connecting(new_src, new_dst)
                .any(|e| e.weight().identity() == identity);
            if !already_present {
                self.graph.add_edge(new_src, new_dst, edge);
            }
        }
        self.languages.extend(other.languages.iter().copied());
        self.bump_epoch();
    }

    /// All edges, optionally filtered by a predicate over `(u, v, edge)`.
    pub fn edges<'a>(
        &'a self,
        filter: Option<&dyn Fn(&Node, &Node, &Edge) -> bool>,
    ) -> Vec<(&'a Node, &'a Node, &'a Edge)> {
        use petgraph::visit::EdgeRef;
        self.graph
            .edge_references()
            .filter_map(|e| {
                let u = &self.graph[e.source()];
                let v = &self.graph[e.target()];
                let edge = e.weight();
                match filter {
                    Some(f) if !f(u, v, edge) => None,
                    _ => Some((u, v, edge)),
                }
            })
            .collect()
    }

    fn relation_key(rels: &[EdgeRelation]) -> String {
        let mut names: Vec<&str> = rels.iter().map(|r| r.as_str()).collect();
        names.sort_unstable();
        names.join(",")
    }

    /// Edges whose relation is in `rels`, sorted by anchor location string
    /// (ties broken lexicographically by the full edge identity). Cached by
    /// `(relation set, epoch)`.
    pub fn edges_of_relation(&self, rels: &[EdgeRelation]) -> Vec<(&Node, &Node, &Edge)> {
        use petgraph::visit::EdgeRef;
        let key = Self::relation_key(rels);
        {
            let cache = self.relation_cache.borrow();
            if let Some((epoch, edge_indices)) = cache.get(&key)
                && *epoch == self.epoch
            {
                return edge_indices
                    .iter()
                    .map(|&eidx| {
                        let (u, v) = self.graph.edge_endpoints(eidx).expect("cached edge still present");
                        (&self.graph[u], &self.graph[v], &self.graph[eidx])
                    })
                    .collect();
            }
        }

        let mut items: Vec<(petgraph::stable_graph::EdgeIndex, &Node, &Node, &Edge)> = self
            .graph
            .edge_references()
            .filter(|e| rels.contains(&e.weight().relation))
            .map(|e| (e.id(), &self.graph[e.source()], &self.graph[e.target()], e.weight()))
            .collect();

        items.sort_by_key(|(_, _, _, e)| e.identity());

        let cached: Vec<petgraph::stable_graph::EdgeIndex> = items.iter().map(|(i, ..)| *i).collect();
        self.relation_cache
            .borrow_mut()
            .insert(key, (self.epoch, cached));

        items.into_iter().map(|(_, u, v, e)| (u, v, e)).collect()
    }

    /// Outgoing neighbours of `n` via any of `rels`. `None` when `n` is not
    /// in the graph.
    pub fn nodes_related_to(&self, identity: &str, rels: &[EdgeRelation]) -> Option<Vec<&Node>> {
        use petgraph::visit::EdgeRef;
        let idx = self.find_node(identity)?;
        Some(
            self.graph
                .edges_directed(idx, petgraph::Direction::Outgoing)
                .filter(|e| rels.contains(&e.weight().relation))
                .map(|e| &self.graph[e.target()])
                .collect(),
        )
    }

    /// A new graph containing exactly the edges whose relation is in `rels`
    /// and their endpoints, with repo root and language set preserved.
    pub fn subgraph(&self, rels: &[EdgeRelation]) -> Graph {
        let mut out = Graph::new(self.repo_path.clone());
        out.languages = self.languages.clone();
        for (u, v, e) in self.edges_of_relation(rels) {
            out.add_edge(u.clone(), v.clone(), e.clone(), None);
        }
        out
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Fatal internal check: used by the Builder when a bidirectional edge
    /// was requested but the inverse relation cannot be found afterwards.
    pub fn assert_invariant(condition: bool, message: impl Into<String>) -> anyhow::Result<()> {
        if condition {
            Ok(())
        } else {
            Err(anyhow::Error::new(RssgError::InvariantViolation(message.into())))
        }
    }
}
