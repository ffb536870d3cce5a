//! Context Retriever: line-scoped cross-file queries over a finished graph.
//!
//! Three query functions return anchor-sorted triples `(u, v, edge)`. Only
//! `Imports`/`ImportedBy` are ever emitted by the syntactic builder here, so
//! the Calls/Instantiates/Uses branches below are exercised once a semantic
//! generator populates those relations (see DESIGN.md's Open Questions).

use std::path::Path;

use crate::graph::edge::{Edge, EdgeRelation};
use crate::graph::node::Node;
use crate::graph::Graph;

type Triple<'g> = (&'g Node, &'g Node, &'g Edge);

/// Every edge `(u, v, e)` where `v` lies in `file` and `u` lies in some
/// other file. Serves as the base set for the line-scoped queries below.
pub fn cross_file_context<'g>(graph: &'g Graph, file: &Path) -> Vec<Triple<'g>> {
    let mut out: Vec<Triple<'g>> = graph
        .edges(None)
        .into_iter()
        .filter(|(u, v, _)| v.location.file_path == file && u.location.file_path != file)
        .collect();
    out.sort_by_key(|(_, _, e)| e.identity());
    out
}

/// Cross-file edges that reach a definition at line `L` in `file`: either a
/// `CalledBy`/`InstantiatedBy` edge whose target span contains `L`, or an
/// `ImportedBy` edge anchored strictly before `L`.
pub fn cross_file_definition_by_line<'g>(graph: &'g Graph, file: &Path, line: usize) -> Vec<Triple<'g>> {
    cross_file_context(graph, file)
        .into_iter()
        .filter(|(_, v, e)| match e.relation {
            EdgeRelation::CalledBy | EdgeRelation::InstantiatedBy => span_contains_line(v, line),
            EdgeRelation::ImportedBy => anchored_strictly_before(e, line),
            _ => false,
        })
        .collect()
}

/// Dual of [`cross_file_definition_by_line`]: cross-file edges that
/// *reference* a symbol defined near line `L` in the local file — a
/// `Calls`/`Instantiates`/`Uses` edge whose target span contains `L`.
pub fn cross_file_reference_by_line<'g>(graph: &'g Graph, file: &Path, line: usize) -> Vec<Triple<'g>> {
    cross_file_context(graph, file)
        .into_iter()
        .filter(|(_, v, e)| {
            matches!(e.relation, EdgeRelation::Calls | EdgeRelation::Instantiates | EdgeRelation::Uses)
                && span_contains_line(v, line)
        })
        .collect()
}

fn span_contains_line(node: &Node, line: usize) -> bool {
    match (node.location.start_line, node.location.end_line) {
        (Some(sl), Some(el)) => sl <= line && line <= el,
        _ => false,
    }
}

fn anchored_strictly_before(edge: &Edge, line: usize) -> bool {
    edge.location
        .as_ref()
        .and_then(|l| l.start_line)
        .map(|sl| sl < line)
        .unwrap_or(false)
}
