//! `to_json`/`from_json` graph codec: `{repo_path, languages, edges:
//! [[u, v, edge], ...]}`.

use serde::{Deserialize, Serialize};

use super::edge::Edge;
use super::node::Node;
use super::Graph;

#[derive(Serialize, Deserialize)]
struct JsonGraph {
    repo_path: String,
    languages: Vec<String>,
    edges: Vec<(Node, Node, Edge)>,
}

pub fn to_json(graph: &Graph) -> anyhow::Result<String> {
    let mut languages: Vec<String> = graph
        .languages
        .iter()
        .map(|l| l.display_name().to_string())
        .collect();
    languages.sort();

    let edges: Vec<(Node, Node, Edge)> = graph
        .edges(None)
        .into_iter()
        .map(|(u, v, e)| (u.clone(), v.clone(), e.clone()))
        .collect();

    let doc = JsonGraph {
        repo_path: graph.repo_path.display().to_string(),
        languages,
        edges,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub fn from_json(text: &str) -> anyhow::Result<Graph> {
    let doc: JsonGraph = serde_json::from_str(text)?;
    let mut graph = Graph::new(doc.repo_path);
    for lang_str in &doc.languages {
        if let Some(lang) = crate::language::Language::from_str_loose(lang_str) {
            graph.languages.insert(lang);
        }
    }
    for (u, v, e) in doc.edges {
        graph.add_edge(u, v, e, None);
    }
    Ok(graph)
}
