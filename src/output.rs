//! Serialises a finished [`Graph`] in one of the three formats the CLI
//! accepts: `edgelist` is plain [`graph::json::to_json`]; `pyvis` renders a
//! self-contained vis-network HTML page to a required output file;
//! `ipysigma` renders a sigma.js-compatible `{nodes, edges}` JSON document.

use std::path::Path;

use crate::cli::OutputFormat;
use crate::error::RssgError;
use crate::graph::json;
use crate::graph::Graph;

pub fn render(graph: &Graph, format: OutputFormat, output_file: Option<&Path>) -> anyhow::Result<()> {
    match format {
        OutputFormat::Edgelist => write_or_print(&json::to_json(graph)?, output_file),
        OutputFormat::Pyvis => {
            let Some(path) = output_file else {
                return Err(anyhow::Error::new(RssgError::InputError(
                    "you must specify --output-file for the pyvis format".into(),
                )));
            };
            std::fs::write(path, render_pyvis_html(graph)).map_err(|e| {
                anyhow::Error::new(RssgError::IoError {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            })
        }
        OutputFormat::Ipysigma => write_or_print(&render_ipysigma_json(graph)?, output_file),
    }
}

fn write_or_print(data: &str, output_file: Option<&Path>) -> anyhow::Result<()> {
    match output_file {
        Some(path) => std::fs::write(path, data).map_err(|e| {
            anyhow::Error::new(RssgError::IoError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }),
        None => {
            println!("{data}");
            Ok(())
        }
    }
}

fn render_pyvis_html(graph: &Graph) -> String {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for (u, v, e) in graph.edges(None) {
        for n in [u, v] {
            if seen.insert(n.identity()) {
                nodes.push(format!(
                    "{{id: {:?}, label: {:?}, title: {:?}}}",
                    n.identity(),
                    n.name,
                    n.location.to_key()
                ));
            }
        }
        edges.push(format!(
            "{{from: {:?}, to: {:?}, label: {:?}}}",
            u.identity(),
            v.identity(),
            e.relation.as_str()
        ));
    }

    format!(
        r#"<!doctype html>
<html><head><meta charset="utf-8"><title>rssg graph</title>
<script src="https://unpkg.com/vis-network/standalone/umd/vis-network.min.js"></script>
</head><body>
<div id="graph" style="width:100%;height:100vh;"></div>
<script>
const nodes = new vis.DataSet([{}]);
const edges = new vis.DataSet([{}]);
new vis.Network(document.getElementById("graph"), {{nodes, edges}}, {{}});
</script>
</body></html>"#,
        nodes.join(","),
        edges.join(",")
    )
}

fn render_ipysigma_json(graph: &Graph) -> anyhow::Result<String> {
    #[derive(serde::Serialize)]
    struct SigmaNode {
        key: String,
        attributes: SigmaNodeAttrs,
    }
    #[derive(serde::Serialize)]
    struct SigmaNodeAttrs {
        label: String,
        kind: String,
    }
    #[derive(serde::Serialize)]
    struct SigmaEdge {
        source: String,
        target: String,
        attributes: SigmaEdgeAttrs,
    }
    #[derive(serde::Serialize)]
    struct SigmaEdgeAttrs {
        relation: String,
    }
    #[derive(serde::Serialize)]
    struct SigmaGraph {
        nodes: Vec<SigmaNode>,
        edges: Vec<SigmaEdge>,
    }

    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for (u, v, e) in graph.edges(None) {
        for n in [u, v] {
            if seen.insert(n.identity()) {
                nodes.push(SigmaNode {
                    key: n.identity(),
                    attributes: SigmaNodeAttrs {
                        label: n.name.clone(),
                        kind: n.kind.to_string(),
                    },
                });
            }
        }
        edges.push(SigmaEdge {
            source: u.identity(),
            target: v.identity(),
            attributes: SigmaEdgeAttrs {
                relation: e.relation.to_string(),
            },
        });
    }

    Ok(serde_json::to_string_pretty(&SigmaGraph { nodes, edges })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::edge::{Edge, EdgeRelation};
    use crate::graph::node::Node;
    use crate::location::Location;

    fn sample_graph() -> Graph {
        let mut g = Graph::new("/repo");
        g.add_edge(
            Node::module("a", Location::whole_file("/repo/a.py")),
            Node::module("b", Location::whole_file("/repo/b.py")),
            Edge::new(EdgeRelation::Imports),
            Some(Edge::new(EdgeRelation::ImportedBy)),
        );
        g
    }

    #[test]
    fn pyvis_requires_output_file() {
        let g = sample_graph();
        let err = render(&g, OutputFormat::Pyvis, None).unwrap_err();
        assert!(err.to_string().contains("output-file"));
    }

    #[test]
    fn ipysigma_json_is_well_formed() {
        let g = sample_graph();
        let json = render_ipysigma_json(&g).unwrap();
        assert!(json.contains("\"nodes\""));
        assert!(json.contains("\"edges\""));
    }
}
