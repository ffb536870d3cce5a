//! Declaration extractor: walks a Python file's parse tree to find
//! class/function/method declarations and their structural `ParentOf`
//! relations (e.g. `class A: def a(self): ...` yields
//! `ParentOf(module x -> class A)`, `ParentOf(class A -> function A.a)`).
//!
//! Scoped to Python only; the other 15 languages keep module-level
//! `Imports`/`ImportedBy` only — see DESIGN.md's Open Questions.

use std::path::Path;

use crate::graph::node::{Node, NodeKind};
use crate::language::Language;
use crate::location::Location;

/// `(parent, child)` pairs; the caller adds `ParentOf`/`ChildOf` edges.
pub fn extract_python_declarations(
    path: &Path,
    module_node: &Node,
    source: &str,
    timeout_ms: u64,
) -> anyhow::Result<Vec<(Node, Node)>> {
    let tree = crate::parser::parse(Language::Python, source, "py", timeout_ms)?;
    let mut out = Vec::new();
    walk(tree.root_node(), source.as_bytes(), path, module_node, None, &mut out);
    Ok(out)
}

fn walk(
    node: tree_sitter::Node,
    src: &[u8],
    path: &Path,
    module_node: &Node,
    class_ctx: Option<&Node>,
    out: &mut Vec<(Node, Node)>,
) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "class_definition" => {
                let name = decl_name(child, src);
                let class_node = Node::new(NodeKind::Class, name, node_location(path, child));
                let parent = class_ctx.unwrap_or(module_node).clone();
                out.push((parent, class_node.clone()));
                if let Some(body) = child.child_by_field_name("body") {
                    walk(body, src, path, module_node, Some(&class_node), out);
                }
            }
            "function_definition" => {
                let name = decl_name(child, src);
                let loc = node_location(path, child);
                let (parent, func_node) = match class_ctx {
                    Some(class_node) => (class_node.clone(), Node::method(&class_node.name, &name, loc)),
                    None => (module_node.clone(), Node::new(NodeKind::Function, name, loc)),
                };
                out.push((parent, func_node));
                if let Some(body) = child.child_by_field_name("body") {
                    // Nested functions keep the enclosing class context, so a
                    // method's local helper functions still attach to the class.
                    walk(body, src, path, module_node, class_ctx, out);
                }
            }
            _ => walk(child, src, path, module_node, class_ctx, out),
        }
    }
}

fn decl_name(node: tree_sitter::Node, src: &[u8]) -> String {
    node.child_by_field_name("name")
        .and_then(|n| n.utf8_text(src).ok())
        .unwrap_or("")
        .to_string()
}

fn node_location(path: &Path, node: tree_sitter::Node) -> Location {
    let start = node.start_position();
    let end = node.end_position();
    Location::span(path, start.row + 1, start.column + 1, end.row + 1, end.column + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_and_method_produce_parent_of_pairs() {
        let src = "class A:\n    def a(self):\n        pass\n";
        let path = Path::new("/repo/x.py");
        let module_node = Node::module("x", Location::whole_file(path));
        let pairs = extract_python_declarations(path, &module_node, src, 5_000).unwrap();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0.name, "x");
        assert_eq!(pairs[0].1.name, "A");
        assert_eq!(pairs[0].1.kind, NodeKind::Class);

        assert_eq!(pairs[1].0.name, "A");
        assert_eq!(pairs[1].1.name, "A.a");
        assert_eq!(pairs[1].1.kind, NodeKind::Method);
    }

    #[test]
    fn top_level_function_parents_to_module() {
        let src = "def f():\n    pass\n";
        let path = Path::new("/repo/x.py");
        let module_node = Node::module("x", Location::whole_file(path));
        let pairs = extract_python_declarations(path, &module_node, src, 5_000).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0.name, "x");
        assert_eq!(pairs[0].1.name, "f");
        assert_eq!(pairs[0].1.kind, NodeKind::Function);
    }
}
