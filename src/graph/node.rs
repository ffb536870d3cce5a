//! `Node` and its closed `NodeKind` enumeration.

use serde::{Deserialize, Serialize};

use crate::location::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Module,
    Class,
    Function,
    Method,
    Variable,
    Statement,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Module => "module",
            NodeKind::Class => "class",
            NodeKind::Function => "function",
            NodeKind::Method => "method",
            NodeKind::Variable => "variable",
            NodeKind::Statement => "statement",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declaration: a module, class, function, method, variable, or statement.
/// Methods carry their class qualifier as `Class.method` in `name`.
///
/// Identity is the `<name>:<kind>@<location>` string; nodes are immutable
/// once inserted into a `Graph`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    pub location: Location,
}

impl Node {
    pub fn new(kind: NodeKind, name: impl Into<String>, location: Location) -> Self {
        Self {
            kind,
            name: name.into(),
            location,
        }
    }

    pub fn module(name: impl Into<String>, location: Location) -> Self {
        Self::new(NodeKind::Module, name, location)
    }

    pub fn method(class_name: &str, method_name: &str, location: Location) -> Self {
        Self::new(NodeKind::Method, format!("{class_name}.{method_name}"), location)
    }

    /// Identity string: `<name>:<kind>@<location>`.
    pub fn identity(&self) -> String {
        format!("{}:{}@{}", self.name, self.kind, self.location.to_key())
    }

    pub fn text<'a>(&self, content: &'a str) -> Option<String> {
        self.location.text(content)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}
impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_name_carries_class_qualifier() {
        let n = Node::method("A", "a", Location::whole_file("/r/x.py"));
        assert_eq!(n.name, "A.a");
    }

    #[test]
    fn identity_matches_string_form() {
        let n = Node::new(NodeKind::Class, "Foo", Location::span("/r/x.py", 1, 1, 2, 1));
        assert_eq!(n.identity(), "Foo:class@/r/x.py:1:1-2:1");
    }

    #[test]
    fn equal_triples_are_idempotent_identity() {
        let a = Node::new(NodeKind::Module, "x", Location::whole_file("/r/x.py"));
        let b = Node::new(NodeKind::Module, "x", Location::whole_file("/r/x.py"));
        assert_eq!(a, b);
    }
}
