//! `EdgeRelation` (the closed 9-category relation set) and `Edge`.
//!
//! Each relation is a `(category, internal, direction)` triple; a forward
//! and inverse relation share the first two fields and differ only in
//! direction, which is how `inverse()`/`is_inverse_of()` work without a
//! lookup table per pair.

use serde::{Deserialize, Serialize};

use crate::location::Location;

/// `(category id, internal id within category, direction bit)`.
/// Direction 0 = forward, 1 = inverse. Two relations are inverse partners
/// iff they share the first two fields and differ only in direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeRelation {
    ParentOf,
    ChildOf,
    Constructs,
    ConstructedBy,
    Imports,
    ImportedBy,
    BaseClassOf,
    DerivedClassOf,
    Overrides,
    OverriddenBy,
    Calls,
    CalledBy,
    Instantiates,
    InstantiatedBy,
    Uses,
    UsedBy,
    Defines,
    DefinedBy,
}

impl EdgeRelation {
    fn triple(self) -> (u8, u8, u8) {
        match self {
            EdgeRelation::ParentOf => (1, 0, 0),
            EdgeRelation::ChildOf => (1, 0, 1),
            EdgeRelation::Constructs => (1, 1, 0),
            EdgeRelation::ConstructedBy => (1, 1, 1),
            EdgeRelation::Imports => (2, 0, 0),
            EdgeRelation::ImportedBy => (2, 0, 1),
            EdgeRelation::BaseClassOf => (3, 0, 0),
            EdgeRelation::DerivedClassOf => (3, 0, 1),
            EdgeRelation::Overrides => (4, 0, 0),
            EdgeRelation::OverriddenBy => (4, 0, 1),
            EdgeRelation::Calls => (5, 0, 0),
            EdgeRelation::CalledBy => (5, 0, 1),
            EdgeRelation::Instantiates => (6, 0, 0),
            EdgeRelation::InstantiatedBy => (6, 0, 1),
            EdgeRelation::Uses => (7, 0, 0),
            EdgeRelation::UsedBy => (7, 0, 1),
            EdgeRelation::Defines => (8, 0, 0),
            EdgeRelation::DefinedBy => (8, 0, 1),
        }
    }

    fn from_triple(t: (u8, u8, u8)) -> Self {
        match t {
            (1, 0, 0) => EdgeRelation::ParentOf,
            (1, 0, 1) => EdgeRelation::ChildOf,
            (1, 1, 0) => EdgeRelation::Constructs,
            (1, 1, 1) => EdgeRelation::ConstructedBy,
            (2, 0, 0) => EdgeRelation::Imports,
            (2, 0, 1) => EdgeRelation::ImportedBy,
            (3, 0, 0) => EdgeRelation::BaseClassOf,
            (3, 0, 1) => EdgeRelation::DerivedClassOf,
            (4, 0, 0) => EdgeRelation::Overrides,
            (4, 0, 1) => EdgeRelation::OverriddenBy,
            (5, 0, 0) => EdgeRelation::Calls,
            (5, 0, 1) => EdgeRelation::CalledBy,
            (6, 0, 0) => EdgeRelation::Instantiates,
            (6, 0, 1) => EdgeRelation::InstantiatedBy,
            (7, 0, 0) => EdgeRelation::Uses,
            (7, 0, 1) => EdgeRelation::UsedBy,
            (8, 0, 0) => EdgeRelation::Defines,
            (8, 0, 1) => EdgeRelation::DefinedBy,
            _ => unreachable!("exhaustive over EdgeRelation::triple"),
        }
    }

    /// Flip the direction bit, keeping category and internal id.
    pub fn inverse(self) -> EdgeRelation {
        let (c, i, d) = self.triple();
        EdgeRelation::from_triple((c, i, 1 - d))
    }

    pub fn is_inverse_of(self, other: EdgeRelation) -> bool {
        let (c1, i1, d1) = self.triple();
        let (c2, i2, d2) = other.triple();
        c1 == c2 && i1 == i2 && d1 != d2
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EdgeRelation::ParentOf => "ParentOf",
            EdgeRelation::ChildOf => "ChildOf",
            EdgeRelation::Constructs => "Constructs",
            EdgeRelation::ConstructedBy => "ConstructedBy",
            EdgeRelation::Imports => "Imports",
            EdgeRelation::ImportedBy => "ImportedBy",
            EdgeRelation::BaseClassOf => "BaseClassOf",
            EdgeRelation::DerivedClassOf => "DerivedClassOf",
            EdgeRelation::Overrides => "Overrides",
            EdgeRelation::OverriddenBy => "OverriddenBy",
            EdgeRelation::Calls => "Calls",
            EdgeRelation::CalledBy => "CalledBy",
            EdgeRelation::Instantiates => "Instantiates",
            EdgeRelation::InstantiatedBy => "InstantiatedBy",
            EdgeRelation::Uses => "Uses",
            EdgeRelation::UsedBy => "UsedBy",
            EdgeRelation::Defines => "Defines",
            EdgeRelation::DefinedBy => "DefinedBy",
        }
    }

    pub fn from_str_name(s: &str) -> Option<EdgeRelation> {
        Some(match s {
            "ParentOf" => EdgeRelation::ParentOf,
            "ChildOf" => EdgeRelation::ChildOf,
            "Constructs" => EdgeRelation::Constructs,
            "ConstructedBy" => EdgeRelation::ConstructedBy,
            "Imports" => EdgeRelation::Imports,
            "ImportedBy" => EdgeRelation::ImportedBy,
            "BaseClassOf" => EdgeRelation::BaseClassOf,
            "DerivedClassOf" => EdgeRelation::DerivedClassOf,
            "Overrides" => EdgeRelation::Overrides,
            "OverriddenBy" => EdgeRelation::OverriddenBy,
            "Calls" => EdgeRelation::Calls,
            "CalledBy" => EdgeRelation::CalledBy,
            "Instantiates" => EdgeRelation::Instantiates,
            "InstantiatedBy" => EdgeRelation::InstantiatedBy,
            "Uses" => EdgeRelation::Uses,
            "UsedBy" => EdgeRelation::UsedBy,
            "Defines" => EdgeRelation::Defines,
            "DefinedBy" => EdgeRelation::DefinedBy,
            _ => return None,
        })
    }
}

impl std::fmt::Display for EdgeRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An instance of a relation between two nodes with an optional anchor
/// (the import-statement span, call-site span, etc). Identity is
/// `<relation>[@<location>]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub relation: EdgeRelation,
    pub location: Option<Location>,
}

impl Edge {
    pub fn new(relation: EdgeRelation) -> Self {
        Self {
            relation,
            location: None,
        }
    }

    pub fn anchored(relation: EdgeRelation, location: Location) -> Self {
        Self {
            relation,
            location: Some(location),
        }
    }

    pub fn identity(&self) -> String {
        match &self.location {
            Some(loc) => format!("{}@{}", self.relation, loc.to_key()),
            None => self.relation.to_string(),
        }
    }

    /// Same anchor, inverse relation — a bidirectional edge pair always
    /// shares the forward edge's location exactly.
    pub fn inverse(&self) -> Edge {
        Edge {
            relation: self.relation.inverse(),
            location: self.location.clone(),
        }
    }
}
