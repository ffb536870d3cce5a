//! Repo-specific semantic graph: a directed multigraph of source
//! declarations connected by typed relations, built by resolving imports
//! across a closed set of 16 languages via tree-sitter, with a retriever for
//! line-scoped cross-file queries.
//!
//! The three subsystems are exposed as a library so a CLI is one of several
//! possible callers: [`builder::build_graph`] constructs a [`graph::Graph`],
//! and [`retriever`] queries a finished one.

pub mod builder;
pub mod cli;
pub mod config;
pub mod declarations;
pub mod error;
pub mod fs;
pub mod graph;
pub mod import_finder;
pub mod language;
pub mod location;
pub mod output;
pub mod parser;
pub mod resolver;
pub mod retriever;
pub mod source;
pub mod walker;
