//! Graph Builder: orchestrates enumeration, parsing, and resolution into a
//! finished [`Graph`].
//!
//! Pipeline: walk the repo (real directory or [`RepoPath::Virtual`] tree),
//! parse every file in parallel, build a module name -> path map, then
//! resolve each file's imports against that map and emit the bidirectional
//! `Imports`/`ImportedBy` edge pair. Python files additionally get a
//! declaration pass producing `ParentOf`/`ChildOf` structural edges for
//! their classes and functions. Both the per-file parse and the two
//! sequential assembly passes honour an optional [`CancellationToken`],
//! checked at each file boundary.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::config::RssgConfig;
use crate::fs::RepoPath;
use crate::graph::edge::{Edge, EdgeRelation};
use crate::graph::node::Node;
use crate::graph::Graph;
use crate::import_finder::{self, ImportRecord};
use crate::language::Language;
use crate::location::Location;
use crate::resolver::{self, ModuleMap};
use crate::source;

/// Cooperative cancellation for a build in progress, checked at file
/// boundaries in both assembly passes. A fresh token is never cancelled.
#[derive(Debug, Default)]
pub struct CancellationToken(AtomicBool);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Per-file parse outcome carried from the parallel first pass into the
/// sequential graph-assembly step.
struct FileRecord {
    path: PathBuf,
    language: Language,
    module_name: String,
    imports: Vec<ImportRecord>,
    source_text: String,
}

#[derive(Debug, Default)]
pub struct BuildStats {
    pub files_parsed: usize,
    pub files_skipped: usize,
    pub imports_resolved: usize,
    pub imports_unresolved: usize,
}

/// Build a [`Graph`] for every source file under `repo_root` matching
/// `languages` (or all 16 when `None`). `cancellation` is polled at each
/// file boundary of the two assembly passes; when it fires, the build
/// returns immediately with whatever has been assembled so far.
pub fn build_graph(
    repo_root: &RepoPath,
    languages: Option<&HashSet<Language>>,
    config: &RssgConfig,
    verbose: bool,
    cancellation: Option<&CancellationToken>,
) -> anyhow::Result<(Graph, BuildStats)> {
    let repo_root = repo_root.absolute();
    if !repo_root.is_dir() {
        return Err(anyhow::Error::new(crate::error::RssgError::InputError(format!(
            "{} is not a directory",
            repo_root.as_path().display()
        ))));
    }

    let files = crate::walker::walk_project(&repo_root, config, verbose, languages)?;
    let mut stats = BuildStats::default();

    // 1/2. Parse every file in parallel; each worker pins its own tree-sitter
    // parser via the thread-local pool in `crate::parser`.
    let parsed: Vec<Option<FileRecord>> = files
        .par_iter()
        .map(|repo_path| parse_one_file(repo_path, config, verbose))
        .collect();

    let mut records = Vec::with_capacity(parsed.len());
    for record in parsed {
        match record {
            Some(r) => records.push(r),
            None => stats.files_skipped += 1,
        }
    }
    stats.files_parsed = records.len();

    // 3. Build module_map incrementally — insertion order determines which
    // file "wins" a module-name collision for diagnostics, but every file
    // still gets its own node.
    let mut module_map: ModuleMap = HashMap::new();
    for record in &records {
        module_map
            .entry(record.module_name.clone())
            .or_default()
            .push(record.path.clone());
    }

    let mut graph = Graph::new(repo_root.as_path().to_path_buf());
    for record in &records {
        if let Some(token) = cancellation
            && token.is_cancelled()
        {
            crate::error::trace(verbose, "build cancelled during node assembly");
            return Ok((graph, stats));
        }

        graph.languages.insert(record.language);
        let module_node = Node::module(record.module_name.clone(), Location::whole_file(record.path.clone()));
        graph.add_node(module_node.clone());

        if record.language == Language::Python {
            match crate::declarations::extract_python_declarations(
                &record.path,
                &module_node,
                &record.source_text,
                config.file_timeout_ms,
            ) {
                Ok(pairs) => {
                    for (parent, child) in pairs {
                        graph.add_edge(
                            parent,
                            child,
                            Edge::new(EdgeRelation::ParentOf),
                            Some(Edge::new(EdgeRelation::ChildOf)),
                        );
                    }
                }
                Err(err) => crate::error::warn(format!("declaration extraction failed in {}: {err}", record.path.display())),
            }
        }
    }

    // 4. Second pass: resolve every import token and emit the bidirectional
    // Imports/ImportedBy edge pair anchored at the import statement's span.
    for record in &records {
        if let Some(token) = cancellation
            && token.is_cancelled()
        {
            crate::error::trace(verbose, "build cancelled during import resolution");
            return Ok((graph, stats));
        }

        let importer_node = Node::module(record.module_name.clone(), Location::whole_file(record.path.clone()));

        for import in &record.imports {
            let resolved = resolver::resolve(record.language, &import.token, &record.path, repo_root.as_path(), &module_map);

            if resolved.is_empty() {
                stats.imports_unresolved += 1;
                crate::error::trace(
                    verbose,
                    format!(
                        "unresolved import '{}' in {}",
                        import.token,
                        record.path.display()
                    ),
                );
                continue;
            }

            for target_path in resolved {
                let Some(importee_module) = module_name_for_path(&records, &target_path) else {
                    continue;
                };
                let importee_node =
                    Node::module(importee_module, Location::whole_file(target_path.clone()));

                graph.add_edge(
                    importer_node.clone(),
                    importee_node,
                    Edge::anchored(EdgeRelation::Imports, import.location.clone()),
                    Some(Edge::anchored(EdgeRelation::ImportedBy, import.location.clone())),
                );
                stats.imports_resolved += 1;
            }
        }
    }

    Ok((graph, stats))
}

fn module_name_for_path(records: &[FileRecord], path: &Path) -> Option<String> {
    records.iter().find(|r| r.path == path).map(|r| r.module_name.clone())
}

fn parse_one_file(repo_path: &RepoPath, config: &RssgConfig, verbose: bool) -> Option<FileRecord> {
    let path = repo_path.as_path();
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let language = Language::from_extension(ext)?;

    let text = match source::read_text(repo_path, Some(config.max_lines_per_file)) {
        Ok(t) => t,
        Err(err) => {
            crate::error::warn(format!("skipping {}: {err}", path.display()));
            return None;
        }
    };

    if text.trim().is_empty() {
        return None;
    }

    let module_name = import_finder::find_module_name(language, path, ext, &text, config.file_timeout_ms);
    let imports = match import_finder::find_imports(language, path, ext, &text, config.file_timeout_ms) {
        Ok(imports) => imports,
        Err(err) => {
            crate::error::warn(format!("parse error in {}: {err}", path.display()));
            crate::error::trace(verbose, format!("  {}", path.display()));
            Vec::new()
        }
    };

    Some(FileRecord {
        path: path.to_path_buf(),
        language,
        module_name,
        imports,
        source_text: text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::VirtualFs;
    use tempfile::TempDir;

    #[test]
    fn builds_import_edges_for_python_package() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.py"), "import b\n").unwrap();
        std::fs::write(dir.path().join("b.py"), "x = 1\n").unwrap();

        let config = RssgConfig::default();
        let (graph, stats) = build_graph(&RepoPath::real(dir.path()), None, &config, false, None).unwrap();

        assert_eq!(stats.files_parsed, 2);
        assert_eq!(graph.node_count(), 2);
        let edges = graph.edges_of_relation(&[EdgeRelation::Imports]);
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn empty_files_are_skipped_not_crashed() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("empty.py"), "").unwrap();
        let config = RssgConfig::default();
        let (graph, stats) = build_graph(&RepoPath::real(dir.path()), None, &config, false, None).unwrap();
        assert_eq!(stats.files_skipped, 1);
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn python_class_and_method_produce_parent_of_edges() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("x.py"), "class A:\n    def a(self):\n        pass\n").unwrap();
        let config = RssgConfig::default();
        let (graph, _stats) = build_graph(&RepoPath::real(dir.path()), None, &config, false, None).unwrap();
        let edges = graph.edges_of_relation(&[EdgeRelation::ParentOf]);
        assert_eq!(edges.len(), 2);
        assert!(edges.iter().any(|(_, v, _)| v.name == "A"));
        assert!(edges.iter().any(|(_, v, _)| v.name == "A.a"));
    }

    #[test]
    fn unresolved_imports_do_not_fail_the_build() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.py"), "import nonexistent_package_xyz\n").unwrap();
        let config = RssgConfig::default();
        let (graph, stats) = build_graph(&RepoPath::real(dir.path()), None, &config, false, None).unwrap();
        assert_eq!(stats.files_parsed, 1);
        assert_eq!(stats.imports_unresolved, 1);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn builds_nodes_over_a_virtual_repository() {
        let fs = VirtualFs::new();
        fs.write_text("/repo/a.py", "x = 1\n");
        fs.write_text("/repo/b.py", "y = 2\n");
        let config = RssgConfig::default();
        let (graph, stats) =
            build_graph(&RepoPath::virtual_(fs, "/repo"), None, &config, false, None).unwrap();
        assert_eq!(stats.files_parsed, 2);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn a_cancelled_token_stops_assembly_at_the_next_file_boundary() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.py"), "import b\n").unwrap();
        std::fs::write(dir.path().join("b.py"), "x = 1\n").unwrap();

        let config = RssgConfig::default();
        let token = CancellationToken::new();
        token.cancel();
        let (graph, _stats) =
            build_graph(&RepoPath::real(dir.path()), None, &config, false, Some(&token)).unwrap();
        assert_eq!(graph.node_count(), 0);
    }
}
