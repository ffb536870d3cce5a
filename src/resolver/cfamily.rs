//! C/C++ `#include` resolution: quote/angle-bracket stripping followed by a
//! fixed search-path order: `<repo>/include`, the importer's directory,
//! `<repo>/src`, the literal path, each ancestor of the importer, and each
//! sibling of each ancestor.

use std::path::{Path, PathBuf};

pub fn resolve_cfamily_import(token: &str, importer_path: &Path, repo_root: &Path) -> Vec<PathBuf> {
    let token = token.trim_matches(|c| c == '"' || c == '<' || c == '>');

    let mut search_dirs = vec![repo_root.join("include")];
    if let Some(dir) = importer_path.parent() {
        search_dirs.push(dir.to_path_buf());
    }
    search_dirs.push(repo_root.join("src"));

    for dir in &search_dirs {
        let candidate = dir.join(token);
        if candidate.is_file() {
            return vec![candidate];
        }
    }

    let literal = PathBuf::from(token);
    if literal.is_file() {
        return vec![literal];
    }

    for ancestor in importer_path.ancestors().skip(1) {
        let candidate = ancestor.join(token);
        if candidate.is_file() {
            return vec![candidate];
        }
        if let Some(parent) = ancestor.parent()
            && let Ok(siblings) = std::fs::read_dir(parent)
        {
            for sibling in siblings.flatten() {
                let candidate = sibling.path().join(token);
                if candidate.is_file() {
                    return vec![candidate];
                }
            }
        }
    }

    Vec::new()
}
