//! Go import resolution: parses `go.mod` for the module path and `replace`
//! directives, rewrites the import path accordingly, then searches
//! `src`/`vendor`/`pkg` (or the literal path) for the target directory, and
//! returns every `.go` file in it.

use std::path::{Path, PathBuf};

struct GoMod {
    module_path: String,
    /// `old import prefix -> new local directory`.
    replacements: Vec<(String, PathBuf)>,
}

fn parse_go_mod(repo_root: &Path) -> Option<GoMod> {
    let text = std::fs::read_to_string(repo_root.join("go.mod")).ok()?;
    let mut module_path = String::new();
    let mut replacements = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("module ") {
            module_path = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("replace ") {
            // `replace old => ../local/path` (version suffixes ignored).
            if let Some((old, new)) = rest.split_once("=>") {
                let old = old.split_whitespace().next().unwrap_or("").to_string();
                let new = new.trim();
                let new_path = repo_root.join(new);
                if !old.is_empty() {
                    replacements.push((old, new_path));
                }
            }
        }
    }

    if module_path.is_empty() {
        None
    } else {
        Some(GoMod { module_path, replacements })
    }
}

pub fn resolve_go_import(token: &str, importer_path: &Path, repo_root: &Path) -> Vec<PathBuf> {
    let token = token.trim_matches(|c| c == '"');

    let dir = match parse_go_mod(repo_root) {
        Some(gomod) => {
            if let Some((old, new_dir)) = gomod.replacements.iter().find(|(old, _)| token.starts_with(old.as_str()))
            {
                let rest = token.strip_prefix(old.as_str()).unwrap_or("").trim_start_matches('/');
                Some(new_dir.join(rest))
            } else if let Some(rest) = token.strip_prefix(&gomod.module_path) {
                Some(repo_root.join(rest.trim_start_matches('/')))
            } else {
                None
            }
        }
        None => None,
    };

    let candidates = dir.into_iter().chain([
        repo_root.join("src").join(token),
        repo_root.join("vendor").join(token),
        repo_root.join("pkg").join(token),
        PathBuf::from(token),
    ]);

    for candidate in candidates {
        if candidate.is_dir() {
            return list_go_files(&candidate, importer_path);
        }
    }

    Vec::new()
}

fn list_go_files(dir: &Path, importer_path: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("go"))
        .filter(|p| p != importer_path)
        .collect()
}
