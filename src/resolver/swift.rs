//! Swift import resolution: strip any trailing `.symbol` fragment from the
//! module token, then search `Sources/`, `Tests/`, `Modules/`, the
//! importer's ancestor directories, and their siblings for a directory or
//! file named after the module.

use std::path::{Path, PathBuf};

pub fn resolve_swift_import(token: &str, importer_path: &Path, repo_root: &Path) -> Vec<PathBuf> {
    let module = token.split('.').next().unwrap_or(token);

    let mut search_roots = vec![
        repo_root.join("Sources"),
        repo_root.join("Tests"),
        repo_root.join("Modules"),
    ];
    for ancestor in importer_path.ancestors().skip(1) {
        search_roots.push(ancestor.to_path_buf());
        if let Some(parent) = ancestor.parent() {
            search_roots.push(parent.to_path_buf());
        }
    }

    for root in &search_roots {
        let module_dir = root.join(module);
        if module_dir.is_dir() {
            return list_swift_files(&module_dir, importer_path);
        }
        let single_file = root.join(format!("{module}.swift"));
        if single_file.is_file() && single_file != importer_path {
            return vec![single_file];
        }
    }

    Vec::new()
}

fn list_swift_files(dir: &Path, importer_path: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("swift") && path != importer_path {
                out.push(path);
            }
        }
    }
    out
}
