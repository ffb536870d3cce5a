//! Per-language import-token resolution. Dispatch is a plain table lookup
//! on [`Language`]; each language family gets its own strategy module.

mod cfamily;
mod generic;
mod go;
mod python;
mod swift;
mod ts_js;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::language::Language;

/// `module_name -> [file paths with that module name]`, built by the
/// Builder's first pass over every discovered file.
pub type ModuleMap = HashMap<String, Vec<PathBuf>>;

/// Resolve one import `token` found in `importer_path` to zero or more
/// files on disk. Never panics; an unresolvable token yields an empty
/// vector — missing resolutions are silently dropped, never fatal.
pub fn resolve(
    language: Language,
    token: &str,
    importer_path: &Path,
    repo_root: &Path,
    module_map: &ModuleMap,
) -> Vec<PathBuf> {
    let mut results = match language {
        Language::Java | Language::Kotlin => generic::resolve_qualified_map(token, module_map),
        Language::CSharp => generic::resolve_namespace_map(token, module_map),
        Language::Go => go::resolve_go_import(token, importer_path, repo_root),
        Language::TypeScript | Language::JavaScript => {
            ts_js::resolve_ts_js_import(token, importer_path, module_map)
        }
        Language::Python => python::resolve_python_import(token, importer_path, repo_root),
        Language::Php => generic::resolve_php_import(token, importer_path, repo_root),
        Language::Ruby => generic::resolve_suffix_search(token, importer_path, "rb"),
        Language::C | Language::Cpp => cfamily::resolve_cfamily_import(token, importer_path, repo_root),
        Language::Swift => swift::resolve_swift_import(token, importer_path, repo_root),
        Language::Rust => generic::resolve_suffix_search(token, importer_path, "rs"),
        Language::Lua => generic::resolve_suffix_search(token, importer_path, "lua"),
        Language::Bash => generic::resolve_suffix_search(token, importer_path, "sh"),
        Language::R => generic::resolve_suffix_search(token, importer_path, "r"),
    };

    results.retain(|p| p != importer_path);
    results.sort();
    results.dedup();
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_token_resolves_to_nothing() {
        let map = ModuleMap::new();
        let out = resolve(
            Language::Java,
            "com.nonexistent.Thing",
            Path::new("/repo/A.java"),
            Path::new("/repo"),
            &map,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn never_resolves_a_file_to_itself() {
        let mut map = ModuleMap::new();
        map.insert("a".to_string(), vec![PathBuf::from("/repo/a.py")]);
        let out = python::resolve_python_import("a", Path::new("/repo/a.py"), Path::new("/repo"));
        assert!(!out.contains(&PathBuf::from("/repo/a.py")));
        let _ = out;
    }
}
