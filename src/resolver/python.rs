//! Python import resolution: a conservative emulator of CPython's import
//! search (dot-level relative imports, `__init__.py`/`.py` file search,
//! builtin-module short-circuit).

use std::path::{Path, PathBuf};

/// A conservative subset of CPython's standard library module names —
/// enough to short-circuit the common case: a builtin import never
/// resolves to a file in the repo.
const BUILTIN_MODULES: &[&str] = &[
    "os", "sys", "re", "json", "typing", "collections", "itertools", "functools", "math",
    "random", "string", "io", "abc", "copy", "dataclasses", "datetime", "enum", "logging",
    "pathlib", "subprocess", "threading", "asyncio", "unittest", "argparse", "shutil",
    "tempfile", "traceback", "warnings", "weakref", "contextlib", "inspect", "importlib",
];

pub fn resolve_python_import(token: &str, importer_path: &Path, repo_root: &Path) -> Vec<PathBuf> {
    let (dot_level, remainder) = split_dots(token);
    if dot_level == 0 && BUILTIN_MODULES.contains(&remainder.split('.').next().unwrap_or("")) {
        return Vec::new();
    }

    let segments: Vec<&str> = remainder.split('.').filter(|s| !s.is_empty()).collect();
    let mut out = Vec::new();

    if dot_level > 0 {
        // Relative import: ascend (dot_level - 1) directories from the
        // importer's own directory, then descend into `segments`.
        if let Some(base) = ascend(importer_path, dot_level.saturating_sub(1)) {
            try_candidate(&base, &segments, &mut out);
        }
    } else {
        // Absolute import: try both repo root and the importer's directory
        // (the latter covers same-package sibling imports without a
        // leading dot, which CPython's finder also accepts via sys.path).
        try_candidate(repo_root, &segments, &mut out);
        if let Some(dir) = importer_path.parent() {
            try_candidate(dir, &segments, &mut out);
        }
        // `from a.b.c import d`: `d` may be a symbol inside module `a.b.c`
        // rather than a submodule of it — also try the prefix with the
        // last segment dropped.
        if segments.len() > 1 {
            let prefix = &segments[..segments.len() - 1];
            try_candidate(repo_root, prefix, &mut out);
            if let Some(dir) = importer_path.parent() {
                try_candidate(dir, prefix, &mut out);
            }
        }
    }

    out.retain(|p| p != importer_path);
    out
}

fn split_dots(token: &str) -> (usize, &str) {
    let dots = token.chars().take_while(|&c| c == '.').count();
    (dots, &token[dots..])
}

fn ascend(path: &Path, levels: usize) -> Option<PathBuf> {
    let mut dir = path.parent()?.to_path_buf();
    for _ in 0..levels {
        dir = dir.parent()?.to_path_buf();
    }
    Some(dir)
}

fn try_candidate(base: &Path, segments: &[&str], out: &mut Vec<PathBuf>) {
    if segments.is_empty() {
        return;
    }
    let module_dir = segments.iter().fold(base.to_path_buf(), |p, seg| p.join(seg));

    let init_py = module_dir.join("__init__.py");
    if init_py.is_file() {
        out.push(init_py);
        return;
    }

    let as_file = {
        let mut p = module_dir.clone();
        p.set_extension("py");
        p
    };
    if as_file.is_file() {
        out.push(as_file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn resolves_absolute_import_from_repo_root() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("a")).unwrap();
        std::fs::write(dir.path().join("a/b.py"), "").unwrap();
        let importer = dir.path().join("main.py");
        std::fs::write(&importer, "").unwrap();

        let out = resolve_python_import("a.b", &importer, dir.path());
        assert_eq!(out, vec![dir.path().join("a/b.py")]);
    }

    #[test]
    fn builtin_module_resolves_to_nothing() {
        let dir = TempDir::new().unwrap();
        let importer = dir.path().join("main.py");
        assert!(resolve_python_import("os.path", &importer, dir.path()).is_empty());
    }

    #[test]
    fn relative_import_ascends_by_dot_level() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("pkg/sub")).unwrap();
        std::fs::write(dir.path().join("pkg/sibling.py"), "").unwrap();
        let importer = dir.path().join("pkg/sub/mod.py");
        std::fs::write(&importer, "").unwrap();

        // `from .. import sibling` -> 2 leading dots, remainder "sibling".
        let out = resolve_python_import("..sibling", &importer, dir.path());
        assert_eq!(out, vec![dir.path().join("pkg/sibling.py")]);
    }

    #[test]
    fn never_resolves_a_module_to_its_own_file() {
        let dir = TempDir::new().unwrap();
        let importer = dir.path().join("a.py");
        std::fs::write(&importer, "").unwrap();
        let out = resolve_python_import("a", &importer, dir.path());
        assert!(!out.contains(&importer));
    }
}
