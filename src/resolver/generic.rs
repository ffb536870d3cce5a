//! Strategies shared across several languages: qualified-name/namespace map
//! lookup (Java, Kotlin, C#) and simple directory-relative suffix search
//! (Ruby, Rust, Lua, Bash, R), plus PHP's quote-stripped path search.

use std::path::{Path, PathBuf};

use super::ModuleMap;

/// `import x.y.Z` looks up `x.y.Z` exactly; `import x.y.*` matches every
/// module whose package (all but the last `.`-segment) equals `x.y`.
pub fn resolve_qualified_map(token: &str, module_map: &ModuleMap) -> Vec<PathBuf> {
    if let Some(package) = token.strip_suffix(".*") {
        return module_map
            .iter()
            .filter(|(name, _)| package_of(name) == package)
            .flat_map(|(_, paths)| paths.clone())
            .collect();
    }
    module_map.get(token).cloned().unwrap_or_default()
}

fn package_of(qualified_name: &str) -> &str {
    match qualified_name.rfind('.') {
        Some(idx) => &qualified_name[..idx],
        None => "",
    }
}

/// C#'s module name convention is the namespace text alone (not
/// qualified with a type name), so a `using` directive maps to every file
/// declaring that namespace.
pub fn resolve_namespace_map(token: &str, module_map: &ModuleMap) -> Vec<PathBuf> {
    module_map.get(token).cloned().unwrap_or_default()
}

/// Strip surrounding quotes the import finder may have left in place and
/// search the importer's directory, then the repo root, for `<token>.<ext>`.
pub fn resolve_suffix_search(token: &str, importer_path: &Path, ext: &str) -> Vec<PathBuf> {
    let token = token.trim_matches(|c| c == '"' || c == '\'');
    let Some(dir) = importer_path.parent() else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let candidate = dir.join(format!("{token}.{ext}"));
    if candidate.is_file() {
        out.push(candidate);
    }
    let literal = PathBuf::from(token);
    if literal.is_file() {
        out.push(literal);
    } else {
        let with_ext = PathBuf::from(format!("{token}.{ext}"));
        if with_ext.is_file() {
            out.push(with_ext);
        }
    }
    out
}

/// PHP `require`/`include`: quotes are already stripped by the import
/// finder. Resolve against the importer's directory, then as a
/// repo-root-relative or absolute path.
pub fn resolve_php_import(token: &str, importer_path: &Path, repo_root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    if let Some(dir) = importer_path.parent() {
        let candidate = dir.join(token);
        if candidate.is_file() {
            out.push(candidate);
        }
    }
    let absolute = PathBuf::from(token);
    if absolute.is_absolute() && absolute.is_file() {
        out.push(absolute);
    } else {
        let repo_relative = repo_root.join(token);
        if repo_relative.is_file() {
            out.push(repo_relative);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_import_matches_package_prefix() {
        let mut map = ModuleMap::new();
        map.insert("x.y.A".to_string(), vec![PathBuf::from("/r/A.java")]);
        map.insert("x.y.B".to_string(), vec![PathBuf::from("/r/B.java")]);
        map.insert("x.z.C".to_string(), vec![PathBuf::from("/r/C.java")]);

        let mut out = resolve_qualified_map("x.y.*", &map);
        out.sort();
        assert_eq!(out, vec![PathBuf::from("/r/A.java"), PathBuf::from("/r/B.java")]);
    }

    #[test]
    fn exact_qualified_name_lookup() {
        let mut map = ModuleMap::new();
        map.insert("x.y.A".to_string(), vec![PathBuf::from("/r/A.java")]);
        assert_eq!(resolve_qualified_map("x.y.A", &map), vec![PathBuf::from("/r/A.java")]);
    }
}
