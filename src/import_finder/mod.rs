//! Finds import-like statements and the module name of a source file.

pub mod queries;

use std::path::Path;

use std::sync::LazyLock;

use regex::Regex;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Query, QueryCursor};

use crate::language::Language;
use crate::location::Location;

/// One `import`/`require`/`use`/`#include` token found in a file, with the
/// span of the token tree-sitter (or the regex fallback) matched.
#[derive(Debug, Clone)]
pub struct ImportRecord {
    pub token: String,
    pub alias: Option<String>,
    pub location: Location,
}

/// Regex fallback for Lua (`require("mod")` / `require "mod"`) and R
/// (`library(pkg)` / `require(pkg)` / `source("file.R")`) — neither grammar
/// gives a clean import-statement node to query, so these produce the same
/// `ImportRecord` shape directly from line/column offsets.
static LUA_REQUIRE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"require\s*\(?\s*["']([^"']+)["']\s*\)?"#).unwrap());
static R_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:library|require|source)\s*\(\s*["']?([A-Za-z0-9_./]+)["']?\s*\)"#).unwrap()
});

pub fn find_imports(
    language: Language,
    file_path: &Path,
    ext: &str,
    source: &str,
    timeout_ms: u64,
) -> anyhow::Result<Vec<ImportRecord>> {
    match language {
        Language::Lua => Ok(find_by_regex(&LUA_REQUIRE, file_path, source)),
        Language::R => Ok(find_by_regex(&R_IMPORT, file_path, source)),
        Language::Bash => Ok(find_bash_source(file_path, source)),
        _ => find_by_query(language, file_path, ext, source, timeout_ms),
    }
}

fn find_by_regex(re: &Regex, file_path: &Path, source: &str) -> Vec<ImportRecord> {
    let mut out = Vec::new();
    for (line_idx, line) in source.split('\n').enumerate() {
        for cap in re.captures_iter(line) {
            let m = cap.get(1).unwrap();
            let line_no = line_idx + 1;
            out.push(ImportRecord {
                token: m.as_str().to_string(),
                alias: None,
                location: Location::span(file_path, line_no, m.start() + 1, line_no, m.end() + 1),
            });
        }
    }
    out
}

/// Bash has no grammar-level import construct in this table; `source`/`.`
/// are shell builtins, so treated the same as the Lua/R regex fallback.
fn find_bash_source(file_path: &Path, source: &str) -> Vec<ImportRecord> {
    static BASH_SOURCE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"(?:^|\s)(?:source|\.)\s+["']?([^\s"']+)["']?"#).unwrap());
    find_by_regex(&BASH_SOURCE, file_path, source)
}

fn find_by_query(
    language: Language,
    file_path: &Path,
    ext: &str,
    source: &str,
    timeout_ms: u64,
) -> anyhow::Result<Vec<ImportRecord>> {
    let Some(query_src) = queries::import_query(language) else {
        return Ok(Vec::new());
    };
    let ts_lang = crate::parser::ts_language(language, ext);
    let query = Query::new(&ts_lang, query_src)
        .map_err(|e| anyhow::anyhow!("invalid import query for {language}: {e}"))?;
    let tree = crate::parser::parse(language, source, ext, timeout_ms)?;

    let name_idx = query.capture_index_for_name("import_name");
    let alias_idx = query.capture_index_for_name("import_alias");

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());
    let mut out = Vec::new();
    while let Some(m) = matches.next() {
        let mut token: Option<String> = None;
        let mut alias: Option<String> = None;
        let mut loc: Option<Location> = None;
        for cap in m.captures {
            let text = cap
                .node
                .utf8_text(source.as_bytes())
                .unwrap_or_default()
                .trim_matches(|c| c == '"' || c == '\'' || c == '<' || c == '>')
                .to_string();
            if Some(cap.index as u32) == name_idx {
                let start = cap.node.start_position();
                let end = cap.node.end_position();
                loc = Some(Location::span(
                    file_path,
                    start.row + 1,
                    start.column + 1,
                    end.row + 1,
                    end.column + 1,
                ));
                token = Some(text);
            } else if Some(cap.index as u32) == alias_idx {
                alias = Some(text);
            }
        }
        if let (Some(token), Some(location)) = (token, loc) {
            out.push(ImportRecord { token, alias, location });
        }
    }
    Ok(out)
}

/// The module name convention, per language family:
/// - Java/Kotlin: `<package>.<file stem>`
/// - C#/Go: the enclosing namespace/package text alone
/// - TS/JS/Python/Ruby/Rust/Lua/R: the file stem
/// - PHP/C/C++/Bash: the file name including extension
/// - Swift: the parent directory name
pub fn find_module_name(language: Language, file_path: &Path, ext: &str, source: &str, timeout_ms: u64) -> String {
    let stem = file_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let file_name = file_path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    match language {
        Language::Java | Language::Kotlin => match package_name(language, ext, source, timeout_ms) {
            Some(pkg) if !pkg.is_empty() => format!("{pkg}.{stem}"),
            _ => stem,
        },
        Language::CSharp | Language::Go => package_name(language, ext, source, timeout_ms).unwrap_or(stem),
        Language::Php | Language::C | Language::Cpp | Language::Bash => file_name,
        Language::Swift => file_path
            .parent()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or(stem),
        _ => stem,
    }
}

fn package_name(language: Language, ext: &str, source: &str, timeout_ms: u64) -> Option<String> {
    let query_src = queries::package_query(language)?;
    let ts_lang = crate::parser::ts_language(language, ext);
    let query = Query::new(&ts_lang, query_src).ok()?;
    let tree = crate::parser::parse(language, source, ext, timeout_ms).ok()?;
    let idx = query.capture_index_for_name("package_name")?;

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());
    while let Some(m) = matches.next() {
        for cap in m.captures {
            if cap.index as u32 == idx {
                return cap.node.utf8_text(source.as_bytes()).ok().map(|s| s.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn finds_python_dotted_import() {
        let src = "import os.path\nfrom a.b import c\n";
        let imports = find_imports(Language::Python, &PathBuf::from("x.py"), "py", src, 5_000).unwrap();
        let tokens: Vec<&str> = imports.iter().map(|i| i.token.as_str()).collect();
        assert!(tokens.contains(&"os.path"));
        assert!(tokens.contains(&"a.b"));
    }

    #[test]
    fn finds_lua_require_via_regex() {
        let src = "local m = require(\"foo.bar\")\n";
        let imports = find_imports(Language::Lua, &PathBuf::from("x.lua"), "lua", src, 5_000).unwrap();
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].token, "foo.bar");
    }

    #[test]
    fn module_name_for_java_prefixes_package() {
        let src = "package com.example;\nclass X {}\n";
        let name = find_module_name(Language::Java, &PathBuf::from("X.java"), "java", src, 5_000);
        assert_eq!(name, "com.example.X");
    }

    #[test]
    fn module_name_for_rust_is_file_stem() {
        let name = find_module_name(Language::Rust, &PathBuf::from("lib.rs"), "rs", "fn f() {}\n", 5_000);
        assert_eq!(name, "lib");
    }
}
