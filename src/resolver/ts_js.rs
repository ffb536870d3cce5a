//! TypeScript/JavaScript import resolution: relative-path + `index.*`
//! resolution for `./`/`../` specifiers, module-map lookup otherwise.

use std::path::{Path, PathBuf};

use super::ModuleMap;

const EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

pub fn resolve_ts_js_import(token: &str, importer_path: &Path, module_map: &ModuleMap) -> Vec<PathBuf> {
    let token = token.trim_matches(|c| c == '"' || c == '\'');

    if !token.starts_with('.') {
        return module_map.get(token).cloned().unwrap_or_default();
    }

    let Some(dir) = importer_path.parent() else {
        return Vec::new();
    };
    let joined = dir.join(token);

    for ext in EXTENSIONS {
        let candidate = with_extension(&joined, ext);
        if candidate.is_file() {
            return vec![candidate];
        }
    }

    if joined.is_dir() {
        for ext in EXTENSIONS {
            let candidate = joined.join(format!("index.{ext}"));
            if candidate.is_file() {
                return vec![candidate];
            }
        }
    }

    Vec::new()
}

fn with_extension(path: &Path, ext: &str) -> PathBuf {
    match path.extension() {
        Some(e) if e.eq_ignore_ascii_case(ext) => path.to_path_buf(),
        _ => {
            let mut s = path.as_os_str().to_os_string();
            s.push(".");
            s.push(ext);
            PathBuf::from(s)
        }
    }
}
