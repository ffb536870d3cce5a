//! Source file enumeration over a [`RepoPath`] — a real directory (walked
//! gitignore-aware) or a virtual in-memory tree — filtered by the
//! 16-language extension table and any extra exclude globs from config.

use std::collections::HashSet;
use std::path::Path;

use crate::config::RssgConfig;
use crate::fs::RepoPath;
use crate::language::Language;

/// Walk a project root and collect source files whose extension matches one
/// of `allowed_languages` (or any of the 16 when `None`).
///
/// Respects `.gitignore` rules (real roots only) and any additional
/// exclusions from `config.exclude`. When `verbose` is true, each
/// discovered file path is printed to stderr.
pub fn walk_project(
    root: &RepoPath,
    config: &RssgConfig,
    verbose: bool,
    allowed_languages: Option<&HashSet<Language>>,
) -> anyhow::Result<Vec<RepoPath>> {
    let mut out = Vec::new();

    for entry in root.walk_files() {
        let path = entry.as_path();

        if is_excluded_by_config(path, config) {
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let Some(language) = Language::from_extension(ext) else {
            continue;
        };

        if let Some(langs) = allowed_languages
            && !langs.contains(&language)
        {
            continue;
        }

        if verbose {
            eprintln!("{}", path.display());
        }

        out.push(entry);
    }

    Ok(out)
}

fn is_excluded_by_config(path: &Path, config: &RssgConfig) -> bool {
    let patterns = match &config.exclude {
        Some(p) => p,
        None => return false,
    };

    let path_str = path.to_string_lossy();

    for pattern in patterns {
        if let Ok(matched) = glob::Pattern::new(pattern)
            && matched.matches(&path_str)
        {
            return true;
        }
        for component in path.components() {
            if let Some(s) = component.as_os_str().to_str()
                && let Ok(matched) = glob::Pattern::new(pattern)
                && matched.matches(s)
            {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::VirtualFs;
    use tempfile::TempDir;

    #[test]
    fn discovers_files_across_languages() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.py"), "x = 1\n").unwrap();
        std::fs::write(dir.path().join("b.rs"), "fn f() {}\n").unwrap();
        std::fs::write(dir.path().join("c.unknown"), "???").unwrap();

        let cfg = RssgConfig::default();
        let files = walk_project(&RepoPath::real(dir.path()), &cfg, false, None).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn respects_language_filter() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.py"), "x = 1\n").unwrap();
        std::fs::write(dir.path().join("b.rs"), "fn f() {}\n").unwrap();

        let cfg = RssgConfig::default();
        let mut only_rust = HashSet::new();
        only_rust.insert(Language::Rust);
        let files = walk_project(&RepoPath::real(dir.path()), &cfg, false, Some(&only_rust)).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].as_path().ends_with("b.rs"));
    }

    #[test]
    fn honours_config_exclude_patterns() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("vendor")).unwrap();
        std::fs::write(dir.path().join("vendor/a.py"), "x = 1\n").unwrap();
        std::fs::write(dir.path().join("b.py"), "x = 1\n").unwrap();

        let mut cfg = RssgConfig::default();
        cfg.exclude = Some(vec!["vendor".to_string()]);
        let files = walk_project(&RepoPath::real(dir.path()), &cfg, false, None).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].as_path().ends_with("b.py"));
    }

    #[test]
    fn walks_a_virtual_repository() {
        let fs = VirtualFs::new();
        fs.write_text("/repo/a.py", "x = 1\n");
        fs.write_text("/repo/notes.txt", "not source\n");
        let cfg = RssgConfig::default();
        let files = walk_project(&RepoPath::virtual_(fs, "/repo"), &cfg, false, None).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].as_path().ends_with("a.py"));
    }
}
