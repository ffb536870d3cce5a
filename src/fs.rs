//! Filesystem abstraction: real OS paths and virtual in-memory paths behind
//! one contract, so the Graph Builder can be driven from disk or from a
//! test fixture without caring which.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::RssgError;

/// An in-memory file tree: path -> UTF-8 content. Shared behind an `Arc` so
/// cloning a `VirtualFs` handle is cheap and every clone sees the same files.
#[derive(Debug, Default, Clone)]
pub struct VirtualFs {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl VirtualFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_text(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.lock().unwrap().insert(path.into(), content.into());
    }
}

/// Either a real OS path or a path into a `VirtualFs`. Both sides expose the
/// same `{ join, parent, name, stem, exists, is_file, is_dir, read_text,
/// rglob }` contract.
#[derive(Debug, Clone)]
pub enum RepoPath {
    Real(PathBuf),
    Virtual(VirtualFs, PathBuf),
}

impl RepoPath {
    pub fn real(path: impl Into<PathBuf>) -> Self {
        Self::Real(path.into())
    }

    pub fn virtual_(fs: VirtualFs, path: impl Into<PathBuf>) -> Self {
        Self::Virtual(fs, path.into())
    }

    pub fn as_path(&self) -> &Path {
        match self {
            Self::Real(p) => p,
            Self::Virtual(_, p) => p,
        }
    }

    pub fn join(&self, segment: impl AsRef<Path>) -> Self {
        match self {
            Self::Real(p) => Self::Real(p.join(segment)),
            Self::Virtual(fs, p) => Self::Virtual(fs.clone(), p.join(segment)),
        }
    }

    pub fn parent(&self) -> Option<Self> {
        match self {
            Self::Real(p) => p.parent().map(|p| Self::Real(p.to_path_buf())),
            Self::Virtual(fs, p) => p.parent().map(|p| Self::Virtual(fs.clone(), p.to_path_buf())),
        }
    }

    pub fn name(&self) -> Option<String> {
        self.as_path().file_name().map(|s| s.to_string_lossy().into_owned())
    }

    pub fn stem(&self) -> Option<String> {
        self.as_path().file_stem().map(|s| s.to_string_lossy().into_owned())
    }

    pub fn suffix(&self) -> Option<String> {
        self.as_path()
            .extension()
            .map(|s| format!(".{}", s.to_string_lossy()))
    }

    pub fn with_suffix(&self, suffix: &str) -> Self {
        let stripped = suffix.strip_prefix('.').unwrap_or(suffix);
        match self {
            Self::Real(p) => Self::Real(p.with_extension(stripped)),
            Self::Virtual(fs, p) => Self::Virtual(fs.clone(), p.with_extension(stripped)),
        }
    }

    pub fn exists(&self) -> bool {
        match self {
            Self::Real(p) => p.exists(),
            Self::Virtual(fs, p) => fs.files.lock().unwrap().contains_key(p),
        }
    }

    pub fn is_file(&self) -> bool {
        match self {
            Self::Real(p) => p.is_file(),
            Self::Virtual(fs, p) => fs.files.lock().unwrap().contains_key(p),
        }
    }

    pub fn is_dir(&self) -> bool {
        match self {
            Self::Real(p) => p.is_dir(),
            Self::Virtual(fs, p) => {
                let prefix = p.to_string_lossy().into_owned();
                fs.files.lock().unwrap().keys().any(|k| {
                    k != p
                        && k.to_string_lossy()
                            .starts_with(&format!("{prefix}/"))
                })
            }
        }
    }

    pub fn is_relative_to(&self, base: &RepoPath) -> bool {
        self.as_path().starts_with(base.as_path())
    }

    pub fn relative_to(&self, base: &RepoPath) -> Option<PathBuf> {
        self.as_path().strip_prefix(base.as_path()).ok().map(|p| p.to_path_buf())
    }

    pub fn absolute(&self) -> Self {
        match self {
            Self::Real(p) => Self::Real(crate::location::canonicalize_best_effort(p)),
            other => other.clone(),
        }
    }

    /// Read the raw bytes of this path.
    pub fn read_bytes(&self) -> anyhow::Result<Vec<u8>> {
        match self {
            Self::Real(p) => std::fs::read(p).map_err(|e| {
                anyhow::Error::new(RssgError::IoError {
                    path: p.clone(),
                    message: e.to_string(),
                })
            }),
            Self::Virtual(fs, p) => fs
                .files
                .lock()
                .unwrap()
                .get(p)
                .map(|s| s.as_bytes().to_vec())
                .ok_or_else(|| {
                    anyhow::Error::new(RssgError::IoError {
                        path: p.clone(),
                        message: "no such virtual file".into(),
                    })
                }),
        }
    }

    /// All files under this directory. Real roots are walked with
    /// `ignore::WalkBuilder` (gitignore-aware); a virtual tree has no
    /// ignore rules, so every stored file under the prefix is returned.
    pub fn walk_files(&self) -> Vec<RepoPath> {
        match self {
            Self::Real(root) => {
                let mut out = Vec::new();
                let walker = ignore::WalkBuilder::new(root)
                    .standard_filters(true)
                    .require_git(false)
                    .build();
                for entry in walker.flatten() {
                    if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                        out.push(RepoPath::Real(entry.path().to_path_buf()));
                    }
                }
                out
            }
            Self::Virtual(fs, root) => {
                let prefix = format!("{}/", root.to_string_lossy());
                fs.files
                    .lock()
                    .unwrap()
                    .keys()
                    .filter(|k| k.to_string_lossy().starts_with(&prefix))
                    .cloned()
                    .map(|k| RepoPath::Virtual(fs.clone(), k))
                    .collect()
            }
        }
    }

    /// Recursively list entries matching `*<suffix>` under this directory.
    pub fn rglob(&self, suffix: &str) -> Vec<RepoPath> {
        match self {
            Self::Real(root) => {
                let mut out = Vec::new();
                let walker = ignore::WalkBuilder::new(root)
                    .standard_filters(true)
                    .require_git(false)
                    .build();
                for entry in walker.flatten() {
                    if entry.file_type().map(|t| t.is_file()).unwrap_or(false)
                        && entry.path().to_string_lossy().ends_with(suffix)
                    {
                        out.push(RepoPath::Real(entry.path().to_path_buf()));
                    }
                }
                out
            }
            Self::Virtual(fs, root) => {
                let root_str = root.to_string_lossy().into_owned();
                fs.files
                    .lock()
                    .unwrap()
                    .keys()
                    .filter(|k| {
                        let s = k.to_string_lossy();
                        s.starts_with(&root_str) && s.ends_with(suffix)
                    })
                    .map(|k| RepoPath::Virtual(fs.clone(), k.clone()))
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_path_roundtrip() {
        let fs = VirtualFs::new();
        fs.write_text("/repo/a.py", "print(1)\n");
        let p = RepoPath::virtual_(fs, "/repo/a.py");
        assert!(p.exists());
        assert!(p.is_file());
        assert_eq!(p.stem(), Some("a".to_string()));
        assert_eq!(String::from_utf8(p.read_bytes().unwrap()).unwrap(), "print(1)\n");
    }

    #[test]
    fn virtual_rglob_finds_suffix() {
        let fs = VirtualFs::new();
        fs.write_text("/repo/a/x.py", "x");
        fs.write_text("/repo/b/y.py", "y");
        fs.write_text("/repo/b/z.txt", "z");
        let root = RepoPath::virtual_(fs, "/repo");
        let matches = root.rglob(".py");
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn virtual_walk_files_lists_everything_under_root() {
        let fs = VirtualFs::new();
        fs.write_text("/repo/a.py", "x");
        fs.write_text("/repo/sub/b.py", "y");
        let root = RepoPath::virtual_(fs, "/repo");
        assert_eq!(root.walk_files().len(), 2);
    }

    #[test]
    fn real_path_join_and_parent() {
        let p = RepoPath::real("/repo");
        let child = p.join("a.py");
        assert_eq!(child.as_path(), Path::new("/repo/a.py"));
        assert_eq!(child.parent().unwrap().as_path(), Path::new("/repo"));
    }
}
