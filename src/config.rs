use std::path::Path;

use serde::Deserialize;

use crate::source::DEFAULT_MAX_LINES;

pub const DEFAULT_FILE_TIMEOUT_MS: u64 = 5_000;

/// Configuration loaded from `rssg.toml` at the project root.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RssgConfig {
    /// Additional path patterns to exclude from indexing (beyond .gitignore).
    pub exclude: Option<Vec<String>>,
    /// Files with more lines than this are truncated rather than parsed in full.
    pub max_lines_per_file: usize,
    /// Wall-clock budget per file; a file that blows past it is skipped with a warning.
    pub file_timeout_ms: u64,
    /// Restrict the build to this subset of languages; `None` means all 16.
    pub languages: Option<Vec<String>>,
}

impl Default for RssgConfig {
    fn default() -> Self {
        Self {
            exclude: None,
            max_lines_per_file: DEFAULT_MAX_LINES,
            file_timeout_ms: DEFAULT_FILE_TIMEOUT_MS,
            languages: None,
        }
    }
}

impl RssgConfig {
    /// Load configuration from `rssg.toml` in the given root directory.
    ///
    /// Returns a default configuration if the file does not exist or cannot
    /// be parsed (a warning is printed to stderr in the latter case).
    pub fn load(root: &Path) -> Self {
        let config_path = root.join("rssg.toml");

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => config,
                Err(err) => {
                    crate::error::warn(format!("failed to parse rssg.toml: {err}. Using defaults."));
                    Self::default()
                }
            },
            Err(err) => {
                crate::error::warn(format!("failed to read rssg.toml: {err}. Using defaults."));
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_file_is_default() {
        let dir = TempDir::new().unwrap();
        let cfg = RssgConfig::load(dir.path());
        assert_eq!(cfg.max_lines_per_file, DEFAULT_MAX_LINES);
        assert!(cfg.exclude.is_none());
    }

    #[test]
    fn parses_overrides() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("rssg.toml"),
            "max_lines_per_file = 500\nlanguages = [\"python\", \"rust\"]\n",
        )
        .unwrap();
        let cfg = RssgConfig::load(dir.path());
        assert_eq!(cfg.max_lines_per_file, 500);
        assert_eq!(cfg.languages.unwrap(), vec!["python", "rust"]);
    }
}
