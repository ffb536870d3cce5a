//! 1-based inclusive line/column spans and text slicing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// An anchored textual span. Absence of all four coordinates means "unknown
/// or whole file". Two locations are equal iff their string forms are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub file_path: PathBuf,
    pub start_line: Option<usize>,
    pub start_column: Option<usize>,
    pub end_line: Option<usize>,
    pub end_column: Option<usize>,
}

impl Location {
    pub fn whole_file(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            start_line: None,
            start_column: None,
            end_line: None,
            end_column: None,
        }
    }

    pub fn span(
        file_path: impl Into<PathBuf>,
        start_line: usize,
        start_column: usize,
        end_line: usize,
        end_column: usize,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            start_line: Some(start_line),
            start_column: Some(start_column),
            end_line: Some(end_line),
            end_column: Some(end_column),
        }
    }

    fn has_span(&self) -> bool {
        self.start_line.is_some()
            || self.start_column.is_some()
            || self.end_line.is_some()
            || self.end_column.is_some()
    }

    /// The string form used for identity and sort ordering:
    /// `<path>[:sl:sc-el:ec]`, tail omitted if all four coordinates are absent.
    pub fn to_key(&self) -> String {
        let mut out = self.file_path.display().to_string();
        if self.has_span() {
            out.push_str(&format!(
                ":{}:{}-{}:{}",
                self.start_line.unwrap_or(0),
                self.start_column.unwrap_or(0),
                self.end_line.unwrap_or(0),
                self.end_column.unwrap_or(0)
            ));
        }
        out
    }

    /// Extract the spanned text from `content`, the full text of `file_path`.
    /// Returns `None` when any coordinate is missing.
    pub fn text(&self, content: &str) -> Option<String> {
        let (sl, sc, el, ec) = (
            self.start_line?,
            self.start_column?,
            self.end_line?,
            self.end_column?,
        );
        Some(slice_text(content, sl, sc, el, ec))
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.to_key() == other.to_key()
    }
}
impl Eq for Location {}

impl std::hash::Hash for Location {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.to_key().hash(state);
    }
}

/// Split `text` into substring spanning `(start_line, start_column)` through
/// `(end_line, end_column)`, 1-based, start column inclusive, end column
/// exclusive. Lines are split on `"\n"`. Out-of-range columns clamp to the
/// line end.
pub fn slice_text(
    text: &str,
    start_line: usize,
    start_column: usize,
    end_line: usize,
    end_column: usize,
) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let sl = start_line.saturating_sub(1).min(lines.len().saturating_sub(1));
    let el = end_line.saturating_sub(1).min(lines.len().saturating_sub(1));

    if sl == el {
        let line = lines.get(sl).copied().unwrap_or("");
        let sc = start_column.saturating_sub(1).min(line.len());
        let ec = end_column.saturating_sub(1).min(line.len()).max(sc);
        return line[sc..ec].to_string();
    }

    let mut out = String::new();
    for (i, line) in lines.iter().enumerate().take(el + 1).skip(sl) {
        if i == sl {
            let sc = start_column.saturating_sub(1).min(line.len());
            out.push_str(&line[sc..]);
        } else if i == el {
            let ec = end_column.saturating_sub(1).min(line.len());
            out.push_str(&line[..ec]);
        } else {
            out.push_str(line);
        }
        if i != el {
            out.push('\n');
        }
    }
    out
}

/// Like `slice_text` but also returns the text immediately before and after
/// the span, up to the surrounding line boundaries.
pub fn slice_text_around(
    text: &str,
    start_line: usize,
    start_column: usize,
    end_line: usize,
    end_column: usize,
) -> (String, String, String) {
    let lines: Vec<&str> = text.split('\n').collect();
    let sl = start_line.saturating_sub(1).min(lines.len().saturating_sub(1));
    let el = end_line.saturating_sub(1).min(lines.len().saturating_sub(1));

    let prefix = lines
        .get(sl)
        .map(|line| {
            let sc = start_column.saturating_sub(1).min(line.len());
            line[..sc].to_string()
        })
        .unwrap_or_default();

    let suffix = lines
        .get(el)
        .map(|line| {
            let ec = end_column.saturating_sub(1).min(line.len());
            line[ec..].to_string()
        })
        .unwrap_or_default();

    let slice = slice_text(text, start_line, start_column, end_line, end_column);
    (prefix, slice, suffix)
}

/// Canonicalise `path` to absolute form without requiring it to exist
/// (falls back to joining against the current directory on failure).
pub fn canonicalize_best_effort(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .unwrap_or_default()
                .join(path)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_omits_span_when_absent() {
        let loc = Location::whole_file("/repo/a.py");
        assert_eq!(loc.to_key(), "/repo/a.py");
    }

    #[test]
    fn key_includes_span_when_present() {
        let loc = Location::span("/repo/a.py", 1, 1, 3, 5);
        assert_eq!(loc.to_key(), "/repo/a.py:1:1-3:5");
    }

    #[test]
    fn slice_single_line() {
        let text = "abcdef\nghij";
        assert_eq!(slice_text(text, 1, 2, 1, 5), "bcd");
    }

    #[test]
    fn slice_multi_line() {
        let text = "abc\ndef\nghi";
        assert_eq!(slice_text(text, 1, 2, 3, 2), "bc\ndef\ng");
    }

    #[test]
    fn slice_clamps_out_of_range_column() {
        let text = "abc\ndef";
        assert_eq!(slice_text(text, 1, 1, 1, 100), "abc");
    }

    #[test]
    fn locations_equal_by_string_form() {
        let a = Location::span("/r/a.py", 1, 1, 2, 2);
        let b = Location::span("/r/a.py", 1, 1, 2, 2);
        assert_eq!(a, b);
    }
}
