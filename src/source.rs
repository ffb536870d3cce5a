//! Byte-level file read with encoding detection and a line-count guard.

use crate::error::{self, RssgError};
use crate::fs::RepoPath;

pub const DEFAULT_MAX_LINES: usize = 200_000;

/// Read `path` as UTF-8 text, truncating to `max_lines` lines if given.
///
/// Falls back to lossy decoding on invalid UTF-8 (emitting one warning);
/// never returns `Err` for a decode failure — a bad file degrades to empty
/// content rather than aborting the build.
pub fn read_text(path: &RepoPath, max_lines: Option<usize>) -> anyhow::Result<String> {
    let bytes = path.read_bytes()?;

    let text = match String::from_utf8(bytes.clone()) {
        Ok(s) => s,
        Err(_) => {
            let lossy = String::from_utf8_lossy(&bytes).into_owned();
            if lossy.is_empty() && !bytes.is_empty() {
                error::warn(RssgError::DecodeError {
                    path: path.as_path().to_path_buf(),
                });
                return Ok(String::new());
            }
            error::warn(format!(
                "{}: not valid UTF-8, falling back to lossy decode",
                path.as_path().display()
            ));
            lossy
        }
    };

    Ok(match max_lines {
        Some(limit) => truncate_lines(&text, limit),
        None => text,
    })
}

fn truncate_lines(text: &str, max_lines: usize) -> String {
    let mut out = String::new();
    for (i, line) in text.split('\n').enumerate() {
        if i >= max_lines {
            break;
        }
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::VirtualFs;

    #[test]
    fn reads_small_file_whole() {
        let fs = VirtualFs::new();
        fs.write_text("/r/a.py", "a\nb\nc");
        let p = RepoPath::virtual_(fs, "/r/a.py");
        assert_eq!(read_text(&p, Some(10)).unwrap(), "a\nb\nc");
    }

    #[test]
    fn truncates_oversized_file() {
        let fs = VirtualFs::new();
        let content = (0..10).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        fs.write_text("/r/big.py", content);
        let p = RepoPath::virtual_(fs, "/r/big.py");
        let got = read_text(&p, Some(3)).unwrap();
        assert_eq!(got, "0\n1\n2");
    }

    #[test]
    fn lossy_decode_on_invalid_utf8() {
        let fs = VirtualFs::new();
        // VirtualFs stores Strings so this path goes through the real decoder instead;
        // exercise `truncate_lines` directly for the invalid-byte path via a real file.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.py");
        std::fs::write(&path, [0xff, 0xfe, b'a']).unwrap();
        let p = RepoPath::real(&path);
        let got = read_text(&p, None).unwrap();
        assert!(got.contains('a'));
    }
}
