//! Error taxonomy for the graph pipeline.
//!
//! All fallible APIs return `anyhow::Result`; `RssgError` is attached via
//! `.context()`/`anyhow::Error::new` at the point an error kind is known, so a
//! caller can still recover the kind with `err.downcast_ref::<RssgError>()`.
//! Only `InputError` and `InvariantViolation` are allowed to abort a build —
//! every other kind is caught and logged at the point of occurrence.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum RssgError {
    /// Repo path missing, path is a file, or language not supported.
    InputError(String),
    /// File read failed.
    IoError { path: PathBuf, message: String },
    /// Content is not valid UTF-8 and lossy decode still fails.
    DecodeError { path: PathBuf },
    /// Tree-sitter failed or returned an unusable tree.
    ParseError { path: PathBuf, message: String },
    /// Import resolver could not map a token.
    ResolveError { token: String, importer: PathBuf },
    /// An internal check failed, e.g. a requested inverse edge is missing.
    InvariantViolation(String),
}

impl fmt::Display for RssgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputError(msg) => write!(f, "input error: {msg}"),
            Self::IoError { path, message } => {
                write!(f, "io error reading {}: {message}", path.display())
            }
            Self::DecodeError { path } => {
                write!(f, "decode error: {} is not valid UTF-8", path.display())
            }
            Self::ParseError { path, message } => {
                write!(f, "parse error in {}: {message}", path.display())
            }
            Self::ResolveError { token, importer } => write!(
                f,
                "could not resolve import '{token}' in {}",
                importer.display()
            ),
            Self::InvariantViolation(msg) => write!(f, "invariant violation: {msg}"),
        }
    }
}

impl std::error::Error for RssgError {}

/// Print a warning for a recoverable per-file error to stderr.
pub fn warn(message: impl fmt::Display) {
    eprintln!("warning: {message}");
}

/// Like `warn`, but only emitted when `verbose` is set.
pub fn trace(verbose: bool, message: impl fmt::Display) {
    if verbose {
        eprintln!("{message}");
    }
}
