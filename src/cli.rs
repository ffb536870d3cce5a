use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Builds a repo-specific semantic graph of declarations and their typed
/// relations, across a closed set of 16 languages, via tree-sitter.
#[derive(Parser, Debug)]
#[command(name = "rssg", version, about, long_about = None)]
pub struct Cli {
    /// Path to the repository root to index.
    #[arg(long)]
    pub repo: PathBuf,

    /// Restrict the build to this language (repeatable); omit for all 16.
    #[arg(long = "lang", value_name = "NAME")]
    pub languages: Vec<String>,

    /// Graph generator to use. Only `tree_sitter` (the syntactic generator)
    /// is implemented; `jedi` is accepted for interface parity but rejected.
    #[arg(long, value_enum, default_value_t = Generator::TreeSitter)]
    pub generator: Generator,

    /// Serialisation format for the output graph.
    #[arg(long, value_enum, default_value_t = OutputFormat::Edgelist)]
    pub output_format: OutputFormat,

    /// Where to write the graph; defaults to stdout.
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Print each discovered file path and diagnostic traces to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum Generator {
    Jedi,
    TreeSitter,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Edgelist,
    Pyvis,
    Ipysigma,
}
