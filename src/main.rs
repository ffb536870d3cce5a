use std::collections::HashSet;
use std::process::ExitCode;

use clap::Parser;

use rssg::builder::build_graph;
use rssg::cli::{Cli, Generator};
use rssg::config::RssgConfig;
use rssg::fs::RepoPath;
use rssg::language::Language;
use rssg::output;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.generator == Generator::Jedi {
        eprintln!("error: --generator jedi is not implemented; only tree_sitter is supported");
        return ExitCode::from(1);
    }

    let mut languages = HashSet::new();
    for name in &cli.languages {
        match Language::from_str_loose(name) {
            Some(lang) => {
                languages.insert(lang);
            }
            None => {
                eprintln!("error: unknown language '{name}'");
                return ExitCode::from(1);
            }
        }
    }
    let languages = if languages.is_empty() { None } else { Some(&languages) };

    if !cli.repo.is_dir() {
        eprintln!("error: {} is not a directory", cli.repo.display());
        return ExitCode::from(2);
    }

    let config = RssgConfig::load(&cli.repo);

    let (graph, stats) = match build_graph(&RepoPath::real(&cli.repo), languages, &config, cli.verbose, None) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    rssg::error::trace(
        cli.verbose,
        format!(
            "parsed {} files ({} skipped), resolved {} imports ({} unresolved)",
            stats.files_parsed, stats.files_skipped, stats.imports_resolved, stats.imports_unresolved
        ),
    );

    if let Err(err) = output::render(&graph, cli.output_format, cli.output_file.as_deref()) {
        eprintln!("error: {err}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}
