//! Thread-local tree-sitter `Parser` pool, one instance per language per
//! thread — tree-sitter parsers are not `Send`/thread-safe, so a rayon
//! worker pinning its own parser per language is the only legitimate
//! parallelism.

use std::cell::RefCell;

use tree_sitter::{Parser, Tree};

use crate::error::RssgError;
use crate::language::Language;

thread_local! {
    static PARSER_PYTHON: RefCell<Parser> = RefCell::new(new_parser(tree_sitter_python::LANGUAGE.into()));
    static PARSER_JAVA: RefCell<Parser> = RefCell::new(new_parser(tree_sitter_java::LANGUAGE.into()));
    static PARSER_KOTLIN: RefCell<Parser> = RefCell::new(new_parser(tree_sitter_kotlin_ng::LANGUAGE.into()));
    static PARSER_CSHARP: RefCell<Parser> = RefCell::new(new_parser(tree_sitter_c_sharp::LANGUAGE.into()));
    static PARSER_TS: RefCell<Parser> = RefCell::new(new_parser(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()));
    static PARSER_TSX: RefCell<Parser> = RefCell::new(new_parser(tree_sitter_typescript::LANGUAGE_TSX.into()));
    static PARSER_JS: RefCell<Parser> = RefCell::new(new_parser(tree_sitter_javascript::LANGUAGE.into()));
    static PARSER_PHP: RefCell<Parser> = RefCell::new(new_parser(tree_sitter_php::LANGUAGE_PHP.into()));
    static PARSER_RUBY: RefCell<Parser> = RefCell::new(new_parser(tree_sitter_ruby::LANGUAGE.into()));
    static PARSER_C: RefCell<Parser> = RefCell::new(new_parser(tree_sitter_c::LANGUAGE.into()));
    static PARSER_CPP: RefCell<Parser> = RefCell::new(new_parser(tree_sitter_cpp::LANGUAGE.into()));
    static PARSER_GO: RefCell<Parser> = RefCell::new(new_parser(tree_sitter_go::LANGUAGE.into()));
    static PARSER_SWIFT: RefCell<Parser> = RefCell::new(new_parser(tree_sitter_swift::LANGUAGE.into()));
    static PARSER_RUST: RefCell<Parser> = RefCell::new(new_parser(tree_sitter_rust::LANGUAGE.into()));
    static PARSER_LUA: RefCell<Parser> = RefCell::new(new_parser(tree_sitter_lua::LANGUAGE.into()));
    static PARSER_BASH: RefCell<Parser> = RefCell::new(new_parser(tree_sitter_bash::LANGUAGE.into()));
    static PARSER_R: RefCell<Parser> = RefCell::new(new_parser(tree_sitter_r::LANGUAGE.into()));
}

fn new_parser(lang: tree_sitter::Language) -> Parser {
    let mut p = Parser::new();
    p.set_language(&lang).expect("grammar is compiled against a compatible tree-sitter ABI");
    p
}

/// Parse `source` with the thread-local parser for `language`, aborting if
/// it runs past `timeout_ms` (the file is then treated as unparseable — see
/// `RssgConfig::file_timeout_ms`). The `Tree` is not retained by the caller
/// beyond extraction — keep parses short-lived.
pub fn parse(language: Language, source: &str, ext: &str, timeout_ms: u64) -> anyhow::Result<Tree> {
    let timeout_micros = timeout_ms.saturating_mul(1_000);
    let parse_with = |cell: &'static std::thread::LocalKey<RefCell<Parser>>| {
        cell.with(|p| {
            let mut parser = p.borrow_mut();
            parser.set_timeout_micros(timeout_micros);
            parser.parse(source, None)
        })
    };

    let tree = match language {
        Language::Python => parse_with(&PARSER_PYTHON),
        Language::Java => parse_with(&PARSER_JAVA),
        Language::Kotlin => parse_with(&PARSER_KOTLIN),
        Language::CSharp => parse_with(&PARSER_CSHARP),
        Language::TypeScript if ext.eq_ignore_ascii_case("tsx") => parse_with(&PARSER_TSX),
        Language::TypeScript => parse_with(&PARSER_TS),
        Language::JavaScript => parse_with(&PARSER_JS),
        Language::Php => parse_with(&PARSER_PHP),
        Language::Ruby => parse_with(&PARSER_RUBY),
        Language::C => parse_with(&PARSER_C),
        Language::Cpp => parse_with(&PARSER_CPP),
        Language::Go => parse_with(&PARSER_GO),
        Language::Swift => parse_with(&PARSER_SWIFT),
        Language::Rust => parse_with(&PARSER_RUST),
        Language::Lua => parse_with(&PARSER_LUA),
        Language::Bash => parse_with(&PARSER_BASH),
        Language::R => parse_with(&PARSER_R),
    };

    tree.ok_or_else(|| {
        anyhow::Error::new(RssgError::ParseError {
            path: Default::default(),
            message: "tree-sitter returned no tree (timeout or cancellation)".into(),
        })
    })
}

/// The underlying `tree_sitter::Language` for a query — mirrors `parse`'s
/// dispatch so `Query::new` is built against the same grammar.
pub fn ts_language(language: Language, ext: &str) -> tree_sitter::Language {
    match language {
        Language::Python => tree_sitter_python::LANGUAGE.into(),
        Language::Java => tree_sitter_java::LANGUAGE.into(),
        Language::Kotlin => tree_sitter_kotlin_ng::LANGUAGE.into(),
        Language::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
        Language::TypeScript if ext.eq_ignore_ascii_case("tsx") => tree_sitter_typescript::LANGUAGE_TSX.into(),
        Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        Language::Php => tree_sitter_php::LANGUAGE_PHP.into(),
        Language::Ruby => tree_sitter_ruby::LANGUAGE.into(),
        Language::C => tree_sitter_c::LANGUAGE.into(),
        Language::Cpp => tree_sitter_cpp::LANGUAGE.into(),
        Language::Go => tree_sitter_go::LANGUAGE.into(),
        Language::Swift => tree_sitter_swift::LANGUAGE.into(),
        Language::Rust => tree_sitter_rust::LANGUAGE.into(),
        Language::Lua => tree_sitter_lua::LANGUAGE.into(),
        Language::Bash => tree_sitter_bash::LANGUAGE.into(),
        Language::R => tree_sitter_r::LANGUAGE.into(),
    }
}
