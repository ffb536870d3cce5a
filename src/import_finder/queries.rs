//! Per-language tree-sitter query strings used to locate import statements
//! and (where the grammar has one) the enclosing module/package declaration.
//!
//! Every query captures the token as `@import_name` / `@package_name` so the
//! caller can stay language-agnostic. Lua, Bash and R have no entry here —
//! `import_finder::find_imports` falls back to a regex for those instead.

use crate::language::Language;

/// The tree-sitter query matching import-like statements for `language`, or
/// `None` when the language is handled by the regex fallback instead.
pub fn import_query(language: Language) -> Option<&'static str> {
    Some(match language {
        Language::Python => {
            r#"
            (import_statement name: (dotted_name) @import_name)
            (import_statement name: (aliased_import name: (dotted_name) @import_name alias: (identifier) @import_alias))
            (import_from_statement module_name: (dotted_name) @import_name)
            (import_from_statement module_name: (relative_import) @import_name)
            "#
        }
        Language::Java => {
            r#"
            (import_declaration (scoped_identifier) @import_name)
            (import_declaration (identifier) @import_name)
            "#
        }
        Language::Kotlin => {
            r#"
            (import_header (identifier) @import_name)
            "#
        }
        Language::CSharp => {
            r#"
            (using_directive (qualified_name) @import_name)
            (using_directive (identifier) @import_name)
            "#
        }
        Language::TypeScript | Language::JavaScript => {
            r#"
            (import_statement source: (string) @import_name)
            (export_statement source: (string) @import_name)
            (call_expression function: (import) arguments: (arguments (string) @import_name))
            "#
        }
        Language::Php => {
            r#"
            (require_expression (string) @import_name)
            (require_once_expression (string) @import_name)
            (include_expression (string) @import_name)
            (include_once_expression (string) @import_name)
            "#
        }
        Language::Ruby => {
            r#"
            (call method: (identifier) @_m arguments: (argument_list (string (string_content) @import_name))
             (#any-of? @_m "require" "require_relative"))
            "#
        }
        Language::C | Language::Cpp => {
            r#"
            (preproc_include path: (string_literal) @import_name)
            (preproc_include path: (system_lib_string) @import_name)
            "#
        }
        Language::Go => {
            r#"
            (import_spec path: (interpreted_string_literal) @import_name)
            "#
        }
        Language::Swift => {
            r#"
            (import_declaration (import_path (identifier) @import_name))
            "#
        }
        Language::Rust => {
            r#"
            (use_declaration argument: (scoped_identifier) @import_name)
            (use_declaration argument: (identifier) @import_name)
            (use_declaration argument: (use_as_clause path: (scoped_identifier) @import_name alias: (identifier) @import_alias))
            (use_declaration argument: (scoped_use_list) @import_name)
            "#
        }
        Language::Lua | Language::Bash | Language::R => return None,
    })
}

/// The query locating the enclosing module/package/namespace declaration,
/// used by `find_module_name` for languages where the on-disk file name
/// alone isn't the module identity (Java, Kotlin, C#).
pub fn package_query(language: Language) -> Option<&'static str> {
    Some(match language {
        Language::Java => "(package_declaration (scoped_identifier) @package_name)",
        Language::Kotlin => "(package_header (identifier) @package_name)",
        Language::CSharp => {
            r#"
            (file_scoped_namespace_declaration name: (qualified_name) @package_name)
            (namespace_declaration name: (qualified_name) @package_name)
            (namespace_declaration name: (identifier) @package_name)
            "#
        }
        Language::Go => "(package_clause (package_identifier) @package_name)",
        _ => return None,
    })
}
