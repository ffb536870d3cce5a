//! The closed 16-language set, their file extensions, and display names.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum Language {
    Python,
    Java,
    Kotlin,
    CSharp,
    TypeScript,
    JavaScript,
    Php,
    Ruby,
    C,
    Cpp,
    Go,
    Swift,
    Rust,
    Lua,
    Bash,
    R,
}

impl Language {
    pub const ALL: [Language; 16] = [
        Language::Python,
        Language::Java,
        Language::Kotlin,
        Language::CSharp,
        Language::TypeScript,
        Language::JavaScript,
        Language::Php,
        Language::Ruby,
        Language::C,
        Language::Cpp,
        Language::Go,
        Language::Swift,
        Language::Rust,
        Language::Lua,
        Language::Bash,
        Language::R,
    ];

    /// File extensions recognised for each language.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Language::Python => &["py", "pyi"],
            Language::Java => &["java"],
            Language::Kotlin => &["kt", "kts"],
            Language::CSharp => &["cs", "csx"],
            Language::TypeScript => &["ts", "tsx"],
            Language::JavaScript => &["js", "jsx"],
            Language::Php => &["php"],
            Language::Ruby => &["rb"],
            Language::C => &["c", "h"],
            Language::Cpp => &["cpp", "hpp", "cc", "hh", "cxx", "hxx"],
            Language::Go => &["go", "mod"],
            Language::Swift => &["swift"],
            Language::Rust => &["rs"],
            Language::Lua => &["lua"],
            Language::Bash => &["sh", "bash"],
            Language::R => &["r", "R"],
        }
    }

    pub fn matches_extension(self, ext: &str) -> bool {
        self.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Java => "java",
            Language::Kotlin => "kotlin",
            Language::CSharp => "c_sharp",
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
            Language::Php => "php",
            Language::Ruby => "ruby",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Go => "go",
            Language::Swift => "swift",
            Language::Rust => "rust",
            Language::Lua => "lua",
            Language::Bash => "bash",
            Language::R => "r",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Language> {
        let s = s.trim().to_ascii_lowercase();
        Some(match s.as_str() {
            "python" | "py" => Language::Python,
            "java" => Language::Java,
            "kotlin" | "kt" => Language::Kotlin,
            "c_sharp" | "csharp" | "cs" => Language::CSharp,
            "typescript" | "ts" => Language::TypeScript,
            "javascript" | "js" => Language::JavaScript,
            "php" => Language::Php,
            "ruby" | "rb" => Language::Ruby,
            "c" => Language::C,
            "cpp" | "c++" | "cxx" => Language::Cpp,
            "go" | "golang" => Language::Go,
            "swift" => Language::Swift,
            "rust" | "rs" => Language::Rust,
            "lua" => Language::Lua,
            "bash" | "sh" | "shell" => Language::Bash,
            "r" => Language::R,
            _ => return None,
        })
    }

    /// Look up the language by a file extension (no leading dot).
    pub fn from_extension(ext: &str) -> Option<Language> {
        Language::ALL.into_iter().find(|l| l.matches_extension(ext))
    }
}
