//! Per-language comment syntax and display labels.
//!
//! Both tables are closed `match` lookups keyed by lowercase extension,
//! including the leading dot (`".rs"`, `".py"`). Unknown extensions are
//! valid input: they resolve to [`CommentSyntax::NONE`] and [`UNKNOWN_LANGUAGE`].

use std::path::Path;

/// Label used for every extension that is not in the table.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Comment tokens for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    /// Prefixes that turn the rest of a line into a comment
    pub line_prefixes: &'static [&'static str],
    /// Block comment (start, end) pairs
    pub block_pairs: &'static [(&'static str, &'static str)],
}

const C_BLOCK: &[(&str, &str)] = &[("/*", "*/")];

impl CommentSyntax {
    /// No comment concept at all: every non-blank line is code.
    pub const NONE: CommentSyntax = CommentSyntax {
        line_prefixes: &[],
        block_pairs: &[],
    };

    const C_LIKE: CommentSyntax = CommentSyntax {
        line_prefixes: &["//"],
        block_pairs: C_BLOCK,
    };

    const HASH: CommentSyntax = CommentSyntax {
        line_prefixes: &["#"],
        block_pairs: &[],
    };

    const PHP: CommentSyntax = CommentSyntax {
        line_prefixes: &["//", "#"],
        block_pairs: C_BLOCK,
    };

    const SQL: CommentSyntax = CommentSyntax {
        line_prefixes: &["--"],
        block_pairs: C_BLOCK,
    };

    const MARKUP: CommentSyntax = CommentSyntax {
        line_prefixes: &[],
        block_pairs: &[("<!--", "-->")],
    };

    const LUA: CommentSyntax = CommentSyntax {
        line_prefixes: &["--"],
        block_pairs: &[("--[[", "]]--")],
    };

    /// Whether this syntax defines any comment tokens.
    pub fn has_comments(&self) -> bool {
        !self.line_prefixes.is_empty() || !self.block_pairs.is_empty()
    }
}

/// Comment syntax for an extension such as `".js"`.
pub fn syntax_for(extension: &str) -> &'static CommentSyntax {
    match extension.to_ascii_lowercase().as_str() {
        ".c" | ".h" | ".cpp" | ".cxx" | ".cc" | ".hpp" | ".hh" | ".hxx" | ".java" | ".js"
        | ".ts" | ".tsx" | ".jsx" | ".cs" | ".go" | ".swift" | ".kt" | ".kts" | ".scala"
        | ".rs" | ".dart" | ".css" => &CommentSyntax::C_LIKE,
        ".py" | ".sh" | ".bash" | ".zsh" | ".rb" | ".rake" | ".ps1" | ".psm1" | ".psd1"
        | ".toml" | ".ini" | ".cfg" | ".conf" | ".yml" | ".yaml" | ".env" | ".mak" | ".mk" => {
            &CommentSyntax::HASH
        }
        ".php" | ".phtml" => &CommentSyntax::PHP,
        ".sql" => &CommentSyntax::SQL,
        ".html" | ".htm" | ".xml" | ".xhtml" => &CommentSyntax::MARKUP,
        ".lua" => &CommentSyntax::LUA,
        _ => &CommentSyntax::NONE,
    }
}

/// Human-readable language name for an extension.
pub fn label_for(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        ".c" | ".h" => "C",
        ".cpp" | ".cxx" | ".cc" | ".hpp" | ".hh" | ".hxx" => "C++",
        ".java" => "Java",
        ".js" | ".jsx" => "JavaScript",
        ".ts" | ".tsx" => "TypeScript",
        ".cs" => "C#",
        ".go" => "Go",
        ".swift" => "Swift",
        ".kt" | ".kts" => "Kotlin",
        ".scala" => "Scala",
        ".rs" => "Rust",
        ".dart" => "Dart",
        ".css" => "CSS",
        ".py" => "Python",
        ".sh" | ".bash" | ".zsh" => "Shell",
        ".rb" | ".rake" => "Ruby",
        ".ps1" | ".psm1" | ".psd1" => "PowerShell",
        ".toml" => "TOML",
        ".ini" | ".cfg" | ".conf" => "INI",
        ".yml" | ".yaml" => "YAML",
        ".env" => "Dotenv",
        ".mak" | ".mk" => "Makefile",
        ".php" | ".phtml" => "PHP",
        ".sql" => "SQL",
        ".html" | ".htm" | ".xhtml" => "HTML",
        ".xml" => "XML",
        ".lua" => "Lua",
        _ => UNKNOWN_LANGUAGE,
    }
}

/// Lowercase extension of a path with its leading dot, or `""` if it has none.
///
/// Dotfiles such as `.env` have no extension by this definition.
pub fn extension_of(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Comment syntax for a file path, derived from its extension.
pub fn syntax_for_path(path: impl AsRef<Path>) -> &'static CommentSyntax {
    syntax_for(&extension_of(path))
}

/// Language label for a file path, derived from its extension.
pub fn label_for_path(path: impl AsRef<Path>) -> &'static str {
    label_for(&extension_of(path))
}
