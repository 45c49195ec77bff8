//! # eloclib
//!
//! A lines of code counter library that reports raw line counts (LOC) and
//! effective line counts (eLOC) for every file in a directory tree.
//!
//! ## Overview
//!
//! eLOC counts the lines that still contain code once comments and blank lines
//! are removed. Comment detection is lexical and driven by a per-extension
//! syntax table:
//!
//! - **Line comments**: `//`, `#`, `--` (a line that starts with one is a comment)
//! - **Block comments**: `/* */`, `<!-- -->`, `--[[ ]]--` (may span lines)
//! - **Everything else**: every non-blank line is code
//!
//! String literals are not recognized and block comments do not nest.
//!
//! ## Pipeline
//!
//! 1. [`source`]: which files and directories take part
//! 2. [`data`]: walking the tree and aggregating per-file, per-language and
//!    total statistics
//! 3. [`report`]: ranked lists and text output
//!
//! ## Example
//!
//! ```rust
//! use eloclib::{classify, count_directory, syntax_for, ExclusionSet, WalkOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! // Classify text directly
//! let counts = classify("/* header */\nint main() {}\n", syntax_for(".c"));
//! assert_eq!((counts.eloc, counts.loc), (1, 2));
//!
//! // Walk a directory
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("app.js"), "// entry\nrun();\n").unwrap();
//! fs::write(dir.path().join("NOTES.md"), "todo\n").unwrap();
//!
//! let options = WalkOptions::new().exclusions(ExclusionSet::parse("md"));
//! let stats = count_directory(dir.path(), &options).unwrap();
//! assert_eq!(stats.files_counted, 1);
//! assert_eq!(stats.languages["JavaScript"].eloc, 1);
//! ```

pub mod classifier;
pub mod data;
pub mod error;
pub mod language;
pub mod options;
pub mod report;
pub mod source;

pub use classifier::{classify, classify_lines, count_file, logical_lines, LineCounts, LineKind};
pub use data::{
    count_directory, walk, AggregateStats, FileMetrics, LanguageStats, NoopObserver,
    WalkObserver,
};
pub use error::ElocError;
pub use language::{
    label_for, label_for_path, syntax_for, syntax_for_path, CommentSyntax, UNKNOWN_LANGUAGE,
};
pub use options::{ReportOptions, WalkOptions};
pub use report::{Rankings, TextReport, TreePrinter};
pub use source::{ExclusionSet, FilterConfig};

/// Result type for eloclib operations
pub type Result<T> = std::result::Result<T, ElocError>;
