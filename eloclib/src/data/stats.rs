//! Core data structures for per-file and aggregate statistics.
//!
//! The walker produces one [`FileMetrics`] per counted file and folds it into an
//! [`AggregateStats`], which keeps:
//!
//! - running totals (files, eLOC, LOC)
//! - every counted file, in walk order
//! - per-language totals together with that language's files
//!
//! Once the walk finishes the aggregate is read-only; the report layer only
//! borrows it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::LineCounts;

/// Statistics for a single counted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetrics {
    /// Path to the file.
    pub path: PathBuf,
    /// Language label derived from the extension.
    pub language: String,
    /// Effective lines of code.
    pub eloc: u64,
    /// Total lines.
    pub loc: u64,
    /// Last modification time, if it could be read.
    pub modified: Option<DateTime<Utc>>,
}

impl FileMetrics {
    /// Create new file metrics.
    pub fn new(path: PathBuf, language: impl Into<String>, counts: LineCounts) -> Self {
        Self {
            path,
            language: language.into(),
            eloc: counts.eloc,
            loc: counts.loc,
            modified: None,
        }
    }

    /// Attach a modification time.
    pub fn with_modified(mut self, modified: Option<DateTime<Utc>>) -> Self {
        self.modified = modified;
        self
    }

    /// Lowercased path, used as the final tie-break in rankings.
    pub fn sort_key(&self) -> String {
        self.path.to_string_lossy().to_lowercase()
    }
}

/// Totals for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageStats {
    /// Language label.
    pub language: String,
    /// Number of counted files.
    pub file_count: u64,
    /// Sum of eLOC.
    pub eloc: u64,
    /// Sum of LOC.
    pub loc: u64,
    /// Files of this language, in walk order.
    #[serde(skip)]
    pub files: Vec<FileMetrics>,
}

impl LanguageStats {
    /// Create empty stats for a language.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            file_count: 0,
            eloc: 0,
            loc: 0,
            files: Vec::new(),
        }
    }

    /// Fold one file into this language.
    pub fn add_file(&mut self, file: FileMetrics) {
        self.file_count += 1;
        self.eloc += file.eloc;
        self.loc += file.loc;
        self.files.push(file);
    }
}

/// Everything the walker collects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Root of the walk (canonical form).
    pub root: PathBuf,
    /// Number of files counted.
    pub files_counted: u64,
    /// Sum of eLOC over all counted files.
    pub total_eloc: u64,
    /// Sum of LOC over all counted files.
    pub total_loc: u64,
    /// Counted files in walk order.
    pub files: Vec<FileMetrics>,
    /// Per-language totals keyed by label.
    pub languages: BTreeMap<String, LanguageStats>,
}

impl AggregateStats {
    /// Create an empty aggregate rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Fold a counted file into every total it belongs to.
    pub fn add_file(&mut self, file: FileMetrics) {
        self.files_counted += 1;
        self.total_eloc += file.eloc;
        self.total_loc += file.loc;

        self.languages
            .entry(file.language.clone())
            .or_insert_with(|| LanguageStats::new(file.language.clone()))
            .add_file(file.clone());
        self.files.push(file);
    }

    /// Totals as a [`LineCounts`].
    pub fn totals(&self) -> LineCounts {
        LineCounts::new(self.total_eloc, self.total_loc)
    }

    pub fn is_empty(&self) -> bool {
        self.files_counted == 0
    }

    /// Path of a file relative to the walk root, for display.
    pub fn relative_path(&self, path: &Path) -> String {
        make_relative(path, &self.root)
    }
}

/// Convert a path to a relative path from the base directory.
pub fn make_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| path.to_string_lossy().to_string())
}
