//! Path filtering during traversal.
//!
//! Two layers decide what the walker skips:
//!
//! - a fixed deny list of directory names (VCS metadata, dependency caches,
//!   build output, virtual environments) that are never descended into
//! - optional user glob patterns, matched against the path relative to the root

use std::path::Path;

use glob::{MatchOptions, Pattern};

use crate::error::ElocError;
use crate::Result;

/// Directory names that are never traversed.
pub const SKIPPED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    ".idea",
    ".vscode",
    "__pycache__",
    "node_modules",
    "dist",
    "build",
    "out",
    ".tox",
    ".mypy_cache",
    ".pytest_cache",
    ".venv",
    "venv",
];

/// Check if a directory should be skipped during traversal.
pub fn should_skip_dir(name: &str) -> bool {
    SKIPPED_DIRS.contains(&name)
}

/// Configuration for glob-based exclusion.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
}

impl FilterConfig {
    /// Create a new empty filter config (excludes nothing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        let pat = Pattern::new(pattern).map_err(|e| ElocError::InvalidGlob {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        self.exclude.push(pat);
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern)?;
        }
        Ok(self)
    }

    /// Check if a path (relative to the walk root) is excluded.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::new()
        };
        self.exclude
            .iter()
            .any(|pattern| pattern.matches_path_with(relative, options))
    }
}
