//! Input options for walking and reporting.
//!
//! This module contains the configuration types that control which files are
//! counted and how long the ranked report lists are.

use serde::{Deserialize, Serialize};

use crate::source::{ExclusionSet, FilterConfig};

/// Options for walking a directory tree.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Extensions that are never counted
    pub exclusions: ExclusionSet,
    /// Glob patterns for paths that are never counted
    pub filter: FilterConfig,
    /// Worker threads used to classify files (0 = one per core)
    pub jobs: usize,
}

impl WalkOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extension exclusion list.
    pub fn exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Set the glob filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Set the number of classification workers.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }
}

/// Lengths of the ranked report sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Entries in the global top-by-eLOC list
    pub top_eloc: usize,
    /// Entries in the most-recently-modified list
    pub latest: usize,
    /// Languages that get their own top list
    pub top_languages: usize,
    /// Entries in each per-language top list
    pub top_files_per_language: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_eloc: 30,
            latest: 10,
            top_languages: 5,
            top_files_per_language: 20,
        }
    }
}

impl ReportOptions {
    /// Create options with the default list lengths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: length of the top-by-eLOC list
    pub fn with_top_eloc(mut self, n: usize) -> Self {
        self.top_eloc = n;
        self
    }

    /// Builder: length of the latest-modified list
    pub fn with_latest(mut self, n: usize) -> Self {
        self.latest = n;
        self
    }

    /// Builder: number of languages with their own list
    pub fn with_top_languages(mut self, n: usize) -> Self {
        self.top_languages = n;
        self
    }

    /// Builder: length of each per-language list
    pub fn with_top_files_per_language(mut self, n: usize) -> Self {
        self.top_files_per_language = n;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_defaults() {
        let opts = ReportOptions::default();
        assert_eq!(opts.top_eloc, 30);
        assert_eq!(opts.latest, 10);
        assert_eq!(opts.top_languages, 5);
        assert_eq!(opts.top_files_per_language, 20);
    }

    #[test]
    fn report_builder() {
        let opts = ReportOptions::new()
            .with_top_eloc(3)
            .with_latest(2)
            .with_top_languages(1)
            .with_top_files_per_language(4);
        assert_eq!(opts.top_eloc, 3);
        assert_eq!(opts.latest, 2);
        assert_eq!(opts.top_languages, 1);
        assert_eq!(opts.top_files_per_language, 4);
    }

    #[test]
    fn walk_builder() {
        let opts = WalkOptions::new()
            .exclusions(ExclusionSet::parse("md"))
            .jobs(2);
        assert!(opts.exclusions.contains(".md"));
        assert_eq!(opts.jobs, 2);
        assert!(opts.filter.exclude.is_empty());
    }
}
