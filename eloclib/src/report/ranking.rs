//! Ranked views over an [`AggregateStats`].
//!
//! Every ordering here is total, so repeated runs over the same tree produce
//! the same lists:
//!
//! - files by size: eLOC desc, LOC desc, lowercase path asc
//! - files by recency: modification time desc (unknown = oldest), lowercase path asc
//! - languages: `Unknown` last, then eLOC desc, LOC desc, lowercase name asc

use std::cmp::Reverse;

use serde::Serialize;

use crate::data::stats::{AggregateStats, FileMetrics, LanguageStats};
use crate::language::UNKNOWN_LANGUAGE;
use crate::options::ReportOptions;

/// Files sorted by size, truncated to `limit`.
pub fn top_by_eloc<'a>(
    files: impl IntoIterator<Item = &'a FileMetrics>,
    limit: usize,
) -> Vec<&'a FileMetrics> {
    let mut files: Vec<&FileMetrics> = files.into_iter().collect();
    files.sort_by_cached_key(|f| (Reverse(f.eloc), Reverse(f.loc), f.sort_key()));
    files.truncate(limit);
    files
}

/// Files sorted by modification time, newest first, truncated to `limit`.
pub fn latest_modified<'a>(
    files: impl IntoIterator<Item = &'a FileMetrics>,
    limit: usize,
) -> Vec<&'a FileMetrics> {
    let mut files: Vec<&FileMetrics> = files.into_iter().collect();
    // `None` orders before any time, so reversed it lands after all of them.
    files.sort_by_cached_key(|f| (Reverse(f.modified), f.sort_key()));
    files.truncate(limit);
    files
}

/// All languages in summary order, `Unknown` last.
pub fn ordered_languages(stats: &AggregateStats) -> Vec<&LanguageStats> {
    let mut languages: Vec<&LanguageStats> = stats.languages.values().collect();
    languages.sort_by_cached_key(|l| {
        (
            l.language == UNKNOWN_LANGUAGE,
            Reverse(l.eloc),
            Reverse(l.loc),
            l.language.to_lowercase(),
        )
    });
    languages
}

/// The `limit` largest known languages.
pub fn top_languages(stats: &AggregateStats, limit: usize) -> Vec<&LanguageStats> {
    ordered_languages(stats)
        .into_iter()
        .filter(|l| l.language != UNKNOWN_LANGUAGE)
        .take(limit)
        .collect()
}

/// Top files of one language.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageRanking<'a> {
    pub language: &'a str,
    pub files: Vec<&'a FileMetrics>,
}

/// Every ranked list the report prints.
#[derive(Debug, Clone, Serialize)]
pub struct Rankings<'a> {
    pub top_eloc: Vec<&'a FileMetrics>,
    pub latest: Vec<&'a FileMetrics>,
    pub languages: Vec<&'a LanguageStats>,
    pub per_language: Vec<LanguageRanking<'a>>,
}

impl<'a> Rankings<'a> {
    /// Compute all rankings for `stats`.
    pub fn build(stats: &'a AggregateStats, options: &ReportOptions) -> Self {
        let per_language = top_languages(stats, options.top_languages)
            .into_iter()
            .map(|lang| LanguageRanking {
                language: &lang.language,
                files: top_by_eloc(&lang.files, options.top_files_per_language),
            })
            .collect();

        Self {
            top_eloc: top_by_eloc(&stats.files, options.top_eloc),
            latest: latest_modified(&stats.files, options.latest),
            languages: ordered_languages(stats),
            per_language,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::LineCounts;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    fn file(path: &str, language: &str, eloc: u64, loc: u64) -> FileMetrics {
        FileMetrics::new(PathBuf::from(path), language, LineCounts::new(eloc, loc))
    }

    fn paths(files: &[&FileMetrics]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.path.to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn top_by_eloc_tie_breaks() {
        let files = vec![
            file("/r/b.rs", "Rust", 5, 10),
            file("/r/A.rs", "Rust", 5, 10),
            file("/r/c.rs", "Rust", 5, 12),
            file("/r/d.rs", "Rust", 9, 9),
        ];

        let ranked = top_by_eloc(&files, 10);
        assert_eq!(paths(&ranked), vec!["/r/d.rs", "/r/c.rs", "/r/A.rs", "/r/b.rs"]);

        let ranked = top_by_eloc(&files, 2);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn latest_puts_unknown_times_last() {
        let t = |secs| Some(Utc.timestamp_opt(secs, 0).unwrap());
        let files = vec![
            file("/r/old.py", "Python", 1, 1).with_modified(t(100)),
            file("/r/none.py", "Python", 1, 1),
            file("/r/new.py", "Python", 1, 1).with_modified(t(300)),
            file("/r/B.py", "Python", 1, 1).with_modified(t(200)),
            file("/r/a.py", "Python", 1, 1).with_modified(t(200)),
        ];

        let ranked = latest_modified(&files, 10);
        assert_eq!(
            paths(&ranked),
            vec!["/r/new.py", "/r/a.py", "/r/B.py", "/r/old.py", "/r/none.py"]
        );
    }

    fn language_fixture() -> AggregateStats {
        let mut stats = AggregateStats::new("/r");
        stats.add_file(file("/r/b1.js", "JavaScript", 2, 2));
        stats.add_file(file("/r/b2.js", "JavaScript", 1, 1));
        stats.add_file(file("/r/a1.py", "Python", 1, 1));
        stats.add_file(file("/r/a2.py", "Python", 1, 1));
        stats.add_file(file("/r/u.unknown", UNKNOWN_LANGUAGE, 4, 4));
        stats
    }

    #[test]
    fn unknown_language_sorts_last() {
        let stats = language_fixture();
        let order: Vec<&str> = ordered_languages(&stats)
            .iter()
            .map(|l| l.language.as_str())
            .collect();
        assert_eq!(order, vec!["JavaScript", "Python", "Unknown"]);
    }

    #[test]
    fn language_ties_break_on_loc_then_name() {
        let mut stats = AggregateStats::new("/r");
        stats.add_file(file("/r/a.rb", "Ruby", 3, 3));
        stats.add_file(file("/r/a.go", "Go", 3, 5));
        stats.add_file(file("/r/a.c", "C", 3, 3));
        let order: Vec<&str> = ordered_languages(&stats)
            .iter()
            .map(|l| l.language.as_str())
            .collect();
        assert_eq!(order, vec!["Go", "C", "Ruby"]);
    }

    #[test]
    fn top_languages_skip_unknown() {
        let stats = language_fixture();
        let top: Vec<&str> = top_languages(&stats, 5)
            .iter()
            .map(|l| l.language.as_str())
            .collect();
        assert_eq!(top, vec!["JavaScript", "Python"]);
        assert_eq!(top_languages(&stats, 1).len(), 1);
    }

    #[test]
    fn rankings_respect_options() {
        let stats = language_fixture();
        let options = ReportOptions::new()
            .with_top_eloc(2)
            .with_latest(3)
            .with_top_languages(1)
            .with_top_files_per_language(1);

        let rankings = Rankings::build(&stats, &options);

        assert_eq!(rankings.top_eloc.len(), 2);
        assert!(rankings.top_eloc[0].path.ends_with("u.unknown"));
        assert_eq!(rankings.latest.len(), 3);
        assert_eq!(rankings.languages.len(), 3);
        assert_eq!(rankings.per_language.len(), 1);
        assert_eq!(rankings.per_language[0].language, "JavaScript");
        assert_eq!(paths(&rankings.per_language[0].files), vec!["/r/b1.js"]);
    }
}
