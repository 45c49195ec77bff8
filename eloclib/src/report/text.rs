//! Plain text rendering.
//!
//! The output has two parts:
//!
//! 1. the live tree, written by [`TreePrinter`] while the walk runs
//! 2. the closing report, written by [`TextReport`] once the walk is done
//!
//! Line formats are stable so the output can be diffed and grepped:
//!
//! ```text
//! project/
//!   main.py  eLOC: 12  LOC: 20
//!
//! Summary
//! - Files counted: 1
//! - Total eLOC:   12
//! - Total LOC:    20
//!
//! Top 30 by eLOC
//! 01. main.py  eLOC: 12  LOC: 20
//! ```

use std::io::Write;

use chrono::{DateTime, Local, Utc};
use console::Style;

use crate::data::stats::{AggregateStats, FileMetrics};
use crate::data::walker::WalkObserver;
use crate::options::ReportOptions;
use crate::Result;

use super::ranking::Rankings;

/// Shown instead of a timestamp when the modification time is unknown.
pub const UNKNOWN_TIME: &str = "N/A";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

/// Writes the hierarchical listing as the walk reports it.
pub struct TreePrinter<W: Write> {
    out: W,
}

impl<W: Write> TreePrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> WalkObserver for TreePrinter<W> {
    fn enter_dir(&mut self, name: &str, depth: usize) -> Result<()> {
        writeln!(self.out, "{}{}/", indent(depth), name)?;
        Ok(())
    }

    fn file_counted(&mut self, name: &str, depth: usize, file: &FileMetrics) -> Result<()> {
        writeln!(
            self.out,
            "{}{}  eLOC: {}  LOC: {}",
            indent(depth),
            name,
            file.eloc,
            file.loc
        )?;
        Ok(())
    }
}

/// Renders the summary and ranked sections.
#[derive(Debug, Clone, Default)]
pub struct TextReport {
    options: ReportOptions,
    styled: bool,
}

impl TextReport {
    pub fn new(options: ReportOptions) -> Self {
        Self {
            options,
            styled: false,
        }
    }

    /// Render section headers in bold.
    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    fn header(&self, text: &str) -> String {
        if self.styled {
            Style::new().bold().force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Write the report for `stats` to `out`.
    ///
    /// The summary is always written; the ranked sections only when at least
    /// one file was counted.
    pub fn render(&self, stats: &AggregateStats, out: &mut impl Write) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", self.header("Summary"))?;
        let totals = stats.totals();
        writeln!(out, "- Files counted: {}", stats.files_counted)?;
        writeln!(out, "- Total eLOC:   {}", totals.eloc)?;
        writeln!(out, "- Total LOC:    {}", totals.loc)?;

        if stats.is_empty() {
            return Ok(());
        }

        let rankings = Rankings::build(stats, &self.options);

        writeln!(out)?;
        let title = format!("Top {} by eLOC", self.options.top_eloc);
        writeln!(out, "{}", self.header(&title))?;
        write_ranked(out, stats, &rankings.top_eloc)?;

        writeln!(out)?;
        let title = format!("Latest Top {}", self.options.latest);
        writeln!(out, "{}", self.header(&title))?;
        for (idx, file) in rankings.latest.iter().enumerate() {
            writeln!(
                out,
                "{}  Updated: {}",
                ranked_line(idx, stats, file),
                format_modified(file)
            )?;
        }

        writeln!(out)?;
        writeln!(out, "{}", self.header("Languages Summary"))?;
        for lang in &rankings.languages {
            writeln!(
                out,
                "- {}: files={}, eLOC={}, LOC={}",
                lang.language, lang.file_count, lang.eloc, lang.loc
            )?;
        }

        for ranking in &rankings.per_language {
            writeln!(out)?;
            let title = format!(
                "Top {} in {}",
                self.options.top_files_per_language, ranking.language
            );
            writeln!(out, "{}", self.header(&title))?;
            write_ranked(out, stats, &ranking.files)?;
        }

        Ok(())
    }
}

fn ranked_line(idx: usize, stats: &AggregateStats, file: &FileMetrics) -> String {
    format!(
        "{:02}. {}  eLOC: {}  LOC: {}",
        idx + 1,
        stats.relative_path(&file.path),
        file.eloc,
        file.loc
    )
}

fn write_ranked(out: &mut impl Write, stats: &AggregateStats, files: &[&FileMetrics]) -> Result<()> {
    for (idx, file) in files.iter().enumerate() {
        writeln!(out, "{}", ranked_line(idx, stats, file))?;
    }
    Ok(())
}

/// Local-time modification stamp, or [`UNKNOWN_TIME`] when the time is
/// unknown or zero.
pub fn format_modified(file: &FileMetrics) -> String {
    file.modified
        .filter(|t| *t != DateTime::<Utc>::UNIX_EPOCH)
        .map(|t| t.with_timezone(&Local).format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| UNKNOWN_TIME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::LineCounts;
    use crate::language::UNKNOWN_LANGUAGE;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn file(path: &str, language: &str, eloc: u64, loc: u64) -> FileMetrics {
        FileMetrics::new(PathBuf::from(path), language, LineCounts::new(eloc, loc))
    }

    fn render(stats: &AggregateStats, options: ReportOptions) -> String {
        let mut out = Vec::new();
        TextReport::new(options).render(stats, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn tree_printer_lines() {
        let mut printer = TreePrinter::new(Vec::new());
        printer.enter_dir("project", 0).unwrap();
        printer
            .file_counted("main.py", 1, &file("/p/main.py", "Python", 12, 20))
            .unwrap();
        printer.enter_dir("src", 1).unwrap();
        printer
            .file_counted("lib.rs", 2, &file("/p/src/lib.rs", "Rust", 3, 4))
            .unwrap();

        let text = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(
            text,
            "project/\n  main.py  eLOC: 12  LOC: 20\n  src/\n    lib.rs  eLOC: 3  LOC: 4\n"
        );
    }

    #[test]
    fn empty_report_has_only_summary() {
        let stats = AggregateStats::new("/p");
        let text = render(&stats, ReportOptions::default());
        assert_eq!(
            text,
            "\nSummary\n- Files counted: 0\n- Total eLOC:   0\n- Total LOC:    0\n"
        );
    }

    #[test]
    fn full_report_sections() {
        let mut stats = AggregateStats::new("/p");
        let when = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        stats.add_file(file("/p/src/b1.js", "JavaScript", 2, 2).with_modified(Some(when)));
        stats.add_file(file("/p/src/a1.py", "Python", 1, 1));
        stats.add_file(file("/p/u.unknown", UNKNOWN_LANGUAGE, 4, 4));

        let text = render(&stats, ReportOptions::default());
        let lines: Vec<&str> = text.lines().collect();

        let top = lines.iter().position(|l| *l == "Top 30 by eLOC").unwrap();
        assert_eq!(lines[top + 1], "01. u.unknown  eLOC: 4  LOC: 4");
        assert_eq!(lines[top + 2], "02. src/b1.js  eLOC: 2  LOC: 2");

        let latest = lines.iter().position(|l| *l == "Latest Top 10").unwrap();
        let expected = when.with_timezone(&Local).format(TIME_FORMAT).to_string();
        assert_eq!(
            lines[latest + 1],
            format!("01. src/b1.js  eLOC: 2  LOC: 2  Updated: {expected}")
        );
        assert!(lines[latest + 2].ends_with("Updated: N/A"));

        let langs = lines
            .iter()
            .position(|l| *l == "Languages Summary")
            .unwrap();
        assert_eq!(lines[langs + 1], "- JavaScript: files=1, eLOC=2, LOC=2");
        assert_eq!(lines[langs + 2], "- Python: files=1, eLOC=1, LOC=1");
        assert_eq!(lines[langs + 3], "- Unknown: files=1, eLOC=4, LOC=4");

        assert!(text.contains("Top 20 in JavaScript\n01. src/b1.js  eLOC: 2  LOC: 2\n"));
        assert!(text.contains("Top 20 in Python\n01. src/a1.py  eLOC: 1  LOC: 1\n"));
        assert!(!text.contains("Top 20 in Unknown"));
    }

    #[test]
    fn headers_follow_options() {
        let mut stats = AggregateStats::new("/p");
        stats.add_file(file("/p/a.rs", "Rust", 1, 1));

        let options = ReportOptions::new()
            .with_top_eloc(3)
            .with_latest(2)
            .with_top_files_per_language(7);
        let text = render(&stats, options);

        assert!(text.contains("\nTop 3 by eLOC\n"));
        assert!(text.contains("\nLatest Top 2\n"));
        assert!(text.contains("\nTop 7 in Rust\n"));
    }

    #[test]
    fn epoch_zero_time_is_not_shown() {
        let zero =
            file("/p/a.rs", "Rust", 1, 1).with_modified(Some(DateTime::<Utc>::UNIX_EPOCH));
        assert_eq!(format_modified(&zero), UNKNOWN_TIME);

        let unknown = file("/p/b.rs", "Rust", 1, 1);
        assert_eq!(format_modified(&unknown), UNKNOWN_TIME);

        let when = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let known = file("/p/c.rs", "Rust", 1, 1).with_modified(Some(when));
        assert_ne!(format_modified(&known), UNKNOWN_TIME);
    }

    #[test]
    fn styled_headers_contain_escapes() {
        let report = TextReport::new(ReportOptions::default()).styled(true);
        assert!(report.header("Summary").contains("\u{1b}["));
        let plain = TextReport::new(ReportOptions::default());
        assert_eq!(plain.header("Summary"), "Summary");
    }
}
