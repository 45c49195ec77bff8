//! Directory traversal and aggregation.
//!
//! The walk is depth-first and top-down. Inside each directory the files are
//! visited first, in file name order, then the subdirectories, also in name
//! order. Denylisted directories and directory symlinks are never entered.
//!
//! Each directory's files are classified as one batch on a worker pool. The
//! batch results are re-serialized in order before anything reaches the
//! [`WalkObserver`], so the observer sees exactly the sequence a single-threaded
//! walk would produce.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::classifier::count_file;
use crate::error::ElocError;
use crate::language::label_for_path;
use crate::options::WalkOptions;
use crate::source::filter::should_skip_dir;
use crate::Result;

use super::stats::{AggregateStats, FileMetrics};

/// Receives the hierarchical listing while the walk is in progress.
pub trait WalkObserver {
    /// A directory is about to be listed. `depth` is 0 for the root.
    fn enter_dir(&mut self, _name: &str, _depth: usize) -> Result<()> {
        Ok(())
    }

    /// A file was counted. `depth` is the file's own depth (1 for root files).
    fn file_counted(&mut self, _name: &str, _depth: usize, _file: &FileMetrics) -> Result<()> {
        Ok(())
    }
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl WalkObserver for NoopObserver {}

/// A file queued for classification.
struct PendingFile {
    path: PathBuf,
    name: String,
    depth: usize,
}

/// Walk `root`, count every eligible file, and report progress to `observer`.
///
/// Fails only when `root` is not a directory or the worker pool cannot be
/// built. Unreadable, undecodable and empty files are skipped silently.
pub fn walk(
    root: impl AsRef<Path>,
    options: &WalkOptions,
    observer: &mut impl WalkObserver,
) -> Result<AggregateStats> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(ElocError::InvalidRoot(root.to_path_buf()));
    }
    let root = fs::canonicalize(root)?;

    let pool = ThreadPoolBuilder::new()
        .num_threads(options.jobs)
        .build()
        .map_err(|e| ElocError::ThreadPool(e.to_string()))?;

    let mut stats = AggregateStats::new(&root);
    let mut pending: Vec<PendingFile> = Vec::new();

    let walker = WalkDir::new(&root)
        .follow_links(false)
        .sort_by(files_first)
        .into_iter()
        .filter_entry(|e| keep_entry(e, &root, options));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if entry.file_type().is_dir() {
            flush(&pool, &mut pending, &mut stats, observer)?;
            observer.enter_dir(&entry_name(&entry), entry.depth())?;
        } else if is_countable(&entry, &root, options) {
            pending.push(PendingFile {
                name: entry_name(&entry),
                depth: entry.depth(),
                path: entry.into_path(),
            });
        }
    }
    flush(&pool, &mut pending, &mut stats, observer)?;

    Ok(stats)
}

/// Walk `root` without a live listing.
///
/// ```rust
/// use eloclib::{count_directory, WalkOptions};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// fs::write(dir.path().join("main.py"), "# entry point\nprint('hi')\n").unwrap();
///
/// let stats = count_directory(dir.path(), &WalkOptions::new()).unwrap();
/// assert_eq!(stats.files_counted, 1);
/// assert_eq!(stats.total_eloc, 1);
/// assert_eq!(stats.total_loc, 2);
/// ```
pub fn count_directory(root: impl AsRef<Path>, options: &WalkOptions) -> Result<AggregateStats> {
    walk(root, options, &mut NoopObserver)
}

/// Files before directories, then by name.
fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn entry_name(entry: &DirEntry) -> String {
    entry
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn relative<'p>(path: &'p Path, root: &Path) -> &'p Path {
    path.strip_prefix(root).unwrap_or(path)
}

/// Prune denylisted and glob-excluded directories before descending.
fn keep_entry(entry: &DirEntry, root: &Path, options: &WalkOptions) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    if should_skip_dir(&name) {
        trace!(dir = %entry.path().display(), "skipping denylisted directory");
        return false;
    }
    if options.filter.is_excluded(relative(entry.path(), root)) {
        trace!(dir = %entry.path().display(), "skipping excluded directory");
        return false;
    }
    true
}

fn is_countable(entry: &DirEntry, root: &Path, options: &WalkOptions) -> bool {
    let path = entry.path();
    if entry.path_is_symlink() && !fs::metadata(path).is_ok_and(|m| m.is_file()) {
        trace!(path = %path.display(), "skipping symlink that is not a file");
        return false;
    }
    if !entry.file_type().is_file() && !entry.path_is_symlink() {
        return false;
    }
    if options.exclusions.contains_path(path) {
        return false;
    }
    !options.filter.is_excluded(relative(path, root))
}

/// Classify one file. `None` means it does not take part in any total.
fn measure(path: &Path) -> Option<FileMetrics> {
    let counts = match count_file(path) {
        Ok(counts) => counts,
        Err(err) => {
            debug!(error = %err, "skipping file");
            return None;
        }
    };
    if counts.is_empty() {
        trace!(path = %path.display(), "skipping empty file");
        return None;
    }

    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .map(DateTime::<Utc>::from)
        .ok();

    Some(FileMetrics::new(path.to_path_buf(), label_for_path(path), counts).with_modified(modified))
}

/// Classify the queued files in parallel, then report and aggregate them in order.
fn flush(
    pool: &ThreadPool,
    pending: &mut Vec<PendingFile>,
    stats: &mut AggregateStats,
    observer: &mut impl WalkObserver,
) -> Result<()> {
    if pending.is_empty() {
        return Ok(());
    }

    let measured: Vec<Option<FileMetrics>> =
        pool.install(|| pending.par_iter().map(|f| measure(&f.path)).collect());

    for (file, metrics) in pending.drain(..).zip(measured) {
        if let Some(metrics) = metrics {
            observer.file_counted(&file.name, file.depth, &metrics)?;
            stats.add_file(metrics);
        }
    }
    Ok(())
}
