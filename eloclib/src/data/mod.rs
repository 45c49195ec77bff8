//! Data collection: walk a tree and collect statistics.
//!
//! This module handles the second stage of the pipeline. It provides:
//!
//! - **Walking**: depth-first traversal with live progress callbacks
//! - **Statistics**: per-file metrics and the aggregate totals
//!
//! ## Example
//!
//! ```rust,ignore
//! use eloclib::data::{count_directory, AggregateStats};
//! use eloclib::WalkOptions;
//!
//! let stats: AggregateStats = count_directory(".", &WalkOptions::new())?;
//! println!("Total eLOC: {}", stats.total_eloc);
//! ```

pub mod stats;
pub mod walker;

pub use stats::{make_relative, AggregateStats, FileMetrics, LanguageStats};
pub use walker::{count_directory, walk, NoopObserver, WalkObserver};
