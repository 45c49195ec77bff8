//! Source selection: decide which files get counted.
//!
//! This module handles the first stage of the pipeline. It provides:
//!
//! - **Extension exclusions**: a deny list of extensions loaded from a text file
//! - **Path filtering**: the fixed directory deny list and user glob patterns
//!
//! ## Example
//!
//! ```rust
//! use eloclib::source::{ExclusionSet, FilterConfig};
//!
//! let exclusions = ExclusionSet::parse("md\n# images\nPNG\n");
//! assert!(exclusions.contains(".png"));
//!
//! let filter = FilterConfig::new().exclude("generated/**").unwrap();
//! assert!(filter.is_excluded(std::path::Path::new("generated/api.rs")));
//! ```

pub mod exclusions;
pub mod filter;

pub use exclusions::ExclusionSet;
pub use filter::{should_skip_dir, FilterConfig, SKIPPED_DIRS};
