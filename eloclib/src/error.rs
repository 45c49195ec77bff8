//! Error types for eloclib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while counting lines
#[derive(Error, Debug)]
pub enum ElocError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File contents are not valid UTF-8
    #[error("file is not valid UTF-8 text: {0}")]
    Decode(PathBuf),

    /// Root path is missing or not a directory
    #[error("'{0}' is not a directory")]
    InvalidRoot(PathBuf),

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Worker pool could not be created
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
