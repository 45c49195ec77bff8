//! Extension deny list loaded from a plain text file.
//!
//! The format is one extension per line. Blank lines and lines whose first
//! non-whitespace character is `#` are ignored. Entries are lowercased and get a
//! leading `.` when they do not already have one, so `md`, `.md` and `MD` all
//! mean the same thing.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ElocError;
use crate::language::extension_of;
use crate::Result;

/// Set of excluded extensions, each lowercase and starting with `.`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionSet {
    extensions: BTreeSet<String>,
}

impl ExclusionSet {
    /// Create an empty set (nothing excluded).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the text form of an exclusion list.
    pub fn parse(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    }

    /// Load an exclusion list from disk.
    ///
    /// A missing file yields an empty set; any other read failure is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(ElocError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Add one extension, normalizing case and the leading dot.
    pub fn insert(&mut self, extension: &str) {
        let ext = extension.trim().to_lowercase();
        if ext.is_empty() {
            return;
        }
        if ext.starts_with('.') {
            self.extensions.insert(ext);
        } else {
            self.extensions.insert(format!(".{ext}"));
        }
    }

    /// Whether an extension (any case, with leading dot) is excluded.
    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.contains(&extension.to_lowercase())
    }

    /// Whether a file is excluded by its extension.
    pub fn contains_path(&self, path: impl AsRef<Path>) -> bool {
        let ext = extension_of(path);
        !ext.is_empty() && self.extensions.contains(&ext)
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for ext in iter {
            set.insert(ext);
        }
        set
    }
}
