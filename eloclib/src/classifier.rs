//! Lexical line classifier.
//!
//! This module decides, line by line, whether a file's text is blank, comment
//! or code, and derives the two counts the rest of the crate works with:
//!
//! - **LOC**: every logical line, blank and comment lines included
//! - **eLOC**: lines that still hold non-comment text once block comments are
//!   removed and pure line-comment lines are discarded
//!
//! The classifier is purely lexical. It does not know about string literals,
//! so a comment token inside a string is treated as a real delimiter, and block
//! comments do not nest. A block comment that is never closed swallows the rest
//! of the file.

use std::fs;
use std::ops::{Add, AddAssign};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ElocError;
use crate::language::{syntax_for_path, CommentSyntax};
use crate::Result;

/// Verdict for a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Whitespace only
    Blank,
    /// Only comment text (line comment, block comment, or both)
    Comment,
    /// Holds effective code, possibly followed by a comment
    Code,
}

/// eLOC and LOC for a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCounts {
    /// Effective lines of code
    pub eloc: u64,
    /// Total logical lines
    pub loc: u64,
}

impl LineCounts {
    /// Create counts from raw values.
    pub fn new(eloc: u64, loc: u64) -> Self {
        Self { eloc, loc }
    }

    /// True when the text had no lines at all.
    pub fn is_empty(&self) -> bool {
        self.loc == 0
    }

    /// Tally a sequence of line verdicts.
    pub fn from_kinds<'a>(kinds: impl IntoIterator<Item = &'a LineKind>) -> Self {
        kinds.into_iter().fold(Self::default(), |mut counts, kind| {
            counts.loc += 1;
            if *kind == LineKind::Code {
                counts.eloc += 1;
            }
            counts
        })
    }
}

impl Add for LineCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            eloc: self.eloc + other.eloc,
            loc: self.loc + other.loc,
        }
    }
}

impl AddAssign for LineCounts {
    fn add_assign(&mut self, other: Self) {
        self.eloc += other.eloc;
        self.loc += other.loc;
    }
}

/// Scanner state carried from one line to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ScanState {
    #[default]
    Code,
    /// Inside a block comment, waiting for this end token
    InBlockComment(&'static str),
}

/// Strip block comments from one line, returning the remaining code text and
/// the state to carry into the next line.
fn strip_block_comments<'l>(
    line: &'l str,
    syntax: &CommentSyntax,
    mut state: ScanState,
) -> (Vec<&'l str>, ScanState) {
    let mut chunks = Vec::new();
    let mut pos = 0;

    while pos < line.len() {
        match state {
            ScanState::InBlockComment(end) => match line[pos..].find(end) {
                Some(offset) => {
                    pos += offset + end.len();
                    state = ScanState::Code;
                }
                None => break,
            },
            ScanState::Code => {
                let next_open = syntax
                    .block_pairs
                    .iter()
                    .filter_map(|&(start, end)| {
                        line[pos..].find(start).map(|offset| (offset, start, end))
                    })
                    .min_by_key(|&(offset, _, _)| offset);

                match next_open {
                    Some((offset, start, end)) => {
                        chunks.push(&line[pos..pos + offset]);
                        pos += offset + start.len();
                        state = ScanState::InBlockComment(end);
                    }
                    None => {
                        chunks.push(&line[pos..]);
                        break;
                    }
                }
            }
        }
    }

    (chunks, state)
}

/// Whether text (already left-trimmed) opens with one of the line prefixes.
fn starts_with_line_comment(text: &str, syntax: &CommentSyntax) -> bool {
    let mut prefixes: Vec<&str> = syntax.line_prefixes.to_vec();
    prefixes.sort_by_key(|p| std::cmp::Reverse(p.len()));
    prefixes.iter().any(|prefix| text.starts_with(prefix))
}

fn classify_line(raw: &str, processed: &str, syntax: &CommentSyntax) -> LineKind {
    let trimmed = processed.trim();
    if trimmed.is_empty() {
        return if raw.trim().is_empty() {
            LineKind::Blank
        } else {
            LineKind::Comment
        };
    }

    if starts_with_line_comment(trimmed, syntax) {
        LineKind::Comment
    } else {
        LineKind::Code
    }
}

/// Characters that end a logical line. `\r\n` counts as a single break.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Iterator over the logical lines of a text, without their terminators.
struct LogicalLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for LogicalLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let Some((idx, c)) = self.rest.char_indices().find(|&(_, c)| is_line_break(c)) else {
            return Some(std::mem::take(&mut self.rest));
        };

        let line = &self.rest[..idx];
        let mut end = idx + c.len_utf8();
        if c == '\r' && self.rest[end..].starts_with('\n') {
            end += 1;
        }
        self.rest = &self.rest[end..];
        Some(line)
    }
}

/// Split `contents` into logical lines.
///
/// Breaks on `\n`, `\r`, `\r\n`, vertical tab, form feed, the file/group/record
/// separators, NEL and the Unicode line and paragraph separators. Text after
/// the last break is a line of its own; an empty tail is not.
pub fn logical_lines(contents: &str) -> impl Iterator<Item = &str> {
    LogicalLines { rest: contents }
}

/// Classify every logical line of `contents` (see [`logical_lines`]).
pub fn classify_lines(contents: &str, syntax: &CommentSyntax) -> Vec<LineKind> {
    if !syntax.has_comments() {
        return logical_lines(contents)
            .map(|raw| {
                if raw.trim().is_empty() {
                    LineKind::Blank
                } else {
                    LineKind::Code
                }
            })
            .collect();
    }

    let mut state = ScanState::default();

    logical_lines(contents)
        .map(|raw| {
            let (chunks, next) = strip_block_comments(raw, syntax, state);
            state = next;
            classify_line(raw, &chunks.concat(), syntax)
        })
        .collect()
}

/// Count eLOC and LOC for `contents` under the given comment syntax.
///
/// ```rust
/// use eloclib::{classify, syntax_for};
///
/// let counts = classify("x = 1  # trailing\n# only comment\n", syntax_for(".py"));
/// assert_eq!(counts.loc, 2);
/// assert_eq!(counts.eloc, 1);
/// ```
pub fn classify(contents: &str, syntax: &CommentSyntax) -> LineCounts {
    LineCounts::from_kinds(&classify_lines(contents, syntax))
}

/// Read a file and count it using the comment syntax of its extension.
///
/// Fails when the file cannot be read or is not UTF-8 text.
pub fn count_file(path: impl AsRef<Path>) -> Result<LineCounts> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| ElocError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let contents = String::from_utf8(bytes).map_err(|_| ElocError::Decode(path.to_path_buf()))?;

    Ok(classify(&contents, syntax_for_path(path)))
}
