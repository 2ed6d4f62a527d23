/*!
 * Core types and data structures for pathcheck
 */

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use strum::Display;

/// Kind of filesystem entry being classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file, or a symlink (links are never followed)
    File,
    /// Directory
    Directory,
}

/// What was wrong with a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ViolationKind {
    /// Base name contains denylisted characters, in order of appearance
    IllegalChars { chars: Vec<char> },
    /// Path has leading, trailing, separator-adjacent or doubled whitespace
    Whitespace { count: usize },
    /// Path is longer than the Windows limit
    PathTooLong { length: usize },
}

/// A single detected problem tied to one path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Full path of the offending entry
    pub path: PathBuf,
    /// Whether the entry is a file or directory
    pub entry: EntryKind,
    /// Violation detail
    #[serde(flatten)]
    pub kind: ViolationKind,
}

/// Classification result for one visited entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Hidden or system sidecar entry, excluded from all checks
    Skipped,
    /// Entry was checked; the list is empty for a clean name
    Checked(Vec<Violation>),
}

/// A filesystem error hit while walking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraversalFailure {
    /// Path that could not be read, when known
    pub path: Option<PathBuf>,
    /// Error description
    pub message: String,
}

/// Running totals for one classification pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Directories visited
    pub dir_count: usize,
    /// Files visited
    pub file_count: usize,
    /// Hidden/system entries skipped
    pub skipped_count: usize,
    /// Every matched illegal character, duplicates kept
    pub illegal_chars: Vec<char>,
    /// Directory names with at least one illegal character
    pub illegal_dirnames: usize,
    /// File names with at least one illegal character
    pub illegal_filenames: usize,
    /// Whitespace occurrences
    pub whitespace_count: usize,
    /// Paths over the length limit
    pub over_length_count: usize,
}

impl Totals {
    /// Total number of illegal character occurrences
    pub fn illegal_char_count(&self) -> usize {
        self.illegal_chars.len()
    }

    /// Occurrence count for each distinct illegal character observed
    pub fn char_frequencies(&self) -> BTreeMap<char, usize> {
        let mut freq = BTreeMap::new();
        for c in &self.illegal_chars {
            *freq.entry(*c).or_insert(0) += 1;
        }
        freq
    }

    /// Fold one classified entry into the totals
    pub fn record(&mut self, entry: EntryKind, outcome: &EntryOutcome) {
        let violations = match outcome {
            EntryOutcome::Skipped => {
                self.skipped_count += 1;
                return;
            }
            EntryOutcome::Checked(violations) => violations,
        };

        match entry {
            EntryKind::Directory => self.dir_count += 1,
            EntryKind::File => self.file_count += 1,
        }

        for violation in violations {
            match &violation.kind {
                ViolationKind::IllegalChars { chars } => {
                    self.illegal_chars.extend_from_slice(chars);
                    match entry {
                        EntryKind::Directory => self.illegal_dirnames += 1,
                        EntryKind::File => self.illegal_filenames += 1,
                    }
                }
                ViolationKind::Whitespace { count } => self.whitespace_count += count,
                ViolationKind::PathTooLong { .. } => self.over_length_count += 1,
            }
        }
    }
}

/// Result of a complete walk
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Final totals
    pub totals: Totals,
    /// Traversal errors; a non-empty list marks the run as failed
    pub failures: Vec<TraversalFailure>,
}

impl ScanOutcome {
    /// Whether the walk finished without traversal errors
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}
