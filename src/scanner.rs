/*!
 * Directory walking and per-entry classification
 */

use std::io;
use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, error, info};
use walkdir::{DirEntry, WalkDir};

use crate::config::{Config, ErrorPolicy, LengthScope, WhitespaceScope};
use crate::error::Result;
use crate::matcher::{over_length, whitespace_count, IllegalCharMatcher};
use crate::types::{
    EntryKind, EntryOutcome, ScanOutcome, Totals, TraversalFailure, Violation, ViolationKind,
};
use crate::utils::format_char_list;
use crate::writer::ViolationSink;

/// Sidecar files at or above this size are treated as real files
pub const SIDECAR_MAX_SIZE: u64 = 5000;

/// Windows shell sidecars, skipped when small
const SHELL_SIDECARS: [&str; 2] = ["Thumbs.db", "desktop.ini"];

/// Path classifier
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Illegal character matcher, compiled once
    matcher: IllegalCharMatcher,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Result<Self> {
        let matcher = IllegalCharMatcher::new(&config.illegal_chars)?;
        debug!("Illegal character pattern: {}", matcher.as_str());

        Ok(Self {
            config,
            matcher,
            progress,
        })
    }

    /// Walk the configured root once, feeding each violation to `sink`.
    ///
    /// Traversal errors are collected in the outcome rather than returned;
    /// an `Err` here means the sink itself failed.
    pub fn classify(&self, sink: &mut dyn ViolationSink) -> Result<ScanOutcome> {
        let mut totals = Totals::default();
        let mut failures = Vec::new();

        let mut walker = WalkDir::new(&self.config.root)
            .min_depth(1)
            .contents_first(true)
            .follow_links(false)
            .sort_by_file_name();
        if !self.config.recursive {
            walker = walker.max_depth(1);
        }

        info!(
            "Checking {} ({})",
            self.config.root.display(),
            if self.config.recursive {
                "recursive"
            } else {
                "top level only"
            }
        );

        for entry in walker {
            let visited = entry
                .map_err(TraversalFailure::from)
                .and_then(|entry| self.visit(&entry));

            let (kind, outcome) = match visited {
                Ok(visited) => visited,
                Err(failure) => {
                    match &failure.path {
                        Some(path) => error!("Cannot read {}: {}", path.display(), failure.message),
                        None => error!("Walk failed: {}", failure.message),
                    }
                    failures.push(failure);
                    if self.config.error_policy == ErrorPolicy::Abort {
                        break;
                    }
                    continue;
                }
            };

            if let EntryOutcome::Checked(violations) = &outcome {
                for violation in violations {
                    info!(
                        "{} {}: {}",
                        violation.entry,
                        violation.path.display(),
                        describe(&violation.kind)
                    );
                    sink.record(violation)?;
                }
            }
            totals.record(kind, &outcome);
        }

        info!(
            "Walk finished: {} directories, {} files, {} skipped, {} failures",
            totals.dir_count,
            totals.file_count,
            totals.skipped_count,
            failures.len()
        );

        Ok(ScanOutcome { totals, failures })
    }

    /// Classify one walked entry, reading metadata only when needed
    fn visit(
        &self,
        entry: &DirEntry,
    ) -> std::result::Result<(EntryKind, EntryOutcome), TraversalFailure> {
        self.progress.inc(1);

        let kind = if entry.file_type().is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        let name = entry.file_name().to_string_lossy();

        let name_len = name.chars().count();
        let display_name = if name_len > 40 {
            let tail: String = name.chars().skip(name_len - 37).collect();
            format!("...{}", tail)
        } else {
            name.to_string()
        };
        self.progress.set_message(format!("Current entry: {}", display_name));

        let skipped = is_system_entry(&name, kind, || {
            entry.metadata().map(|m| m.len()).map_err(io::Error::from)
        })
        .map_err(|e| TraversalFailure {
            path: Some(entry.path().to_path_buf()),
            message: e.to_string(),
        })?;

        if skipped {
            debug!("Skipping hidden/system entry {}", entry.path().display());
            return Ok((kind, EntryOutcome::Skipped));
        }

        Ok((kind, self.classify_entry(entry.path(), kind)))
    }

    /// Run every enabled check against one path. Pure: touches no filesystem.
    pub fn classify_entry(&self, path: &Path, kind: EntryKind) -> EntryOutcome {
        let mut violations = Vec::new();
        let full_path = path.to_string_lossy();
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy();

        let chars = self.matcher.find_all(&name);
        if !chars.is_empty() {
            violations.push(Violation {
                path: path.to_path_buf(),
                entry: kind,
                kind: ViolationKind::IllegalChars { chars },
            });
        }

        if self.config.whitespace {
            let target = match self.config.whitespace_scope {
                WhitespaceScope::Path => &full_path,
                WhitespaceScope::Name => &name,
            };
            let count = whitespace_count(target, self.config.whitespace_scope);
            if count > 0 {
                violations.push(Violation {
                    path: path.to_path_buf(),
                    entry: kind,
                    kind: ViolationKind::Whitespace { count },
                });
            }
        }

        let length_applies = match self.config.length_scope {
            LengthScope::All => true,
            LengthScope::Files => kind == EntryKind::File,
        };
        if length_applies {
            if let Some(length) = over_length(&full_path) {
                violations.push(Violation {
                    path: path.to_path_buf(),
                    entry: kind,
                    kind: ViolationKind::PathTooLong { length },
                });
            }
        }

        EntryOutcome::Checked(violations)
    }
}

impl From<walkdir::Error> for TraversalFailure {
    fn from(err: walkdir::Error) -> Self {
        Self {
            path: err.path().map(Path::to_path_buf),
            message: err.to_string(),
        }
    }
}

/// Whether a name is a hidden file or a small platform sidecar.
///
/// `size` is only called for names that need a size check.
pub fn is_system_entry<F>(name: &str, kind: EntryKind, size: F) -> io::Result<bool>
where
    F: FnOnce() -> io::Result<u64>,
{
    if name.starts_with('.') {
        return Ok(true);
    }

    if kind == EntryKind::File && SHELL_SIDECARS.contains(&name) {
        return Ok(size()? < SIDECAR_MAX_SIZE);
    }

    Ok(false)
}

/// One-line description of a violation for logs
pub fn describe(kind: &ViolationKind) -> String {
    match kind {
        ViolationKind::IllegalChars { chars } => {
            format!("illegal characters {}", format_char_list(chars))
        }
        ViolationKind::Whitespace { count } => format!("{} illegal whitespace occurrences", count),
        ViolationKind::PathTooLong { length } => {
            format!("path is {} characters, over the Windows limit", length)
        }
    }
}
