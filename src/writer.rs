/*!
 * Append-only report file writer
 */

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::config::{Config, ReportFormat};
use crate::error::{Result, ResultExt};
use crate::summary::summarize;
use crate::types::{ScanOutcome, Totals, TraversalFailure, Violation, ViolationKind};
use crate::utils::{format_char_list, report_file_name, TIMESTAMP_FORMAT};

const RULE: &str = "================================================================";

/// Receives violations as the walk discovers them
pub trait ViolationSink {
    /// Record one violation
    fn record(&mut self, violation: &Violation) -> Result<()>;
}

impl ViolationSink for Vec<Violation> {
    fn record(&mut self, violation: &Violation) -> Result<()> {
        self.push(violation.clone());
        Ok(())
    }
}

/// One line of the JSON report
#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum JsonRecord<'a> {
    Start {
        timestamp: String,
        host: String,
        path: &'a Path,
        recursive: bool,
        whitespace: bool,
        whitespace_scope: String,
        length_scope: String,
        error_policy: String,
        characters: &'a [char],
    },
    Violation(&'a Violation),
    Summary {
        timestamp: String,
        success: bool,
        totals: &'a Totals,
        illegal_char_count: usize,
        char_frequencies: BTreeMap<char, usize>,
        failures: &'a [TraversalFailure],
    },
}

/// Appends run markers, violations and the summary to the dated report file
pub struct ReportWriter {
    /// Writer configuration
    config: Config,
    /// Report file location
    path: PathBuf,
    /// Open report file, append mode
    file: File,
}

impl ReportWriter {
    /// Open (or create) the report file for `started_at`'s date and write
    /// the start-of-run marker
    pub fn create(config: Config, started_at: DateTime<Local>) -> Result<Self> {
        let path = config
            .destination
            .join(report_file_name(started_at.date_naive(), config.format));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Cannot open report file {}", path.display()))?;

        let mut writer = Self { config, path, file };
        writer.write_start(started_at)?;
        Ok(writer)
    }

    /// Location of the report file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_start(&mut self, started_at: DateTime<Local>) -> Result<()> {
        let host = hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        match self.config.format {
            ReportFormat::Text => {
                writeln!(self.file)?;
                writeln!(self.file, "{}", RULE)?;
                writeln!(
                    self.file,
                    "    START CHECK: {}",
                    started_at.format(TIMESTAMP_FORMAT)
                )?;
                writeln!(self.file, "    Host: {}", host)?;
                writeln!(self.file, "{}", RULE)?;
            }
            ReportFormat::Json => {
                let record = JsonRecord::Start {
                    timestamp: started_at.to_rfc3339(),
                    host,
                    path: &self.config.root,
                    recursive: self.config.recursive,
                    whitespace: self.config.whitespace,
                    whitespace_scope: self.config.whitespace_scope.to_string(),
                    length_scope: self.config.length_scope.to_string(),
                    error_policy: self.config.error_policy.to_string(),
                    characters: self.config.illegal_chars.chars(),
                };
                Self::write_json(&mut self.file, &record)?;
            }
        }
        Ok(())
    }

    fn write_json(file: &mut File, record: &JsonRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(record)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// Write the end-of-run summary and flush the file
    pub fn finish(&mut self, outcome: &ScanOutcome, completed_at: DateTime<Local>) -> Result<()> {
        match self.config.format {
            ReportFormat::Text => {
                writeln!(self.file)?;
                for line in summarize(&outcome.totals, &self.config, completed_at) {
                    writeln!(self.file, "{}", line)?;
                }
                if !outcome.is_success() {
                    writeln!(
                        self.file,
                        "Path check did not complete successfully: {} traversal errors.",
                        outcome.failures.len()
                    )?;
                    for failure in &outcome.failures {
                        match &failure.path {
                            Some(path) => {
                                writeln!(self.file, "    {}: {}", path.display(), failure.message)?
                            }
                            None => writeln!(self.file, "    {}", failure.message)?,
                        }
                    }
                }
            }
            ReportFormat::Json => {
                let record = JsonRecord::Summary {
                    timestamp: completed_at.to_rfc3339(),
                    success: outcome.is_success(),
                    totals: &outcome.totals,
                    illegal_char_count: outcome.totals.illegal_char_count(),
                    char_frequencies: outcome.totals.char_frequencies(),
                    failures: &outcome.failures,
                };
                Self::write_json(&mut self.file, &record)?;
            }
        }
        self.file.flush()?;
        Ok(())
    }
}

impl ViolationSink for ReportWriter {
    fn record(&mut self, violation: &Violation) -> Result<()> {
        if self.config.format == ReportFormat::Json {
            return Self::write_json(&mut self.file, &JsonRecord::Violation(violation));
        }

        writeln!(self.file)?;
        writeln!(self.file, "illegal_path: {}", violation.path.display())?;
        match &violation.kind {
            ViolationKind::IllegalChars { chars } => {
                writeln!(self.file, "illegal_chars: {}", format_char_list(chars))?
            }
            ViolationKind::Whitespace { count } => {
                writeln!(self.file, "whitespace_count: {}", count)?
            }
            ViolationKind::PathTooLong { length } => {
                writeln!(self.file, "path_length: {}", length)?
            }
        }
        Ok(())
    }
}
