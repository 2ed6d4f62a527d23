/*!
 * Configuration handling for pathcheck
 */

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use strum::Display;

use crate::error::Result;
use crate::matcher::{IllegalCharSet, DEFAULT_ILLEGAL_CHARS};
use crate::{bail, ensure};

/// File format of the report written to the destination directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ReportFormat {
    /// Human readable blocks (default)
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Which entries get the path-length check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum LengthScope {
    /// Files and directories (default)
    #[default]
    All,
    /// Files only
    Files,
}

/// Which string the whitespace check scans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum WhitespaceScope {
    /// The full path, including separators (default)
    #[default]
    Path,
    /// Only the entry's base name
    Name,
}

/// What the walk does after a filesystem error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop at the first error (default)
    #[default]
    Abort,
    /// Log the error and keep walking
    Continue,
}

/// Command-line arguments for pathcheck
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "pathcheck",
    version = env!("CARGO_PKG_VERSION"),
    about = "Find file and directory names with illegal characters, stray whitespace, or over-long paths",
    long_about = "Walks a directory and reports every path whose name contains a denylisted character, \
                  whose path has leading, trailing or doubled whitespace, or whose length exceeds the \
                  255 character Windows limit. Nothing on disk is modified.\n\n\
                  Default denylist: @ : * ? ! < > | & # % $ ~ + = ' \" { } ^"
)]
pub struct Args {
    /// Path to check for illegal characters
    #[clap(short, long, value_name = "PATH")]
    pub path: String,

    /// Check all directories and files below the path
    #[clap(short, long)]
    pub recursive: bool,

    /// Check for illegal whitespace
    #[clap(short, long)]
    pub whitespace: bool,

    /// Limit the search to these characters (subset of the default list)
    #[clap(short, long, value_name = "CHARS")]
    pub characters: Option<String>,

    /// Output directory for the report
    #[clap(short, long, default_value = ".", value_name = "DIR")]
    pub destination: String,

    /// Report file format
    #[clap(short, long, value_enum, default_value_t = ReportFormat::default())]
    pub format: ReportFormat,

    /// Which entries get the path-length check
    #[clap(long, value_enum, default_value_t = LengthScope::default())]
    pub length_scope: LengthScope,

    /// Whether the whitespace check scans the full path or the base name
    #[clap(long, value_enum, default_value_t = WhitespaceScope::default())]
    pub whitespace_scope: WhitespaceScope,

    /// What to do when an entry cannot be read
    #[clap(long, value_enum, default_value_t = ErrorPolicy::default())]
    pub on_error: ErrorPolicy,

    /// Hide the progress spinner
    #[clap(long)]
    pub no_progress: bool,

    /// Enable debug logging
    #[clap(short, long)]
    pub verbose: bool,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Root directory to check
    pub root: PathBuf,

    /// Walk the whole subtree instead of direct children only
    pub recursive: bool,

    /// Run the whitespace check
    pub whitespace: bool,

    /// Characters to flag
    pub illegal_chars: IllegalCharSet,

    /// Directory receiving the report file
    pub destination: PathBuf,

    /// Report file format
    pub format: ReportFormat,

    /// Entries subject to the length check
    pub length_scope: LengthScope,

    /// String the whitespace check scans
    pub whitespace_scope: WhitespaceScope,

    /// Behavior on traversal errors
    pub error_policy: ErrorPolicy,

    /// Show the progress spinner
    pub show_progress: bool,

    /// Debug logging
    pub verbose: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let illegal_chars = args
            .characters
            .as_deref()
            .map(|chars| IllegalCharSet::from_chars(chars.chars()))
            .unwrap_or_default();

        Self {
            root: PathBuf::from(args.path),
            recursive: args.recursive,
            whitespace: args.whitespace,
            illegal_chars,
            destination: PathBuf::from(args.destination),
            format: args.format,
            length_scope: args.length_scope,
            whitespace_scope: args.whitespace_scope,
            error_policy: args.on_error,
            show_progress: !args.no_progress,
            verbose: args.verbose,
        }
    }

    /// Configuration for `root` with every option at its default
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: false,
            whitespace: false,
            illegal_chars: IllegalCharSet::default(),
            destination: PathBuf::from("."),
            format: ReportFormat::default(),
            length_scope: LengthScope::default(),
            whitespace_scope: WhitespaceScope::default(),
            error_policy: ErrorPolicy::default(),
            show_progress: false,
            verbose: false,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.root.exists() {
            bail!(PathNotFound, "Path to check not found: {}", self.root.display());
        }
        ensure!(
            self.root.is_dir(),
            InvalidArgument,
            "Path to check is not a directory: {}",
            self.root.display()
        );

        if !self.destination.is_dir() {
            bail!(
                PathNotFound,
                "Output directory not found: {}",
                self.destination.display()
            );
        }

        let unknown = self.illegal_chars.unknown_chars();
        if !unknown.is_empty() {
            let listed: String = unknown.iter().collect();
            let allowed: String = DEFAULT_ILLEGAL_CHARS.iter().collect();
            bail!(
                InvalidArgument,
                "Characters {:?} are not in the supported list {:?}",
                listed,
                allowed
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PathCheckError;
    use tempfile::tempdir;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_from_args() {
        let config = Config::from_args(parse(&["pathcheck", "-p", "/tmp"]));
        assert_eq!(config.root, PathBuf::from("/tmp"));
        assert!(!config.recursive);
        assert!(!config.whitespace);
        assert_eq!(config.illegal_chars, IllegalCharSet::default());
        assert_eq!(config.destination, PathBuf::from("."));
        assert_eq!(config.format, ReportFormat::Text);
        assert_eq!(config.length_scope, LengthScope::All);
        assert_eq!(config.whitespace_scope, WhitespaceScope::Path);
        assert_eq!(config.error_policy, ErrorPolicy::Abort);
        assert!(config.show_progress);
    }

    #[test]
    fn test_flags_from_args() {
        let config = Config::from_args(parse(&[
            "pathcheck",
            "-p",
            "/tmp",
            "-r",
            "-w",
            "-c",
            "::@",
            "-f",
            "json",
            "--length-scope",
            "files",
            "--whitespace-scope",
            "name",
            "--on-error",
            "continue",
            "--no-progress",
        ]));
        assert!(config.recursive);
        assert!(config.whitespace);
        assert_eq!(config.illegal_chars.chars(), &[':', '@']);
        assert_eq!(config.format, ReportFormat::Json);
        assert_eq!(config.length_scope, LengthScope::Files);
        assert_eq!(config.whitespace_scope, WhitespaceScope::Name);
        assert_eq!(config.error_policy, ErrorPolicy::Continue);
        assert!(!config.show_progress);
    }

    #[test]
    fn test_path_is_required() {
        assert!(Args::try_parse_from(["pathcheck"]).is_err());
    }

    #[test]
    fn test_validate_ok() {
        let dir = tempdir().unwrap();
        let mut config = Config::new(dir.path());
        config.destination = dir.path().to_path_buf();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_root() {
        let dir = tempdir().unwrap();
        let config = Config::new(dir.path().join("missing"));
        assert!(matches!(
            config.validate(),
            Err(PathCheckError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_validate_missing_destination() {
        let dir = tempdir().unwrap();
        let mut config = Config::new(dir.path());
        config.destination = dir.path().join("nowhere");
        assert!(matches!(
            config.validate(),
            Err(PathCheckError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_characters() {
        let dir = tempdir().unwrap();
        let mut config = Config::new(dir.path());
        config.destination = dir.path().to_path_buf();
        config.illegal_chars = IllegalCharSet::from_chars("@x".chars());
        assert!(matches!(
            config.validate(),
            Err(PathCheckError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_validate_rejects_file_root() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();
        let mut config = Config::new(&file);
        config.destination = dir.path().to_path_buf();
        assert!(matches!(
            config.validate(),
            Err(PathCheckError::InvalidArgument(_))
        ));
    }
}
