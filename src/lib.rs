/*!
 * pathcheck - Find path names that will not survive a trip to another filesystem
 *
 * This library walks a directory tree and flags names containing denylisted
 * characters, paths with stray whitespace, and paths over the 255 character
 * Windows limit. It only reports; nothing on disk is modified.
 */

pub mod config;
pub mod error;
pub mod matcher;
pub mod report;
pub mod scanner;
pub mod summary;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::Config;
pub use error::{PathCheckError, Result};
pub use matcher::{IllegalCharMatcher, IllegalCharSet, DEFAULT_ILLEGAL_CHARS, MAX_PATH_LENGTH};
pub use report::{Reporter, RunReport};
pub use scanner::Scanner;
pub use summary::summarize;
pub use types::{EntryKind, EntryOutcome, ScanOutcome, Totals, TraversalFailure, Violation, ViolationKind};
pub use writer::{ReportWriter, ViolationSink};
