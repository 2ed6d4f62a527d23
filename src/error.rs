//! Global error handling for pathcheck
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use thiserror::Error;

/// Global error type for pathcheck operations
#[derive(Error, Debug)]
pub enum PathCheckError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regular expression errors
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Specialized Result type for pathcheck operations
pub type Result<T> = std::result::Result<T, PathCheckError>;

/// Creates a PathCheckError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::PathCheckError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for adding context to errors
pub trait ResultExt<T, E> {
    /// Add additional context to an error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E: std::error::Error + 'static> ResultExt<T, E> for std::result::Result<T, E> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|e| {
            let context = f();
            PathCheckError::Unexpected(format!("{}: {}", context, e))
        })
    }
}

impl From<PathCheckError> for io::Error {
    fn from(err: PathCheckError) -> Self {
        match err {
            PathCheckError::Io(e) => e,
            PathCheckError::PathNotFound(msg) => io::Error::new(io::ErrorKind::NotFound, msg),
            PathCheckError::InvalidArgument(msg) => io::Error::new(io::ErrorKind::InvalidInput, msg),
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn needs_positive(n: i32) -> Result<i32> {
        crate::ensure!(n > 0, InvalidArgument, "expected a positive number, got {}", n);
        Ok(n)
    }

    #[test]
    fn test_ensure_macro() {
        assert_eq!(needs_positive(3).unwrap(), 3);
        let err = needs_positive(-1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: expected a positive number, got -1"
        );
    }

    #[test]
    fn test_with_context() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::Other, "boom"));
        let err = res.with_context(|| "writing report").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected error: writing report: boom");
    }

    #[test]
    fn test_into_io_error_keeps_kind() {
        let err: io::Error = PathCheckError::PathNotFound("/nope".into()).into();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
