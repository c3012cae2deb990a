//! Error and warning types for analysis runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal errors from an analysis run.
///
/// Only root-path validation aborts a run; every per-entry failure is
/// absorbed as a [`ScanWarning`] and the scan continues.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Root path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Root path exists but is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// I/O error while validating the root path.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl AnalyzeError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Error reading a directory's entries.
    ReadDir,
    /// Error reading file metadata.
    Metadata,
    /// Error reading file contents for hashing.
    Hash,
}

/// Non-fatal warning absorbed during a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a directory-read warning.
    pub fn read_dir(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self {
            path: path.into(),
            message: format!("Unable to read directory: {error}"),
            kind: WarningKind::ReadDir,
        }
    }

    /// Create a metadata warning.
    pub fn metadata(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self {
            path: path.into(),
            message: format!("Unable to access file: {error}"),
            kind: WarningKind::Metadata,
        }
    }

    /// Create a hashing warning.
    pub fn hash(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self {
            path: path.into(),
            message: format!("Unable to hash file: {error}"),
            kind: WarningKind::Hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_kind_mapping() {
        let err = AnalyzeError::io(
            "/missing",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, AnalyzeError::NotFound { .. }));

        let err = AnalyzeError::io(
            "/denied",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, AnalyzeError::Io { .. }));
    }

    #[test]
    fn test_warning_constructors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let warning = ScanWarning::read_dir("/some/dir", &io);
        assert_eq!(warning.kind, WarningKind::ReadDir);
        assert!(warning.message.contains("denied"));
    }
}
