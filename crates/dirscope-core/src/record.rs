//! File records and content hashes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single file observed by the walker: its path and size in bytes.
///
/// Records are immutable once collected and shared read-only with every
/// downstream scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Full path to the file.
    pub path: PathBuf,
    /// Size in bytes at the time it was stat'd.
    pub size: u64,
}

impl FileRecord {
    /// Create a new file record.
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// BLAKE3 content hash for duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub [u8; 32]);

impl ContentHash {
    /// Create a new ContentHash from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the hash as a hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}
