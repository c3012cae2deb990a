//! Duplicate file detection using whole-file content hashing.
//!
//! Files are hashed in fixed-size batches: every file in a batch is read
//! concurrently, and the next batch does not start until the current one
//! has drained. This bounds peak open file descriptors and buffer memory
//! while still overlapping I/O.
//!
//! Grouping is by exact hash equality over the entire contents; partial or
//! sampled hashing is deliberately not used. Hash collisions producing a
//! false duplicate group are possible in principle and accepted.

use std::collections::HashMap;
use std::path::PathBuf;

use humansize::{BINARY, format_size};
use serde::{Deserialize, Serialize};
use tracing::warn;

use dirscope_core::{ContentHash, ProgressFn};

/// Number of files hashed concurrently before the next batch starts.
pub const HASH_BATCH_SIZE: usize = 50;

/// A group of files sharing identical contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Content hash shared by all members.
    pub hash: ContentHash,

    /// Size of each member in bytes, from a stat of the first member after
    /// hashing. Members are assumed, not re-verified, to share it.
    pub size: u64,

    /// Human-readable member size.
    pub size_formatted: String,

    /// Member paths, in the order they were first seen.
    pub paths: Vec<PathBuf>,

    /// Reclaimable bytes: size * (members - 1).
    pub wasted_bytes: u64,
}

impl DuplicateGroup {
    /// Number of members.
    pub fn count(&self) -> usize {
        self.paths.len()
    }

    /// How many members could be deleted while keeping one copy.
    pub fn deletable_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }
}

/// Summary statistics over all duplicate groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateStats {
    /// Number of duplicate groups.
    pub group_count: usize,
    /// Total reclaimable bytes across all groups.
    pub total_wasted_bytes: u64,
    /// Human-readable total.
    pub total_wasted_formatted: String,
}

/// Duplicate file detector.
pub struct DuplicateDetector {
    progress: Option<ProgressFn>,
}

impl DuplicateDetector {
    /// Create a detector without progress reporting.
    pub fn new() -> Self {
        Self { progress: None }
    }

    /// Create a detector that reports progress to the given sink.
    pub fn with_progress(progress: ProgressFn) -> Self {
        Self {
            progress: Some(progress),
        }
    }

    /// Hash every path and group identical contents.
    ///
    /// Unreadable files still tick the progress counter but are excluded
    /// from grouping; a group whose representative cannot be stat'd after
    /// hashing is dropped. Groups with fewer than two members are never
    /// returned. Results are ordered by wasted space, descending.
    pub async fn detect(&self, paths: &[PathBuf]) -> Vec<DuplicateGroup> {
        let total = paths.len() as u64;
        self.report(0, total, Some("Detecting duplicates..."));

        let mut by_hash: HashMap<ContentHash, Vec<PathBuf>> = HashMap::new();
        let mut processed = 0u64;

        for batch in paths.chunks(HASH_BATCH_SIZE) {
            let mut handles = Vec::with_capacity(batch.len());
            for path in batch {
                let path = path.clone();
                handles.push(tokio::spawn(async move { hash_file(&path).await }));
            }

            // Harvesting in spawn order keeps member order deterministic
            // while the whole batch hashes concurrently.
            for (path, handle) in batch.iter().zip(handles) {
                processed += 1;
                match handle.await {
                    Ok(Ok(hash)) => {
                        by_hash.entry(hash).or_default().push(path.clone());
                        let label = path.display().to_string();
                        self.report(processed, total, Some(&label));
                    }
                    Ok(Err(err)) => {
                        warn!(path = %path.display(), error = %err, "unable to hash file");
                        self.report(processed, total, None);
                    }
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "hash task failed");
                        self.report(processed, total, None);
                    }
                }
            }
        }

        let mut groups = Vec::new();
        for (hash, members) in by_hash {
            if members.len() < 2 {
                continue;
            }

            // Second stat of the representative; the file may have changed
            // since hashing and members are not re-verified.
            let size = match tokio::fs::metadata(&members[0]).await {
                Ok(meta) => meta.len(),
                Err(err) => {
                    warn!(
                        path = %members[0].display(),
                        error = %err,
                        "dropping duplicate group, representative vanished"
                    );
                    continue;
                }
            };

            let wasted_bytes = size * (members.len() as u64 - 1);
            groups.push(DuplicateGroup {
                hash,
                size,
                size_formatted: format_size(size, BINARY),
                paths: members,
                wasted_bytes,
            });
        }

        groups.sort_by(|a, b| b.wasted_bytes.cmp(&a.wasted_bytes));
        groups
    }

    /// Compute summary statistics over a group list.
    pub fn summarize(groups: &[DuplicateGroup]) -> DuplicateStats {
        let total_wasted_bytes: u64 = groups.iter().map(|g| g.wasted_bytes).sum();
        DuplicateStats {
            group_count: groups.len(),
            total_wasted_bytes,
            total_wasted_formatted: format_size(total_wasted_bytes, BINARY),
        }
    }

    fn report(&self, current: u64, total: u64, label: Option<&str>) {
        if let Some(progress) = &self.progress {
            progress(current, total, label);
        }
    }
}

impl Default for DuplicateDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash the entire contents of a file.
async fn hash_file(path: &std::path::Path) -> std::io::Result<ContentHash> {
    let bytes = tokio::fs::read(path).await?;
    Ok(ContentHash::new(*blake3::hash(&bytes).as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_identical_contents_share_a_hash() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "same bytes").unwrap();
        fs::write(temp.path().join("b.txt"), "same bytes").unwrap();
        fs::write(temp.path().join("c.txt"), "different").unwrap();

        let a = hash_file(&temp.path().join("a.txt")).await.unwrap();
        let b = hash_file(&temp.path().join("b.txt")).await.unwrap();
        let c = hash_file(&temp.path().join("c.txt")).await.unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_summarize() {
        let group = |wasted: u64| DuplicateGroup {
            hash: ContentHash::new([0; 32]),
            size: wasted,
            size_formatted: format_size(wasted, BINARY),
            paths: vec![PathBuf::from("/x"), PathBuf::from("/y")],
            wasted_bytes: wasted,
        };

        let stats = DuplicateDetector::summarize(&[group(100), group(50)]);
        assert_eq!(stats.group_count, 2);
        assert_eq!(stats.total_wasted_bytes, 150);
    }
}
