//! Selection and ranking passes over the walker's record list.
//!
//! All of these operate on the in-memory list; none re-walks the
//! filesystem. The date filter and empty-file scanner re-stat their
//! candidates for modification times and silently drop files that can no
//! longer be read.

use std::path::PathBuf;
use std::time::SystemTime;

use humansize::{BINARY, format_size};
use serde::{Deserialize, Serialize};
use tracing::warn;

use dirscope_core::FileRecord;

/// A file reported by the large-file or top-N scanners.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LargeFile {
    pub path: PathBuf,
    pub size: u64,
    pub size_formatted: String,
}

impl LargeFile {
    fn from_record(record: &FileRecord) -> Self {
        Self {
            path: record.path.clone(),
            size: record.size,
            size_formatted: format_size(record.size, BINARY),
        }
    }
}

/// A zero-byte file with its modification time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmptyFile {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Keep records whose size falls within `[min, max]`.
pub fn filter_by_size(
    records: &[FileRecord],
    min: Option<u64>,
    max: Option<u64>,
) -> Vec<FileRecord> {
    records
        .iter()
        .filter(|r| min.is_none_or(|m| r.size >= m) && max.is_none_or(|m| r.size <= m))
        .cloned()
        .collect()
}

/// Keep records whose modification time falls within `[after, before]`.
///
/// Each surviving candidate is re-stat'd; files that cannot be read are
/// dropped without error.
pub async fn filter_by_modified(
    records: Vec<FileRecord>,
    after: Option<SystemTime>,
    before: Option<SystemTime>,
) -> Vec<FileRecord> {
    if after.is_none() && before.is_none() {
        return records;
    }

    let mut kept = Vec::with_capacity(records.len());
    for record in records {
        let modified = match stat_modified(&record.path).await {
            Some(modified) => modified,
            None => continue,
        };
        if after.is_some_and(|t| modified < t) || before.is_some_and(|t| modified > t) {
            continue;
        }
        kept.push(record);
    }
    kept
}

/// Files at or above the threshold, largest first.
pub fn large_files(records: &[FileRecord], threshold: u64) -> Vec<LargeFile> {
    let mut hits: Vec<&FileRecord> = records.iter().filter(|r| r.size >= threshold).collect();
    hits.sort_by(|a, b| b.size.cmp(&a.size));
    hits.into_iter().map(LargeFile::from_record).collect()
}

/// The `count` largest files, largest first.
pub fn top_largest(records: &[FileRecord], count: usize) -> Vec<LargeFile> {
    let mut sorted: Vec<&FileRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.size.cmp(&a.size));
    sorted
        .into_iter()
        .take(count)
        .map(LargeFile::from_record)
        .collect()
}

/// Zero-byte files with their modification times, most recent first.
pub async fn empty_files(records: &[FileRecord]) -> Vec<EmptyFile> {
    let mut found = Vec::new();
    for record in records.iter().filter(|r| r.size == 0) {
        if let Some(modified) = stat_modified(&record.path).await {
            found.push(EmptyFile {
                path: record.path.clone(),
                modified,
            });
        }
    }
    found.sort_by(|a, b| b.modified.cmp(&a.modified));
    found
}

async fn stat_modified(path: &std::path::Path) -> Option<SystemTime> {
    match tokio::fs::metadata(path).await.and_then(|m| m.modified()) {
        Ok(modified) => Some(modified),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "unable to stat file, dropping");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(sizes: &[u64]) -> Vec<FileRecord> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| FileRecord::new(format!("/tmp/file{i}"), size))
            .collect()
    }

    #[test]
    fn test_filter_by_size_bounds() {
        let records = records(&[5, 50, 500]);

        let kept = filter_by_size(&records, Some(10), None);
        assert_eq!(kept.len(), 2);

        let kept = filter_by_size(&records, None, Some(100));
        assert_eq!(kept.len(), 2);

        let kept = filter_by_size(&records, Some(10), Some(100));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].size, 50);

        // Bounds are inclusive.
        let kept = filter_by_size(&records, Some(50), Some(50));
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_large_files_threshold_and_order() {
        let records = records(&[10, 2000, 500_000]);
        let large = large_files(&records, 1000);

        assert_eq!(large.len(), 2);
        assert_eq!(large[0].size, 500_000);
        assert_eq!(large[1].size, 2000);
    }

    #[test]
    fn test_top_largest() {
        let records = records(&[3, 1, 5, 2, 4]);
        let top = top_largest(&records, 3);

        let sizes: Vec<u64> = top.iter().map(|f| f.size).collect();
        assert_eq!(sizes, vec![5, 4, 3]);
    }

    #[test]
    fn test_top_largest_shorter_list() {
        let records = records(&[1, 2]);
        assert_eq!(top_largest(&records, 10).len(), 2);
    }
}
