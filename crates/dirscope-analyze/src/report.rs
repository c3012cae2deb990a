//! The assembled analysis report.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use dirscope_core::{CategoryCounts, ScanWarning};

use crate::duplicates::{DuplicateGroup, DuplicateStats};
use crate::filters::{EmptyFile, LargeFile};

/// Complete result of one analysis run.
///
/// Totals and classification counts are always present; each optional
/// fragment is materialized only when the corresponding option was set.
/// Built once per [`crate::Analyzer::analyze`] call and immutable after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Root path that was analyzed.
    pub root: PathBuf,

    /// Total size in bytes of all collected files.
    pub total_size: u64,

    /// Number of directories seen.
    pub folders: u64,

    /// Number of files collected.
    pub files: u64,

    /// Per-category classification counts; sums to `files`.
    pub categories: CategoryCounts,

    /// Files at or above the large-file threshold, largest first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_files: Option<Vec<LargeFile>>,

    /// Duplicate groups, ordered by wasted space descending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_groups: Option<Vec<DuplicateGroup>>,

    /// Summary over the duplicate groups; present only when groups were found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_stats: Option<DuplicateStats>,

    /// The N largest files of the filtered view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_largest: Option<Vec<LargeFile>>,

    /// Zero-byte files, most recently modified first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_files: Option<Vec<EmptyFile>>,

    /// Rendered tree view; omitted for large filtered sets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_view: Option<String>,

    /// Non-fatal problems absorbed during the run.
    pub warnings: Vec<ScanWarning>,
}

impl AnalysisReport {
    /// Check if the run produced any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if any duplicates were found.
    pub fn has_duplicates(&self) -> bool {
        self.duplicate_groups
            .as_ref()
            .is_some_and(|groups| !groups.is_empty())
    }
}
