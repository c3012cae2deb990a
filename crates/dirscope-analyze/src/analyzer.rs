//! The analysis orchestrator.

use std::path::PathBuf;
use std::sync::Arc;

use dirscope_core::{AnalysisOptions, AnalyzeError, ProgressFn};
use dirscope_scan::Walker;

use crate::duplicates::DuplicateDetector;
use crate::filters;
use crate::report::AnalysisReport;
use crate::tree;

/// The tree view is rendered only when the filtered file count stays at or
/// below this bound.
pub const TREE_VIEW_LIMIT: usize = 1000;

/// Maximum files folded into the compact tree view.
pub const COMPACT_TREE_FILES: usize = 50;

/// Runs the walk and every enabled analysis pass, assembling one report.
///
/// Each pass is an independent function over the walker's record list;
/// the analyzer only decides which passes run and which list (raw or
/// filtered) feeds each of them.
pub struct Analyzer {
    progress: Option<ProgressFn>,
}

impl Analyzer {
    /// Create an analyzer without progress reporting.
    pub fn new() -> Self {
        Self { progress: None }
    }

    /// Create an analyzer that reports progress to the given sink.
    pub fn with_progress(progress: ProgressFn) -> Self {
        Self {
            progress: Some(progress),
        }
    }

    /// Analyze the tree under `options.root`.
    ///
    /// Fails only on root-path validation; all per-entry failures are
    /// absorbed into the report's warnings.
    pub async fn analyze(&self, options: &AnalysisOptions) -> Result<AnalysisReport, AnalyzeError> {
        let mut walker = Walker::new(options);
        if let Some(progress) = &self.progress {
            walker = walker.with_progress(Arc::clone(progress));
        }
        let summary = walker.walk().await?;

        // Large files rank the raw record list, before any filtering.
        let large_files = options
            .large_file_threshold
            .map(|threshold| filters::large_files(&summary.records, threshold));

        let (duplicate_groups, duplicate_stats) = if options.detect_duplicates {
            let detector = match &self.progress {
                Some(progress) => DuplicateDetector::with_progress(Arc::clone(progress)),
                None => DuplicateDetector::new(),
            };
            let paths: Vec<PathBuf> = summary.records.iter().map(|r| r.path.clone()).collect();
            let groups = detector.detect(&paths).await;
            let stats = (!groups.is_empty()).then(|| DuplicateDetector::summarize(&groups));
            (Some(groups), stats)
        } else {
            (None, None)
        };

        // Size and date filters narrow the view fed to top-N and the tree.
        let mut filtered = if options.min_size.is_some() || options.max_size.is_some() {
            filters::filter_by_size(&summary.records, options.min_size, options.max_size)
        } else {
            summary.records.clone()
        };
        if options.modified_after.is_some() || options.modified_before.is_some() {
            filtered =
                filters::filter_by_modified(filtered, options.modified_after, options.modified_before)
                    .await;
        }

        let top_largest = options.top_n.map(|n| filters::top_largest(&filtered, n));

        let empty_files = if options.include_empty {
            Some(filters::empty_files(&summary.records).await)
        } else {
            None
        };

        let tree_view = (filtered.len() <= TREE_VIEW_LIMIT)
            .then(|| tree::render_compact(&filtered, &options.root, COMPACT_TREE_FILES));

        Ok(AnalysisReport {
            root: options.root.clone(),
            total_size: summary.total_size,
            folders: summary.folder_count,
            files: summary.file_count,
            categories: summary.categories,
            large_files,
            duplicate_groups,
            duplicate_stats,
            top_largest,
            empty_files,
            tree_view,
            warnings: summary.warnings,
        })
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}
