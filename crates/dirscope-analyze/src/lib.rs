//! Analysis passes for dirscope.
//!
//! This crate consumes the walker's flat record list and produces the
//! assembled [`AnalysisReport`]:
//!
//! - **Duplicate detection** - whole-file BLAKE3 hashes in bounded batches
//! - **Large / top-N / empty file scanners** - rankings over the record list
//! - **Size and date filters** - in-memory selection, never a re-walk
//! - **Tree view** - path-trie fold with deterministic child ordering
//!
//! The [`Analyzer`] is the single entry point: it runs the walk, feeds the
//! record list to each enabled pass, and assembles the report.
//!
//! # Example
//!
//! ```rust,no_run
//! use dirscope_analyze::Analyzer;
//! use dirscope_core::AnalysisOptions;
//!
//! # async fn run() -> Result<(), dirscope_core::AnalyzeError> {
//! let options = AnalysisOptions::builder()
//!     .root("/path/to/scan")
//!     .detect_duplicates(true)
//!     .top_n(Some(10))
//!     .build()
//!     .unwrap();
//!
//! let report = Analyzer::new().analyze(&options).await?;
//!
//! println!("{} files, {} bytes", report.files, report.total_size);
//! if let Some(groups) = &report.duplicate_groups {
//!     println!("{} duplicate groups", groups.len());
//! }
//! # Ok(())
//! # }
//! ```

mod analyzer;
mod duplicates;
pub mod filters;
mod report;
pub mod tree;

pub use analyzer::{Analyzer, COMPACT_TREE_FILES, TREE_VIEW_LIMIT};
pub use duplicates::{DuplicateDetector, DuplicateGroup, DuplicateStats, HASH_BATCH_SIZE};
pub use filters::{EmptyFile, LargeFile};
pub use report::AnalysisReport;
pub use tree::TreeNode;

// Re-export core types for convenience
pub use dirscope_core::{
    AnalysisOptions, AnalyzeError, CategoryCounts, ContentHash, FileCategory, FileRecord,
    ProgressFn, ScanWarning,
};
