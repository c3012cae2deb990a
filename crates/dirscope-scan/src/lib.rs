//! Directory traversal engine for dirscope.
//!
//! The walker makes two passes over the tree: a counting pass that sizes
//! the progress denominator, then a collection pass that stats and
//! classifies every file into a flat record list. Exclusion rules and the
//! depth bound apply identically in both passes, so the count is exact.
//!
//! Per-entry failures never abort a walk: an unreadable directory skips
//! that subtree, an unstat-able file is logged and skipped, and the scan
//! continues with the next sibling.
//!
//! # Example
//!
//! ```rust,no_run
//! use dirscope_core::AnalysisOptions;
//! use dirscope_scan::Walker;
//!
//! # async fn run() -> Result<(), dirscope_core::AnalyzeError> {
//! let options = AnalysisOptions::new("/path/to/scan");
//! let summary = Walker::new(&options).walk().await?;
//!
//! println!("{} files, {} bytes", summary.file_count, summary.total_size);
//! # Ok(())
//! # }
//! ```

mod exclude;
mod walker;

pub use exclude::{DEFAULT_DIR_EXCLUDES, ExcludeMatcher};
pub use walker::{WalkSummary, Walker};

// Re-export core types for convenience
pub use dirscope_core::{AnalysisOptions, AnalyzeError, FileRecord, ProgressFn, ScanWarning};
