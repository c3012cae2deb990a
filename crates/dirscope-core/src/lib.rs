//! Core types for dirscope.
//!
//! This crate provides the fundamental data structures shared by the
//! dirscope ecosystem: analysis options, the per-file record produced by
//! the walker, the file-type classifier, error/warning types, and the
//! progress-sink contract.

mod classify;
mod config;
mod error;
mod progress;
mod record;

pub use classify::{CategoryCounts, FileCategory, classify_name};
pub use config::{AnalysisOptions, AnalysisOptionsBuilder};
pub use error::{AnalyzeError, ScanWarning, WarningKind};
pub use progress::ProgressFn;
pub use record::{ContentHash, FileRecord};
