//! Analysis configuration.

use std::path::PathBuf;
use std::time::SystemTime;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for one analysis run.
///
/// The progress sink is injected on the analyzer, not stored here, so the
/// options stay `Clone + Serialize`.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct AnalysisOptions {
    /// Root path to analyze.
    pub root: PathBuf,

    /// Recurse into subdirectories.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub recursive: bool,

    /// File/directory name patterns to exclude (exact or `*` glob).
    #[builder(default)]
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Maximum depth to traverse; depth 0 is the root itself (None = unlimited).
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Report files at or above this size in bytes.
    #[builder(default)]
    #[serde(default)]
    pub large_file_threshold: Option<u64>,

    /// Hash file contents and group duplicates.
    #[builder(default = "false")]
    #[serde(default)]
    pub detect_duplicates: bool,

    /// Keep only files of at least this size in filtered views.
    #[builder(default)]
    #[serde(default)]
    pub min_size: Option<u64>,

    /// Keep only files of at most this size in filtered views.
    #[builder(default)]
    #[serde(default)]
    pub max_size: Option<u64>,

    /// Keep only files modified at or after this time in filtered views.
    #[builder(default)]
    #[serde(default)]
    pub modified_after: Option<SystemTime>,

    /// Keep only files modified at or before this time in filtered views.
    #[builder(default)]
    #[serde(default)]
    pub modified_before: Option<SystemTime>,

    /// Report the N largest files (over the filtered view).
    #[builder(default)]
    #[serde(default)]
    pub top_n: Option<usize>,

    /// Report zero-byte files.
    #[builder(default = "false")]
    #[serde(default)]
    pub include_empty: bool,
}

fn default_true() -> bool {
    true
}

impl AnalysisOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        match &self.root {
            Some(root) if !root.as_os_str().is_empty() => Ok(()),
            Some(_) => Err("Root path cannot be empty".to_string()),
            None => Err("Root path is required".to_string()),
        }
    }
}

impl AnalysisOptions {
    /// Create a new options builder.
    pub fn builder() -> AnalysisOptionsBuilder {
        AnalysisOptionsBuilder::default()
    }

    /// Create default options for analyzing a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: true,
            exclude_patterns: Vec::new(),
            max_depth: None,
            large_file_threshold: None,
            detect_duplicates: false,
            min_size: None,
            max_size: None,
            modified_after: None,
            modified_before: None,
            top_n: None,
            include_empty: false,
        }
    }

    /// Check whether a depth is within the configured bound.
    pub fn within_depth(&self, depth: u32) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }
}
