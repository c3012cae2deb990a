//! Config-file discovery.
//!
//! A `.dirscope.json` or `dirscope.config.json` is searched upward from
//! the start directory; the first hit wins. Values are partial: anything
//! absent falls back to CLI flags or defaults, and CLI flags always win
//! over file values.

use std::path::{Path, PathBuf};

use color_eyre::eyre::Result;
use serde::Deserialize;
use tracing::warn;

const CONFIG_FILE_NAMES: &[&str] = &[".dirscope.json", "dirscope.config.json"];

/// Partial analysis options loaded from a config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub exclude_patterns: Option<Vec<String>>,
    pub large_size_threshold: Option<u64>,
    pub enable_duplicate_detection: Option<bool>,
    /// Negative values mean unlimited.
    pub max_depth: Option<i64>,
    pub min_size: Option<u64>,
    pub max_size: Option<u64>,
    pub top_n: Option<usize>,
    pub show_empty_files: Option<bool>,
}

/// Load settings from a specific file.
pub fn load(path: &Path) -> Result<Settings> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Search upward from `start` for the first config file.
///
/// An unparseable file is reported and treated as absent rather than
/// aborting the run.
pub fn discover(start: &Path) -> Option<(PathBuf, Settings)> {
    let mut current = Some(start);
    while let Some(dir) = current {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                match load(&candidate) {
                    Ok(settings) => return Some((candidate, settings)),
                    Err(err) => {
                        warn!(path = %candidate.display(), error = %err, "failed to load config file");
                        return None;
                    }
                }
            }
        }
        current = dir.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_camel_case_keys() {
        let settings: Settings = serde_json::from_str(
            r#"{
                "excludePatterns": ["*.tmp"],
                "largeSizeThreshold": 1048576,
                "enableDuplicateDetection": true,
                "maxDepth": -1,
                "topN": 5
            }"#,
        )
        .unwrap();

        assert_eq!(settings.exclude_patterns, Some(vec!["*.tmp".to_string()]));
        assert_eq!(settings.large_size_threshold, Some(1_048_576));
        assert_eq!(settings.enable_duplicate_detection, Some(true));
        assert_eq!(settings.max_depth, Some(-1));
        assert_eq!(settings.top_n, Some(5));
        assert!(settings.min_size.is_none());
    }

    #[test]
    fn test_discover_walks_upward() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join(".dirscope.json"), r#"{"topN": 7}"#).unwrap();

        let (path, settings) = discover(&nested).unwrap();
        assert_eq!(path, temp.path().join(".dirscope.json"));
        assert_eq!(settings.top_n, Some(7));
    }

    #[test]
    fn test_discover_prefers_nearest_file() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("deep");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join(".dirscope.json"), r#"{"topN": 1}"#).unwrap();
        fs::write(nested.join("dirscope.config.json"), r#"{"topN": 2}"#).unwrap();

        let (_, settings) = discover(&nested).unwrap();
        assert_eq!(settings.top_n, Some(2));
    }
}
