//! Name-based exclusion matching.

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::warn;

/// Directory names skipped on every walk, regardless of user patterns.
pub const DEFAULT_DIR_EXCLUDES: &[&str] = &[
    "node_modules",
    ".git",
    ".svn",
    ".hg",
    "dist",
    "build",
    ".cache",
];

/// Decides whether a file or directory name is excluded from a walk.
///
/// A pattern without `*` matches a directory name only by exact equality;
/// for files it also matches as a name suffix (so `.log` excludes
/// `debug.log`). A pattern containing `*` matches anywhere in the name,
/// with `*` standing for any run of characters. Patterns that fail to
/// compile degrade to exact matching.
#[derive(Debug)]
pub struct ExcludeMatcher {
    exact: Vec<String>,
    suffixes: Vec<String>,
    globs: GlobSet,
}

impl ExcludeMatcher {
    /// Build a matcher for directory names: built-in defaults unioned with
    /// the user's patterns, exact or glob matching only.
    pub fn for_directories(patterns: &[String]) -> Self {
        let all: Vec<String> = DEFAULT_DIR_EXCLUDES
            .iter()
            .map(|p| (*p).to_string())
            .chain(patterns.iter().cloned())
            .collect();
        Self::build(&all, false)
    }

    /// Build a matcher for file names: no defaults, and literal patterns
    /// additionally match as a name suffix.
    pub fn for_files(patterns: &[String]) -> Self {
        Self::build(patterns, true)
    }

    fn build(patterns: &[String], suffix_literals: bool) -> Self {
        let mut exact = Vec::new();
        let mut suffixes = Vec::new();
        let mut globs = GlobSetBuilder::new();

        for pattern in patterns {
            if pattern.is_empty() {
                continue;
            }
            if pattern.contains('*') {
                // Wrap in `*...*` for substring semantics; names contain no
                // separators, so `*` covers any run of characters.
                match Glob::new(&format!("*{pattern}*")) {
                    Ok(glob) => {
                        globs.add(glob);
                    }
                    Err(err) => {
                        warn!(pattern, error = %err, "invalid exclude pattern, matching exactly");
                        exact.push(pattern.clone());
                    }
                }
            } else if suffix_literals {
                suffixes.push(pattern.clone());
            } else {
                exact.push(pattern.clone());
            }
        }

        let globs = globs.build().unwrap_or_else(|err| {
            warn!(error = %err, "failed to build exclude glob set");
            GlobSet::empty()
        });

        Self {
            exact,
            suffixes,
            globs,
        }
    }

    /// Check whether a name is excluded.
    pub fn is_match(&self, name: &str) -> bool {
        self.exact.iter().any(|p| p == name)
            || self.suffixes.iter().any(|p| name.ends_with(p.as_str()))
            || self.globs.is_match(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directory_excludes() {
        let matcher = ExcludeMatcher::for_directories(&[]);
        assert!(matcher.is_match("node_modules"));
        assert!(matcher.is_match(".git"));
        assert!(matcher.is_match(".cache"));
        assert!(!matcher.is_match("src"));
    }

    #[test]
    fn test_directory_exact_only_for_literals() {
        let matcher = ExcludeMatcher::for_directories(&["target".to_string()]);
        assert!(matcher.is_match("target"));
        assert!(!matcher.is_match("my-target"));
    }

    #[test]
    fn test_glob_patterns_match_substrings() {
        let matcher = ExcludeMatcher::for_directories(&["temp*".to_string()]);
        assert!(matcher.is_match("temp"));
        assert!(matcher.is_match("temporary"));
        assert!(matcher.is_match("my-temp-dir"));
        assert!(!matcher.is_match("src"));
    }

    #[test]
    fn test_file_suffix_match() {
        let matcher = ExcludeMatcher::for_files(&[".log".to_string()]);
        assert!(matcher.is_match("debug.log"));
        assert!(matcher.is_match(".log"));
        assert!(!matcher.is_match("log.txt"));
    }

    #[test]
    fn test_file_glob_match() {
        let matcher = ExcludeMatcher::for_files(&["*.log".to_string()]);
        assert!(matcher.is_match("debug.log"));
        assert!(!matcher.is_match("readme.md"));
    }

    #[test]
    fn test_files_have_no_defaults() {
        let matcher = ExcludeMatcher::for_files(&[]);
        assert!(!matcher.is_match("node_modules"));
        assert!(!matcher.is_match(".git"));
    }
}
