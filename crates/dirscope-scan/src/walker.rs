//! Two-pass recursive directory walker.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use tokio::fs;
use tracing::warn;

use dirscope_core::{
    AnalysisOptions, AnalyzeError, CategoryCounts, FileRecord, ProgressFn, ScanWarning,
    classify_name,
};

use crate::exclude::ExcludeMatcher;

/// Aggregate output of one walk.
#[derive(Debug)]
pub struct WalkSummary {
    /// Total size in bytes of all collected files.
    pub total_size: u64,
    /// Number of directories seen (excluded directories are not counted).
    pub folder_count: u64,
    /// Number of files collected.
    pub file_count: u64,
    /// Per-category classification counts.
    pub categories: CategoryCounts,
    /// One record per collected file, in traversal order.
    pub records: Vec<FileRecord>,
    /// Non-fatal problems encountered along the way.
    pub warnings: Vec<ScanWarning>,
}

/// Running totals for the collection pass, constructed fresh per walk so a
/// reused walker cannot leak state between runs.
struct WalkAccumulator {
    total: u64,
    processed: u64,
    total_size: u64,
    folder_count: u64,
    file_count: u64,
    categories: CategoryCounts,
    records: Vec<FileRecord>,
    warnings: Vec<ScanWarning>,
}

impl WalkAccumulator {
    fn new(total: u64) -> Self {
        Self {
            total,
            processed: 0,
            total_size: 0,
            folder_count: 0,
            file_count: 0,
            categories: CategoryCounts::new(),
            records: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn into_summary(self) -> WalkSummary {
        WalkSummary {
            total_size: self.total_size,
            folder_count: self.folder_count,
            file_count: self.file_count,
            categories: self.categories,
            records: self.records,
            warnings: self.warnings,
        }
    }
}

/// Recursive directory walker.
///
/// Pass 1 counts files that will survive exclusion and the depth bound, so
/// progress can report an exact denominator. Pass 2 re-enumerates
/// identically, stats every surviving file, classifies it, and appends a
/// [`FileRecord`]. Entries are awaited in the order the filesystem returns
/// them; callers must not rely on that order beyond its determinism for an
/// unchanged tree.
pub struct Walker {
    root: PathBuf,
    recursive: bool,
    max_depth: Option<u32>,
    dir_excludes: ExcludeMatcher,
    file_excludes: ExcludeMatcher,
    progress: Option<ProgressFn>,
}

impl Walker {
    /// Create a walker for the given options.
    pub fn new(options: &AnalysisOptions) -> Self {
        Self {
            root: options.root.clone(),
            recursive: options.recursive,
            max_depth: options.max_depth,
            dir_excludes: ExcludeMatcher::for_directories(&options.exclude_patterns),
            file_excludes: ExcludeMatcher::for_files(&options.exclude_patterns),
            progress: None,
        }
    }

    /// Attach a progress sink.
    pub fn with_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Perform the two-pass walk.
    ///
    /// Fails only if the root does not exist or is not a directory; every
    /// other failure is absorbed into [`WalkSummary::warnings`].
    pub async fn walk(&self) -> Result<WalkSummary, AnalyzeError> {
        let meta = fs::metadata(&self.root)
            .await
            .map_err(|e| AnalyzeError::io(&self.root, e))?;
        if !meta.is_dir() {
            return Err(AnalyzeError::NotADirectory {
                path: self.root.clone(),
            });
        }

        self.report(0, 1, Some("Scanning directories..."));

        let total = self.count_entries(self.root.clone(), 0).await;

        let mut acc = WalkAccumulator::new(total);
        self.collect_entries(self.root.clone(), 0, &mut acc).await;

        Ok(acc.into_summary())
    }

    fn report(&self, current: u64, total: u64, label: Option<&str>) {
        if let Some(progress) = &self.progress {
            progress(current, total, label);
        }
    }

    fn within_depth(&self, depth: u32) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }

    /// Pass 1: count files that pass 2 will collect. Read failures count
    /// the affected subtree as zero; pass 2 records the warning.
    fn count_entries(
        &self,
        dir: PathBuf,
        depth: u32,
    ) -> Pin<Box<dyn Future<Output = u64> + Send + '_>> {
        Box::pin(async move {
            if !self.within_depth(depth) {
                return 0;
            }

            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(_) => return 0,
            };

            let mut count = 0u64;
            while let Ok(Some(entry)) = entries.next_entry().await {
                let name = entry.file_name().to_string_lossy().into_owned();
                let Ok(kind) = entry.file_type().await else {
                    continue;
                };

                if kind.is_dir() {
                    if self.dir_excludes.is_match(&name) {
                        continue;
                    }
                    if self.recursive {
                        count += self.count_entries(entry.path(), depth + 1).await;
                    }
                } else if kind.is_file() && !self.file_excludes.is_match(&name) {
                    count += 1;
                }
            }

            count
        })
    }

    /// Pass 2: enumerate exactly as pass 1 did, statting and classifying
    /// each file and driving the progress sink.
    fn collect_entries<'a>(
        &'a self,
        dir: PathBuf,
        depth: u32,
        acc: &'a mut WalkAccumulator,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            if !self.within_depth(depth) {
                return;
            }

            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(path = %dir.display(), error = %err, "unable to read directory");
                    acc.warnings.push(ScanWarning::read_dir(&dir, &err));
                    return;
                }
            };

            loop {
                let entry = match entries.next_entry().await {
                    Ok(Some(entry)) => entry,
                    Ok(None) => break,
                    Err(err) => {
                        warn!(path = %dir.display(), error = %err, "directory listing failed");
                        acc.warnings.push(ScanWarning::read_dir(&dir, &err));
                        break;
                    }
                };

                let name = entry.file_name().to_string_lossy().into_owned();
                let Ok(kind) = entry.file_type().await else {
                    continue;
                };

                if kind.is_dir() {
                    if self.dir_excludes.is_match(&name) {
                        continue;
                    }
                    acc.folder_count += 1;
                    if self.recursive {
                        self.collect_entries(entry.path(), depth + 1, &mut *acc).await;
                    }
                } else if kind.is_file() {
                    if self.file_excludes.is_match(&name) {
                        continue;
                    }

                    let path = entry.path();
                    match fs::metadata(&path).await {
                        Ok(meta) => {
                            let size = meta.len();
                            acc.total_size += size;
                            acc.file_count += 1;
                            acc.categories.record(classify_name(&name));
                            acc.records.push(FileRecord::new(path.clone(), size));
                            acc.processed += 1;
                            let label = path.display().to_string();
                            self.report(acc.processed, acc.total, Some(&label));
                        }
                        Err(err) => {
                            // Still ticks the counter so progress reaches
                            // the pass-1 total.
                            warn!(path = %path.display(), error = %err, "unable to access file");
                            acc.warnings.push(ScanWarning::metadata(&path, &err));
                            acc.processed += 1;
                            self.report(acc.processed, acc.total, None);
                        }
                    }
                }
            }
        })
    }
}
