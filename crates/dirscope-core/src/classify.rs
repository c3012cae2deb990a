//! File-type classification by extension.

use serde::{Deserialize, Serialize};

/// The seven fixed classification categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Images,
    Videos,
    Documents,
    Audio,
    Code,
    Archives,
    Other,
}

impl FileCategory {
    /// All categories, in display order.
    pub const ALL: [FileCategory; 7] = [
        FileCategory::Images,
        FileCategory::Videos,
        FileCategory::Documents,
        FileCategory::Audio,
        FileCategory::Code,
        FileCategory::Archives,
        FileCategory::Other,
    ];

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Images => "Images",
            Self::Videos => "Videos",
            Self::Documents => "Documents",
            Self::Audio => "Audio",
            Self::Code => "Code",
            Self::Archives => "Archives",
            Self::Other => "Other",
        }
    }
}

/// Classify a file name into a category.
///
/// The extension is everything after the last `.`, lower-cased. Names with
/// no dot or a trailing dot have no extension and fall into [`FileCategory::Other`],
/// as does any extension missing from the fixed table.
pub fn classify_name(name: &str) -> FileCategory {
    let ext = match name.rfind('.') {
        Some(i) if i + 1 < name.len() => name[i + 1..].to_ascii_lowercase(),
        _ => return FileCategory::Other,
    };

    match ext.as_str() {
        "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" | "bmp" | "tiff" | "ico" => {
            FileCategory::Images
        }
        "mp4" | "mkv" | "avi" | "mov" | "webm" | "flv" | "wmv" | "m4v" => FileCategory::Videos,
        "pdf" | "docx" | "xlsx" | "pptx" | "txt" | "doc" | "xls" | "ppt" | "rtf" | "odt"
        | "ods" | "odp" => FileCategory::Documents,
        "mp3" | "wav" | "flac" | "aac" | "ogg" | "wma" | "m4a" => FileCategory::Audio,
        "js" | "ts" | "jsx" | "tsx" | "py" | "java" | "cpp" | "c" | "h" | "hpp" | "cs" | "php"
        | "rb" | "go" | "rs" | "swift" | "kt" | "scala" | "clj" | "sh" | "bat" | "ps1" | "sql"
        | "html" | "css" | "scss" | "sass" | "less" | "json" | "xml" | "yaml" | "yml" | "toml"
        | "ini" | "cfg" | "conf" => FileCategory::Code,
        "zip" | "rar" | "7z" | "tar" | "gz" | "bz2" | "xz" => FileCategory::Archives,
        _ => FileCategory::Other,
    }
}

/// Per-category file counts for one analysis run.
///
/// Construct a fresh value per run; the sum of all counts equals the number
/// of files classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub images: u64,
    pub videos: u64,
    pub documents: u64,
    pub audio: u64,
    pub code: u64,
    pub archives: u64,
    pub other: u64,
}

impl CategoryCounts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one file of the given category.
    pub fn record(&mut self, category: FileCategory) {
        *self.slot(category) += 1;
    }

    /// Get the count for a category.
    pub fn get(&self, category: FileCategory) -> u64 {
        match category {
            FileCategory::Images => self.images,
            FileCategory::Videos => self.videos,
            FileCategory::Documents => self.documents,
            FileCategory::Audio => self.audio,
            FileCategory::Code => self.code,
            FileCategory::Archives => self.archives,
            FileCategory::Other => self.other,
        }
    }

    /// Total number of classified files.
    pub fn total(&self) -> u64 {
        FileCategory::ALL.iter().map(|&c| self.get(c)).sum()
    }

    /// Iterate categories with their counts, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (FileCategory, u64)> + '_ {
        FileCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    fn slot(&mut self, category: FileCategory) -> &mut u64 {
        match category {
            FileCategory::Images => &mut self.images,
            FileCategory::Videos => &mut self.videos,
            FileCategory::Documents => &mut self.documents,
            FileCategory::Audio => &mut self.audio,
            FileCategory::Code => &mut self.code,
            FileCategory::Archives => &mut self.archives,
            FileCategory::Other => &mut self.other,
        }
    }
}
