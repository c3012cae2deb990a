//! Tree view construction and rendering.
//!
//! Builds a [`TreeNode`] hierarchy from the walker's flat record list by
//! folding each path's components into a trie rooted at the scan root.
//! Input is sorted by path first, and children are sorted
//! directories-first then alphabetically at every level, so the result is
//! identical regardless of the input order.

use std::path::{Path, PathBuf};

use humansize::{BINARY, format_size};
use serde::{Deserialize, Serialize};

use dirscope_core::FileRecord;

/// Rendering stops below this depth to bound output for degenerate trees.
const MAX_RENDER_DEPTH: u32 = 10;

/// One node in the rendered hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// File or directory name (not the full path).
    pub name: String,
    /// Full path to this node.
    pub path: PathBuf,
    /// File size; `None` for directories.
    pub size: Option<u64>,
    /// Whether this node is a directory.
    pub is_dir: bool,
    /// Child nodes, sorted directories-first then alphabetically.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn new_dir(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size: None,
            is_dir: true,
            children: Vec::new(),
        }
    }

    fn new_file(name: impl Into<String>, path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size: Some(size),
            is_dir: false,
            children: Vec::new(),
        }
    }

    /// Recursively sort children: directories before files, each group
    /// alphabetical by name.
    pub fn sort_children(&mut self) {
        self.children
            .sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
        for child in &mut self.children {
            child.sort_children();
        }
    }
}

/// Fold a flat record list into a tree rooted at `root`.
///
/// Records outside `root` are skipped. Directory nodes are created on
/// demand and reused for every record sharing the prefix.
pub fn build_tree(records: &[FileRecord], root: &Path) -> TreeNode {
    let mut sorted: Vec<&FileRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    let mut tree = TreeNode::new_dir(root_name, root);

    for record in sorted {
        let Ok(relative) = record.path.strip_prefix(root) else {
            continue;
        };
        let components: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let Some((file_name, dirs)) = components.split_last() else {
            continue;
        };

        let mut node = &mut tree;
        let mut prefix = root.to_path_buf();
        for part in dirs {
            prefix.push(part);
            let pos = match node
                .children
                .iter()
                .position(|c| c.is_dir && c.name == *part)
            {
                Some(pos) => pos,
                None => {
                    node.children.push(TreeNode::new_dir(part.clone(), &prefix));
                    node.children.len() - 1
                }
            };
            node = &mut node.children[pos];
        }

        node.children
            .push(TreeNode::new_file(file_name.clone(), &record.path, record.size));
    }

    tree.sort_children();
    tree
}

/// Render a tree as connector-prefixed text.
pub fn render_tree(root: &TreeNode) -> String {
    let mut out = String::new();
    render_node(root, "", true, 0, &mut out);
    out
}

/// Build and render a tree over at most `max_files` records, noting how
/// many were left out.
pub fn render_compact(records: &[FileRecord], root: &Path, max_files: usize) -> String {
    let shown = &records[..records.len().min(max_files)];
    let mut out = render_tree(&build_tree(shown, root));

    if records.len() > max_files {
        out.push_str(&format!(
            "\n... and {} more files\n",
            records.len() - max_files
        ));
    }
    out
}

fn render_node(node: &TreeNode, prefix: &str, is_last: bool, depth: u32, out: &mut String) {
    if depth > MAX_RENDER_DEPTH {
        return;
    }

    let connector = if is_last { "└── " } else { "├── " };
    out.push_str(prefix);
    out.push_str(connector);
    out.push_str(&node.name);
    match node.size {
        Some(size) if !node.is_dir => {
            out.push_str(&format!(" ({})", format_size(size, BINARY)));
        }
        _ => out.push('/'),
    }
    out.push('\n');

    let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
    let last = node.children.len().saturating_sub(1);
    for (i, child) in node.children.iter().enumerate() {
        render_node(child, &child_prefix, i == last, depth + 1, out);
    }
}
