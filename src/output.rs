//! Text, tree, and CSV rendering of an analysis report.

use std::path::Path;

use chrono::{DateTime, Local};
use color_eyre::eyre::Result;
use humansize::{BINARY, format_size};

use dirscope_analyze::{AnalysisReport, DuplicateGroup, LargeFile};

/// Print the standard text report.
pub fn print_summary(report: &AnalysisReport, show_types: bool) {
    println!("{}", "─".repeat(60));
    println!(" {}", report.root.display());
    println!(
        " {} in {} files, {} folders",
        format_size(report.total_size, BINARY),
        report.files,
        report.folders
    );
    println!("{}", "─".repeat(60));

    if show_types {
        println!();
        println!(" File types:");
        for (category, count) in report.categories.iter() {
            if count > 0 {
                println!("   {:<10} {count}", category.label());
            }
        }
    }

    if let Some(large) = report.large_files.as_deref().filter(|l| !l.is_empty()) {
        let shown = large.len().min(5);
        println!();
        println!(" Large files (top {shown} of {}):", large.len());
        for file in &large[..shown] {
            println!(
                "   {} - {}",
                relative(&report.root, &file.path).display(),
                file.size_formatted
            );
        }
        if large.len() > shown {
            println!("   ... and {} more large files", large.len() - shown);
        }
    }

    if let Some(stats) = &report.duplicate_stats {
        println!();
        println!(" Duplicate files:");
        println!("   Groups: {}", stats.group_count);
        println!("   Wasted space: {}", stats.total_wasted_formatted);

        if let Some(groups) = report.duplicate_groups.as_deref() {
            for (i, group) in groups.iter().take(3).enumerate() {
                println!(
                    "   {}. {} each x {} files",
                    i + 1,
                    group.size_formatted,
                    group.count()
                );
                for path in group.paths.iter().take(2) {
                    println!("      {}", relative(&report.root, path).display());
                }
                if group.count() > 2 {
                    println!("      ... and {} more", group.count() - 2);
                }
            }
        }
    }

    print_top_largest(report);
    print_empty_files(report);
    print_warnings(report);
}

/// Print the tree view, falling back when it was omitted for size.
pub fn print_tree(report: &AnalysisReport) {
    println!("{}", "─".repeat(60));
    println!(" {}", report.root.display());
    println!(
        " {} in {} files, {} folders",
        format_size(report.total_size, BINARY),
        report.files,
        report.folders
    );
    println!("{}", "─".repeat(60));
    println!();

    match &report.tree_view {
        Some(tree) => println!("{tree}"),
        None => {
            println!("Tree view is not rendered for more than 1000 files.");
            println!("Use --top-n to see the largest files instead.");
        }
    }

    print_top_largest(report);
    print_empty_files(report);
    print_warnings(report);
}

fn print_top_largest(report: &AnalysisReport) {
    let Some(top) = report.top_largest.as_deref().filter(|t| !t.is_empty()) else {
        return;
    };

    println!();
    println!(" Top {} largest files:", top.len());
    for (i, file) in top.iter().enumerate() {
        println!(
            "   {}. {} - {}",
            i + 1,
            relative(&report.root, &file.path).display(),
            file.size_formatted
        );
    }
}

fn print_empty_files(report: &AnalysisReport) {
    let Some(empty) = report.empty_files.as_deref().filter(|e| !e.is_empty()) else {
        return;
    };

    println!();
    println!(" Empty files ({}):", empty.len());
    let shown = empty.len().min(10);
    for file in &empty[..shown] {
        let modified: DateTime<Local> = file.modified.into();
        println!(
            "   {} (modified {})",
            relative(&report.root, &file.path).display(),
            modified.format("%Y-%m-%d")
        );
    }
    if empty.len() > shown {
        println!("   ... and {} more empty files", empty.len() - shown);
    }
}

fn print_warnings(report: &AnalysisReport) {
    if report.has_warnings() {
        println!();
        println!(" {} warning(s) during scan", report.warnings.len());
    }
}

/// Write the full report as CSV.
pub fn export_analysis_csv(report: &AnalysisReport, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "Type",
        "Path",
        "Size (Bytes)",
        "Size (Formatted)",
        "Count",
        "Details",
    ])?;

    writer.write_record([
        "Summary".to_string(),
        report.root.display().to_string(),
        report.total_size.to_string(),
        format_size(report.total_size, BINARY),
        report.files.to_string(),
        format!("Folders: {}", report.folders),
    ])?;

    for (category, count) in report.categories.iter() {
        if count > 0 {
            writer.write_record([
                "FileType".to_string(),
                category.label().to_string(),
                "-".to_string(),
                "-".to_string(),
                count.to_string(),
                "-".to_string(),
            ])?;
        }
    }

    if let Some(large) = report.large_files.as_deref() {
        for file in large {
            writer.write_record([
                "LargeFile".to_string(),
                file.path.display().to_string(),
                file.size.to_string(),
                file.size_formatted.clone(),
                "1".to_string(),
                "-".to_string(),
            ])?;
        }
    }

    if let Some(groups) = report.duplicate_groups.as_deref() {
        for (i, group) in groups.iter().enumerate() {
            for (j, member) in group.paths.iter().enumerate() {
                let details = if j == 0 {
                    format!(
                        "Group {}, Total files: {}, Wasted space: {}",
                        i + 1,
                        group.count(),
                        format_size(group.wasted_bytes, BINARY)
                    )
                } else {
                    format!("Group {} (duplicate)", i + 1)
                };
                writer.write_record([
                    "Duplicate".to_string(),
                    member.display().to_string(),
                    group.size.to_string(),
                    group.size_formatted.clone(),
                    "1".to_string(),
                    details,
                ])?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Write the large-file list as CSV.
pub fn export_large_csv(large: &[LargeFile], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Path", "Size (Bytes)", "Size (Formatted)"])?;
    for file in large {
        writer.write_record([
            file.path.display().to_string(),
            file.size.to_string(),
            file.size_formatted.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the duplicate groups as CSV.
pub fn export_duplicates_csv(groups: &[DuplicateGroup], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "Group",
        "Path",
        "Size (Bytes)",
        "Size (Formatted)",
        "Files in Group",
        "Wasted Space",
    ])?;
    for (i, group) in groups.iter().enumerate() {
        for member in &group.paths {
            writer.write_record([
                (i + 1).to_string(),
                member.display().to_string(),
                group.size.to_string(),
                group.size_formatted.clone(),
                group.count().to_string(),
                format_size(group.wasted_bytes, BINARY),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Display a path relative to the scan root where possible.
fn relative<'a>(root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}
