//! dirscope - directory analysis CLI.
//!
//! Usage:
//!   dirscope [PATH]                Analyze a directory tree
//!   dirscope [PATH] --duplicates   Also group duplicate files
//!   dirscope [PATH] --tree         Render the result as a tree
//!   dirscope [PATH] --watch        Rerun on filesystem changes
//!   dirscope --help                Show all flags

mod output;
mod settings;
mod watch;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use dirscope_analyze::Analyzer;
use dirscope_core::{AnalysisOptions, ProgressFn};

#[derive(Parser, Debug)]
#[command(
    name = "dirscope",
    version,
    about = "Analyze directory contents: size, file types, duplicates, large and empty files"
)]
pub struct Cli {
    /// Directory to analyze
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Do not recurse into subdirectories
    #[arg(long)]
    pub no_recursive: bool,

    /// Exclude file or directory name patterns (exact or `*` glob)
    #[arg(short, long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Maximum directory depth to scan (0 = root only, negative = unlimited)
    #[arg(long, value_name = "DEPTH", allow_negative_numbers = true)]
    pub max_depth: Option<i64>,

    /// Report files at or above this size in bytes (100 MiB if no value given)
    #[arg(
        short = 'l',
        long,
        value_name = "BYTES",
        num_args = 0..=1,
        default_missing_value = "104857600"
    )]
    pub large_files: Option<u64>,

    /// Detect duplicate files by content hash
    #[arg(short, long)]
    pub duplicates: bool,

    /// Keep only files of at least this many bytes in filtered views
    #[arg(long, value_name = "BYTES")]
    pub min_size: Option<u64>,

    /// Keep only files of at most this many bytes in filtered views
    #[arg(long, value_name = "BYTES")]
    pub max_size: Option<u64>,

    /// Keep only files modified on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date_from: Option<String>,

    /// Keep only files modified on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date_to: Option<String>,

    /// Show the N largest files
    #[arg(long, value_name = "N")]
    pub top_n: Option<usize>,

    /// Detect zero-byte files
    #[arg(long)]
    pub empty_files: bool,

    /// Render the report as a tree view
    #[arg(long)]
    pub tree: bool,

    /// Print the report as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Export the full report to a CSV file
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = "directory-analysis.csv"
    )]
    pub csv: Option<PathBuf>,

    /// Export large files to a CSV file
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = "large-files.csv"
    )]
    pub csv_large: Option<PathBuf>,

    /// Export duplicate groups to a CSV file
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = "duplicates.csv"
    )]
    pub csv_duplicates: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Hide the file type breakdown
    #[arg(long)]
    pub no_types: bool,

    /// Load options from this config file instead of searching upward
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Watch the directory and rerun the analysis on changes
    #[arg(short, long)]
    pub watch: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.watch {
        return watch::run(&cli).await;
    }

    let options = build_options(&cli)?;

    let (progress, bar) = if cli.no_progress {
        (None, None)
    } else {
        let (sink, bar) = progress_sink();
        (Some(sink), Some(bar))
    };

    let analyzer = match progress {
        Some(sink) => Analyzer::with_progress(sink),
        None => Analyzer::new(),
    };
    let report = analyzer.analyze(&options).await?;

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    if let Some(path) = &cli.csv {
        output::export_analysis_csv(&report, path)?;
        eprintln!("Analysis exported to {}", path.display());
    }
    if let Some(path) = &cli.csv_large {
        if let Some(large) = report.large_files.as_deref().filter(|l| !l.is_empty()) {
            output::export_large_csv(large, path)?;
            eprintln!("Large files exported to {}", path.display());
        }
    }
    if let Some(path) = &cli.csv_duplicates {
        if let Some(groups) = report.duplicate_groups.as_deref().filter(|g| !g.is_empty()) {
            output::export_duplicates_csv(groups, path)?;
            eprintln!("Duplicates exported to {}", path.display());
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if cli.tree {
        output::print_tree(&report);
    } else {
        output::print_summary(&report, !cli.no_types);
    }

    Ok(())
}

/// Merge config-file values with CLI flags (flags win) into analysis options.
pub fn build_options(cli: &Cli) -> Result<AnalysisOptions> {
    let file = match &cli.config {
        Some(path) => settings::load(path)
            .wrap_err_with(|| format!("failed to load config file {}", path.display()))?,
        None => match settings::discover(&std::env::current_dir()?) {
            Some((path, settings)) => {
                eprintln!("Loaded configuration from {}", path.display());
                settings
            }
            None => settings::Settings::default(),
        },
    };

    let exclude_patterns = if cli.exclude.is_empty() {
        file.exclude_patterns.clone().unwrap_or_default()
    } else {
        cli.exclude.clone()
    };

    // Negative depths mean unlimited, matching the config-file convention.
    let max_depth = cli
        .max_depth
        .or(file.max_depth)
        .and_then(|depth| u32::try_from(depth).ok());

    let modified_after = cli.date_from.as_deref().map(parse_date).transpose()?;
    let modified_before = cli.date_to.as_deref().map(parse_date).transpose()?;

    Ok(AnalysisOptions::builder()
        .root(cli.path.clone())
        .recursive(!cli.no_recursive)
        .exclude_patterns(exclude_patterns)
        .max_depth(max_depth)
        .large_file_threshold(cli.large_files.or(file.large_size_threshold))
        .detect_duplicates(cli.duplicates || file.enable_duplicate_detection.unwrap_or(false))
        .min_size(cli.min_size.or(file.min_size))
        .max_size(cli.max_size.or(file.max_size))
        .modified_after(modified_after)
        .modified_before(modified_before)
        .top_n(cli.top_n.or(file.top_n).or(Some(10)))
        .include_empty(cli.empty_files || file.show_empty_files.unwrap_or(false))
        .build()?)
}

/// Parse a YYYY-MM-DD date into midnight UTC.
fn parse_date(s: &str) -> Result<SystemTime> {
    let date = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .wrap_err_with(|| format!("invalid date '{s}', expected YYYY-MM-DD"))?;
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    let utc = chrono::DateTime::<chrono::Utc>::from_naive_utc_and_offset(midnight, chrono::Utc);
    Ok(utc.into())
}

/// Build an indicatif-backed progress sink.
///
/// The analyzer drives multiple phases through one callback; a change in
/// the reported total marks a new phase and resets the bar.
fn progress_sink() -> (ProgressFn, ProgressBar) {
    let bar = ProgressBar::new(1);
    bar.set_style(
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {percent:>3}% ({pos}/{len}) {msg}")
            .unwrap()
            .progress_chars("█░ "),
    );

    let sink_bar = bar.clone();
    let sink: ProgressFn = Arc::new(move |current, total, label| {
        if sink_bar.length() != Some(total.max(1)) {
            sink_bar.set_length(total.max(1));
        }
        sink_bar.set_position(current);
        if let Some(label) = label {
            sink_bar.set_message(truncate_label(label, 48));
        }
    });

    (sink, bar)
}

/// Shorten a label to its trailing characters so the bar stays on one line.
fn truncate_label(label: &str, max: usize) -> String {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() <= max {
        label.to_string()
    } else {
        let tail: String = chars[chars.len() - (max - 3)..].iter().collect();
        format!("...{tail}")
    }
}
