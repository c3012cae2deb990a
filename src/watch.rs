//! Watch mode: debounce-and-rerun.
//!
//! Filesystem change notifications are coalesced over a 2-second window;
//! once the tree stays quiet for that long, the whole two-pass analysis
//! reruns and a delta summary against the previous run is printed.

use std::time::Duration;

use color_eyre::eyre::Result;
use humansize::{BINARY, format_size};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::warn;

use dirscope_analyze::{AnalysisReport, Analyzer};
use dirscope_core::AnalysisOptions;

use crate::{Cli, build_options};

const DEBOUNCE: Duration = Duration::from_secs(2);

/// Run the analysis once, then rerun it after every quiet period.
pub async fn run(cli: &Cli) -> Result<()> {
    let options = build_options(cli)?;
    println!(
        "Watching {} (press Ctrl+C to stop)",
        options.root.display()
    );

    let analyzer = Analyzer::new();
    let mut previous: Option<AnalysisReport> = None;
    analyze_once(&analyzer, &options, &mut previous).await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
        match result {
            Ok(event) if is_relevant(&event.kind) => {
                let _ = tx.send(());
            }
            Ok(_) => {}
            Err(err) => warn!(error = %err, "watch error"),
        }
    })?;
    watcher.watch(&options.root, RecursiveMode::Recursive)?;

    let mut deadline: Option<Instant> = None;
    loop {
        // `move` copies the deadline so the branch bodies stay free to
        // reassign it.
        let debounce = async move {
            match deadline {
                Some(at) => sleep_until(at).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\nStopping watch mode");
                break;
            }
            changed = rx.recv() => match changed {
                // Every event pushes the deadline out, coalescing bursts.
                Some(()) => deadline = Some(Instant::now() + DEBOUNCE),
                None => break,
            },
            _ = debounce => {
                deadline = None;
                println!("\nChange detected, updating analysis...");
                analyze_once(&analyzer, &options, &mut previous).await;
            }
        }
    }

    Ok(())
}

fn is_relevant(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

/// One analysis pass; errors are printed and watching continues.
async fn analyze_once(
    analyzer: &Analyzer,
    options: &AnalysisOptions,
    previous: &mut Option<AnalysisReport>,
) {
    match analyzer.analyze(options).await {
        Ok(report) => {
            print_status(&report, previous.as_ref());
            *previous = Some(report);
        }
        Err(err) => eprintln!("Analysis error: {err}"),
    }
}

fn print_status(current: &AnalysisReport, previous: Option<&AnalysisReport>) {
    println!();
    println!("Current status:");
    println!("  Total size: {}", format_size(current.total_size, BINARY));
    println!("  Folders: {}", current.folders);
    println!("  Files: {}", current.files);

    if let Some(previous) = previous {
        let size = current.total_size as i128 - previous.total_size as i128;
        let files = current.files as i64 - previous.files as i64;
        let folders = current.folders as i64 - previous.folders as i64;

        if size == 0 && files == 0 && folders == 0 {
            println!("  No changes since last scan");
        } else {
            println!("Changes since last scan:");
            if size != 0 {
                println!(
                    "  Size: {}{}",
                    sign(size),
                    format_size(size.unsigned_abs() as u64, BINARY)
                );
            }
            if files != 0 {
                println!("  Files: {}{}", sign(files as i128), files.abs());
            }
            if folders != 0 {
                println!("  Folders: {}{}", sign(folders as i128), folders.abs());
            }
        }
    }

    println!("{}", "═".repeat(50));
}

fn sign(value: i128) -> &'static str {
    if value > 0 { "+" } else { "-" }
}
