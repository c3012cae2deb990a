use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use dirscope_analyze::{Analyzer, DuplicateDetector};
use dirscope_core::{AnalysisOptions, ProgressFn};

#[tokio::test]
async fn test_scenario_duplicates_and_empty_files() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::write(root.join("a.txt"), "hello").unwrap();
    fs::create_dir(root.join("b")).unwrap();
    fs::write(root.join("b/c.txt"), "hello").unwrap();
    fs::write(root.join("b/empty.dat"), "").unwrap();

    let options = AnalysisOptions::builder()
        .root(root)
        .detect_duplicates(true)
        .include_empty(true)
        .build()
        .unwrap();

    let report = Analyzer::new().analyze(&options).await.unwrap();

    assert_eq!(report.files, 3);
    assert_eq!(report.folders, 1);
    assert_eq!(report.total_size, 10);
    assert_eq!(report.categories.total(), report.files);

    let groups = report.duplicate_groups.as_ref().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].count(), 2);
    assert_eq!(groups[0].size, 5);
    assert_eq!(groups[0].wasted_bytes, 5);

    let stats = report.duplicate_stats.as_ref().unwrap();
    assert_eq!(stats.group_count, 1);
    assert_eq!(stats.total_wasted_bytes, 5);

    let empty = report.empty_files.as_ref().unwrap();
    assert_eq!(empty.len(), 1);
    assert!(empty[0].path.ends_with("b/empty.dat"));
}

#[tokio::test]
async fn test_no_duplicates_when_contents_differ() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("one.txt"), "first").unwrap();
    fs::write(temp.path().join("two.txt"), "second").unwrap();

    let options = AnalysisOptions::builder()
        .root(temp.path())
        .detect_duplicates(true)
        .build()
        .unwrap();

    let report = Analyzer::new().analyze(&options).await.unwrap();

    assert!(report.duplicate_groups.as_ref().unwrap().is_empty());
    assert!(report.duplicate_stats.is_none());
}

#[tokio::test]
async fn test_duplicate_groups_ordered_by_wasted_space() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    // Small group: 2 x 4 bytes -> 4 wasted.
    fs::write(root.join("s1.dat"), "aaaa").unwrap();
    fs::write(root.join("s2.dat"), "aaaa").unwrap();
    // Big group: 3 x 10 bytes -> 20 wasted.
    fs::write(root.join("b1.dat"), "0123456789").unwrap();
    fs::write(root.join("b2.dat"), "0123456789").unwrap();
    fs::write(root.join("b3.dat"), "0123456789").unwrap();

    let options = AnalysisOptions::builder()
        .root(root)
        .detect_duplicates(true)
        .build()
        .unwrap();

    let report = Analyzer::new().analyze(&options).await.unwrap();
    let groups = report.duplicate_groups.unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].wasted_bytes, 20);
    assert_eq!(groups[0].count(), 3);
    assert_eq!(groups[1].wasted_bytes, 4);

    // Members share the recorded size, wasted space checks out.
    for group in &groups {
        assert!(group.count() >= 2);
        assert_eq!(
            group.wasted_bytes,
            group.size * (group.count() as u64 - 1)
        );
    }
}

#[tokio::test]
async fn test_detector_progress_is_monotonic_and_complete() {
    let temp = TempDir::new().unwrap();
    let mut paths = Vec::new();
    for i in 0..7 {
        let path = temp.path().join(format!("f{i}.bin"));
        fs::write(&path, format!("contents {i}")).unwrap();
        paths.push(path);
    }
    // One path that cannot be read still ticks the counter.
    paths.push(temp.path().join("missing.bin"));

    let calls: Arc<Mutex<Vec<(u64, u64)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let progress: ProgressFn = Arc::new(move |current, total, _| {
        sink.lock().unwrap().push((current, total));
    });

    let groups = DuplicateDetector::with_progress(progress)
        .detect(&paths)
        .await;
    assert!(groups.is_empty());

    let calls = calls.lock().unwrap();
    assert_eq!(calls.first(), Some(&(0, 8)));
    assert_eq!(calls.last(), Some(&(8, 8)));
    for pair in calls.windows(2) {
        assert!(pair[1].0 >= pair[0].0);
    }
}

#[tokio::test]
async fn test_large_file_detection() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("tiny.bin"), vec![0u8; 10]).unwrap();
    fs::write(root.join("medium.bin"), vec![0u8; 2000]).unwrap();
    fs::write(root.join("big.bin"), vec![0u8; 500_000]).unwrap();

    let options = AnalysisOptions::builder()
        .root(root)
        .large_file_threshold(Some(1000u64))
        .build()
        .unwrap();

    let report = Analyzer::new().analyze(&options).await.unwrap();
    let large = report.large_files.unwrap();

    assert_eq!(large.len(), 2);
    assert_eq!(large[0].size, 500_000);
    assert_eq!(large[1].size, 2000);
}

#[tokio::test]
async fn test_top_n_largest() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    for (name, size) in [("a", 100), ("b", 400), ("c", 200), ("d", 500), ("e", 300)] {
        fs::write(root.join(format!("{name}.bin")), vec![0u8; size]).unwrap();
    }

    let options = AnalysisOptions::builder()
        .root(root)
        .top_n(Some(3usize))
        .build()
        .unwrap();

    let report = Analyzer::new().analyze(&options).await.unwrap();
    let top = report.top_largest.unwrap();

    let sizes: Vec<u64> = top.iter().map(|f| f.size).collect();
    assert_eq!(sizes, vec![500, 400, 300]);
}

#[tokio::test]
async fn test_empty_files_only_zero_byte() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("empty.txt"), "").unwrap();
    fs::write(root.join("full.txt"), "data").unwrap();

    let options = AnalysisOptions::builder()
        .root(root)
        .include_empty(true)
        .build()
        .unwrap();

    let report = Analyzer::new().analyze(&options).await.unwrap();
    let empty = report.empty_files.unwrap();

    assert_eq!(empty.len(), 1);
    assert!(empty[0].path.ends_with("empty.txt"));
}

#[tokio::test]
async fn test_size_filter_narrows_top_n() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("small.bin"), vec![0u8; 10]).unwrap();
    fs::write(root.join("mid.bin"), vec![0u8; 100]).unwrap();
    fs::write(root.join("large.bin"), vec![0u8; 1000]).unwrap();

    let options = AnalysisOptions::builder()
        .root(root)
        .min_size(Some(50u64))
        .max_size(Some(500u64))
        .top_n(Some(10usize))
        .build()
        .unwrap();

    let report = Analyzer::new().analyze(&options).await.unwrap();
    let top = report.top_largest.unwrap();

    // Totals still reflect the whole walk; only the filtered view narrows.
    assert_eq!(report.files, 3);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].size, 100);
}

#[tokio::test]
async fn test_date_filter_keeps_recent_files() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("recent.txt"), "fresh").unwrap();

    let long_ago = std::time::SystemTime::now() - std::time::Duration::from_secs(3600);
    let options = AnalysisOptions::builder()
        .root(root)
        .modified_after(Some(long_ago))
        .top_n(Some(10usize))
        .build()
        .unwrap();

    let report = Analyzer::new().analyze(&options).await.unwrap();
    assert_eq!(report.top_largest.unwrap().len(), 1);

    // A lower bound in the future filters everything out.
    let future = std::time::SystemTime::now() + std::time::Duration::from_secs(3600);
    let options = AnalysisOptions::builder()
        .root(root)
        .modified_after(Some(future))
        .top_n(Some(10usize))
        .build()
        .unwrap();

    let report = Analyzer::new().analyze(&options).await.unwrap();
    assert!(report.top_largest.unwrap().is_empty());
}

#[tokio::test]
async fn test_tree_view_present_for_small_sets() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub/file.txt"), "x").unwrap();
    fs::write(root.join("top.txt"), "y").unwrap();

    let options = AnalysisOptions::new(root);
    let report = Analyzer::new().analyze(&options).await.unwrap();

    let tree = report.tree_view.unwrap();
    assert!(tree.contains("sub/"));
    assert!(tree.contains("file.txt"));
    assert!(tree.contains("top.txt"));
}

#[tokio::test]
async fn test_tree_view_omitted_for_large_sets() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    for i in 0..1050 {
        fs::write(root.join(format!("f{i:04}.dat")), "x").unwrap();
    }

    let options = AnalysisOptions::new(root);
    let report = Analyzer::new().analyze(&options).await.unwrap();

    assert_eq!(report.files, 1050);
    assert!(report.tree_view.is_none());
}

#[tokio::test]
async fn test_batching_handles_more_than_one_batch() {
    let temp = TempDir::new().unwrap();
    let mut paths: Vec<PathBuf> = Vec::new();
    // 60 files of 12 distinct contents: crosses the 50-file batch boundary
    // and every group spans batches.
    for i in 0..60 {
        let path = temp.path().join(format!("file{i:02}.bin"));
        fs::write(&path, format!("content-{}", i % 12)).unwrap();
        paths.push(path);
    }

    let groups = DuplicateDetector::new().detect(&paths).await;

    assert_eq!(groups.len(), 12);
    for group in &groups {
        assert_eq!(group.count(), 5);
        // Members keep first-seen order.
        let mut sorted = group.paths.clone();
        sorted.sort();
        assert_eq!(group.paths, sorted);
    }
}
