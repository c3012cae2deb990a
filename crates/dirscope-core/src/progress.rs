//! Progress reporting contract.

use std::sync::Arc;

/// Progress sink invoked at analysis checkpoints.
///
/// Called with `(current, total, label)`: once at the start of a phase with
/// `current = 0`, once per file as it completes, and with `current == total`
/// when a phase finishes. The label carries the path being processed, or a
/// phase description at phase start. The counter is monotonic within a
/// phase.
///
/// The sink runs on the analyzer's own task at I/O suspension points, so
/// implementations must not block for long.
pub type ProgressFn = Arc<dyn Fn(u64, u64, Option<&str>) + Send + Sync>;
