//! JSON output for checks and the persisted snapshot.
//!
//! One object per check so `watch --json` output can be piped line by line.

use chrono::{DateTime, Local};
use serde_json::json;

use crate::error::DirectoryError;
use crate::monitor::ScanOutcome;
use crate::store::Snapshot;

pub fn render_outcome(outcome: &ScanOutcome) -> String {
    let errors: Vec<_> = outcome
        .read_errors
        .iter()
        .map(|e| json!({ "path": e.path.to_string_lossy(), "reason": e.source.to_string() }))
        .collect();

    json!({
        "root": outcome.root.to_string_lossy(),
        "completed_at": outcome.completed_at.to_rfc3339(),
        "changes_found": outcome.changes_found(),
        "changes": outcome.changes,
        "read_errors": errors,
        "files": outcome.snapshot.len(),
        "saved": outcome.saved(),
        "save_error": outcome.save_error.as_ref().map(|e| e.to_string()),
        "duration_ms": outcome.duration_ms as u64,
    })
    .to_string()
}

pub fn render_directory_error(error: &DirectoryError, at: &DateTime<Local>) -> String {
    json!({
        "root": error.root.to_string_lossy(),
        "completed_at": at.to_rfc3339(),
        "error": error.to_string(),
    })
    .to_string()
}

pub fn render_snapshot(snapshot: &Snapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(snapshot)
}
