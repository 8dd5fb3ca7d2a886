//! One integrity check: scan, classify against the previous snapshot, persist.

use std::path::Path;

use chrono::{DateTime, Local};

use crate::error::{DirectoryError, PersistenceError, ReadError};
use crate::scan::{self, ScanResult};
use crate::store::diff::{self, ChangeRecord};
use crate::store::{Snapshot, SnapshotStore};

/// Everything one check produced. `snapshot` is the new last known state
/// whether or not it reached disk.
#[derive(Debug)]
pub struct ScanOutcome {
    pub root: std::path::PathBuf,
    pub completed_at: DateTime<Local>,
    pub changes: Vec<ChangeRecord>,
    pub read_errors: Vec<ReadError>,
    pub snapshot: Snapshot,
    pub save_error: Option<PersistenceError>,
    pub duration_ms: u128,
    pub peak_memory_bytes: Option<usize>,
}

impl ScanOutcome {
    pub fn changes_found(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn saved(&self) -> bool {
        self.save_error.is_none()
    }
}

/// Scan `root`, diff it against `previous` and persist the result.
///
/// A DirectoryError aborts before anything is saved. A failed save does not:
/// the changes are still returned with `save_error` set.
pub fn scan_once(
    store: &SnapshotStore,
    previous: &Snapshot,
    root: &Path,
    recursive: bool,
) -> Result<ScanOutcome, DirectoryError> {
    let result = scan::scan(root, recursive)?;
    Ok(apply_scan(store, previous, result))
}

/// Classify a finished scan against `previous` and persist the new snapshot.
pub fn apply_scan(store: &SnapshotStore, previous: &Snapshot, result: ScanResult) -> ScanOutcome {
    let unreadable = result.unreadable();
    let ScanResult {
        root,
        files,
        errors,
        duration_ms,
    } = result;

    let detected_at = Local::now();
    let classification = diff::classify(previous, &files, &unreadable, detected_at);

    let save_error = match store.save(&classification.snapshot) {
        Ok(()) => None,
        Err(e) => {
            tracing::debug!(path = %store.path().display(), error = %e, "snapshot not saved");
            Some(e)
        }
    };

    ScanOutcome {
        root,
        completed_at: detected_at,
        changes: classification.changes,
        read_errors: errors,
        snapshot: classification.snapshot,
        save_error,
        duration_ms,
        peak_memory_bytes: memory_stats::memory_stats().map(|m| m.physical_mem),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn directory_error_does_not_touch_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot_path = dir.path().join("hashes.json");
        fs::write(&snapshot_path, "{}").unwrap();
        let store = SnapshotStore::new(&snapshot_path);

        let result = scan_once(&store, &Snapshot::empty(), &dir.path().join("missing"), true);

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&snapshot_path).unwrap(), "{}");
    }

    #[test]
    fn failed_save_still_reports_changes() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("target");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("a.txt"), "a").unwrap();
        let store = SnapshotStore::new(dir.path().join("missing/dir/hashes.json"));

        let outcome = scan_once(&store, &Snapshot::empty(), &target, false).unwrap();

        assert!(outcome.changes_found());
        assert!(!outcome.saved());
        assert_eq!(outcome.snapshot.len(), 1);
    }
}
