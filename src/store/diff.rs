//! Change classification.
//!
//! Compares the persisted snapshot against a fresh scan:
//! - path only in the scan: Added
//! - path in both with a different digest: Modified
//! - path only in the snapshot: Deleted, unless the scan could not read it
//!
//! The scan's mapping always becomes the next snapshot, changes or not.
//! Paths the scan could not read keep their previous digest instead, so a
//! file that turns unreadable is neither deleted nor re-added later.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::scan::digest::Digest;
use crate::store::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Deleted,
    Modified,
}

impl ChangeKind {
    /// Label shown to operators for this kind of change.
    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::Added => "NEW FILE ADDED",
            ChangeKind::Deleted => "FILE DELETED",
            ChangeKind::Modified => "CHANGE DETECTED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub kind: ChangeKind,
    pub path: String,
    pub detected_at: DateTime<Local>,
}

#[derive(Debug)]
pub struct Classification {
    pub changes: Vec<ChangeRecord>,
    pub snapshot: Snapshot,
}

/// Classify `current` against `previous`.
///
/// Records come out as Modified/Added in path order, then Deleted in path
/// order; every record carries the same `detected_at`. `unreadable` holds
/// files and directories the scan failed to read; previous entries at or
/// below them are carried over unchanged.
pub fn classify(
    previous: &Snapshot,
    current: &BTreeMap<String, Digest>,
    unreadable: &BTreeSet<String>,
    detected_at: DateTime<Local>,
) -> Classification {
    let mut changes = Vec::new();
    let mut next = current.clone();

    let record = |kind, path: &str| ChangeRecord {
        kind,
        path: path.to_string(),
        detected_at,
    };

    for (path, digest) in current {
        match previous.get(path) {
            Some(old) if old != digest => changes.push(record(ChangeKind::Modified, path)),
            Some(_) => {}
            None => changes.push(record(ChangeKind::Added, path)),
        }
    }

    for (path, digest) in previous.iter() {
        if current.contains_key(path) {
            continue;
        }
        if is_unreadable(path, unreadable) {
            next.insert(path.clone(), digest.clone());
        } else {
            changes.push(record(ChangeKind::Deleted, path));
        }
    }

    Classification {
        changes,
        snapshot: Snapshot::from(next),
    }
}

fn is_unreadable(path: &str, unreadable: &BTreeSet<String>) -> bool {
    unreadable.contains(path)
        || unreadable
            .iter()
            .any(|failed| Path::new(path).starts_with(Path::new(failed)))
}
