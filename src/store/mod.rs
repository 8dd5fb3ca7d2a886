//! Snapshot persistence.
//!
//! The snapshot lives in one pretty-printed JSON file:
//! - load() never fails, a missing or unparseable file is an empty snapshot
//! - save() rewrites the whole file through a temp file and an atomic rename,
//!   so a crash leaves either the old file or the new one

pub mod diff;
pub mod snapshot;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::PersistenceError;
pub use snapshot::Snapshot;

/// Default snapshot file name, relative to the working directory.
pub const DEFAULT_SNAPSHOT_FILE: &str = "file_hashes.json";

/// Owns the on-disk snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted snapshot, or an empty one if there is nothing usable.
    pub fn load(&self) -> Snapshot {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "no snapshot loaded, starting empty");
                return Snapshot::empty();
            }
        };

        match serde_json::from_str::<Snapshot>(&content) {
            Ok(snapshot) => {
                tracing::debug!(path = %self.path.display(), entries = snapshot.len(), "snapshot loaded");
                snapshot
            }
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "snapshot unparseable, starting empty");
                Snapshot::empty()
            }
        }
    }

    /// Replace the persisted snapshot with `snapshot`.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let bytes = to_pretty_json(snapshot)?;
        self.write_atomic(&bytes).map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(path = %self.path.display(), entries = snapshot.len(), "snapshot saved");
        Ok(())
    }

    fn write_atomic(&self, bytes: &[u8]) -> io::Result<()> {
        // temp file must share the target's filesystem for the rename to be atomic
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

// 4-space indent keeps the file easy to inspect and diff by hand
fn to_pretty_json(snapshot: &Snapshot) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    snapshot.serialize(&mut serializer)?;
    out.push(b'\n');
    Ok(out)
}
