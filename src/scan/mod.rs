//! Tree scanner.
//!
//! Walks a root directory and digests every regular file it finds:
//! - recursive mode descends to any depth, otherwise only root's own files
//! - symlinks are never followed or digested, which also rules out cycles
//! - unreadable files are skipped and recorded, they never abort the scan

pub mod digest;

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use walkdir::WalkDir;

use crate::error::{DirectoryError, ReadError};
use digest::Digest;

/// Current observed state of a tree, plus whatever could not be read.
#[derive(Debug)]
pub struct ScanResult {
    pub root: PathBuf,
    pub files: BTreeMap<String, Digest>,
    pub errors: Vec<ReadError>,
    pub duration_ms: u128,
}

impl ScanResult {
    fn empty(root: PathBuf) -> Self {
        ScanResult {
            root,
            files: BTreeMap::new(),
            errors: Vec::new(),
            duration_ms: 0,
        }
    }

    /// Keys of everything that could not be read, in the same form as `files`.
    pub fn unreadable(&self) -> BTreeSet<String> {
        self.errors.iter().map(|e| path_key(&e.path)).collect()
    }
}

/// Turn a user supplied root into the absolute form every key is built from.
/// Symlinks in the root itself are kept as written.
pub fn normalize_root(root: &Path) -> Result<PathBuf, DirectoryError> {
    let absolute = std::path::absolute(root).map_err(|e| DirectoryError {
        root: root.to_path_buf(),
        reason: e.to_string(),
    })?;

    match std::fs::metadata(&absolute) {
        Ok(meta) if meta.is_dir() => Ok(absolute),
        Ok(_) => Err(DirectoryError {
            root: root.to_path_buf(),
            reason: "not a directory".to_string(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(DirectoryError {
            root: root.to_path_buf(),
            reason: "directory does not exist".to_string(),
        }),
        Err(e) => Err(DirectoryError {
            root: root.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

/// Map key for a scanned file.
pub fn path_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

pub fn scan(root: &Path, recursive: bool) -> Result<ScanResult, DirectoryError> {
    scan_with(root, recursive, digest::digest_file)
}

/// Same walk as [`scan`], digesting each regular file with `digest_fn`.
pub fn scan_with<F>(root: &Path, recursive: bool, mut digest_fn: F) -> Result<ScanResult, DirectoryError>
where
    F: FnMut(&Path) -> Result<Digest, ReadError>,
{
    let start = Instant::now();
    let root = normalize_root(root)?;

    // list root up front so an unlistable root fails the scan instead of
    // turning into a single read warning
    if let Err(e) = std::fs::read_dir(&root) {
        return Err(DirectoryError {
            root,
            reason: e.to_string(),
        });
    }

    let mut result = ScanResult::empty(root.clone());

    let mut walker = WalkDir::new(&root).min_depth(1).follow_links(false);
    if !recursive {
        walker = walker.max_depth(1);
    }

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                tracing::debug!(path = %path.display(), error = %e, "skipping unreadable entry");
                result.errors.push(ReadError {
                    path,
                    source: io::Error::from(e),
                });
                continue;
            }
        };

        // symlinks report as symlinks here since links are not followed,
        // so only real regular files get through
        if !entry.file_type().is_file() {
            continue;
        }

        match digest_fn(entry.path()) {
            Ok(digest) => {
                result.files.insert(path_key(entry.path()), digest);
            }
            Err(e) => {
                tracing::debug!(path = %e.path.display(), error = %e.source, "skipping unreadable file");
                result.errors.push(e);
            }
        }
    }

    result.duration_ms = start.elapsed().as_millis();
    tracing::debug!(
        root = %root.display(),
        recursive,
        files = result.files.len(),
        errors = result.errors.len(),
        duration_ms = result.duration_ms as u64,
        "scan complete"
    );

    Ok(result)
}
