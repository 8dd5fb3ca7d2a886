//! Error taxonomy.
//!
//! - ReadError: one file could not be digested, the scan skips it
//! - DirectoryError: the scan root is unusable, the whole scan is aborted
//! - PersistenceError: the snapshot could not be written, results are unsaved
//! - ConfigError: bad config file or values, fatal at startup

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
#[error("cannot read {}: {source}", path.display())]
pub struct ReadError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[derive(Debug, thiserror::Error)]
#[error("cannot scan {}: {reason}", root.display())]
pub struct DirectoryError {
    pub root: PathBuf,
    pub reason: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("cannot serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("cannot write snapshot to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid interval '{value}': {reason}")]
    Interval { value: String, reason: String },
}
