//! File integrity monitoring: hash a directory tree, persist the hashes, and
//! report what was added, deleted, or modified since the last check.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod report;
pub mod scan;
pub mod store;
