//! Runtime configuration.
//!
//! CLI flags are merged over an optional TOML file:
//!
//! ```toml
//! snapshot_path = "/var/lib/fimon/hashes.json"
//! interval = "5m"
//! recursive = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::cli::{Cli, TargetArgs};
use crate::error::ConfigError;
use crate::store::DEFAULT_SNAPSHOT_FILE;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub snapshot_path: Option<PathBuf>,
    pub interval: Option<String>,
    pub recursive: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Explicit `--config` must exist; the default location is optional.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(FileConfig::default()),
        }
    }
}

/// `<config dir>/fimon/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "fimon").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[derive(Debug, Clone)]
pub struct Config {
    pub snapshot_path: PathBuf,
    pub directory: PathBuf,
    pub recursive: bool,
    pub interval: Duration,
    pub json_output: bool,
    pub verbose: bool,
}

impl Config {
    pub fn from_target(
        cli: &Cli,
        target: &TargetArgs,
        interval_secs: Option<u64>,
        file: FileConfig,
    ) -> Result<Self, ConfigError> {
        let interval = match (interval_secs, file.interval.as_deref()) {
            (Some(secs), _) => Duration::from_secs(secs),
            (None, Some(text)) => parse_interval(text)?,
            (None, None) => DEFAULT_INTERVAL,
        };

        Ok(Config {
            snapshot_path: snapshot_path(cli, &file),
            directory: target.directory.clone(),
            recursive: target.recursive || file.recursive.unwrap_or(false),
            interval,
            json_output: target.json,
            verbose: cli.verbose,
        })
    }
}

/// Snapshot file to use: `--snapshot`, then the config file, then the default.
pub fn snapshot_path(cli: &Cli, file: &FileConfig) -> PathBuf {
    cli.snapshot
        .clone()
        .or_else(|| file.snapshot_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_FILE))
}

/// Parse "90s", "5m", "1h 30m", or a bare number of seconds. Zero is rejected.
pub fn parse_interval(text: &str) -> Result<Duration, ConfigError> {
    let trimmed = text.trim();
    let duration = match trimmed.parse::<u64>() {
        Ok(secs) => Duration::from_secs(secs),
        Err(_) => humantime::parse_duration(trimmed).map_err(|e| ConfigError::Interval {
            value: text.to_string(),
            reason: e.to_string(),
        })?,
    };

    if duration.is_zero() {
        return Err(ConfigError::Interval {
            value: text.to_string(),
            reason: "interval must be positive".to_string(),
        });
    }

    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("fimon").chain(args.iter().copied()))
    }

    fn watch_config(args: &[&str], file: FileConfig) -> Result<Config, ConfigError> {
        let cli = cli(args);
        match &cli.command {
            crate::cli::Command::Watch(w) => Config::from_target(&cli, &w.target, w.interval, file),
            crate::cli::Command::Scan(s) => Config::from_target(&cli, &s.target, None, file),
            crate::cli::Command::Status(_) => unreachable!(),
        }
    }

    #[test]
    fn parse_interval_forms() {
        assert_eq!(parse_interval("90").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_interval("90s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_interval("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_interval("1h 30m").unwrap(), Duration::from_secs(5400));
    }

    #[test]
    fn parse_interval_rejects_zero_and_garbage() {
        assert!(matches!(parse_interval("0"), Err(ConfigError::Interval { .. })));
        assert!(matches!(parse_interval("0s"), Err(ConfigError::Interval { .. })));
        assert!(matches!(parse_interval("soon"), Err(ConfigError::Interval { .. })));
    }

    #[test]
    fn defaults_without_file() {
        let config = watch_config(&["watch", "/srv"], FileConfig::default()).unwrap();
        assert_eq!(config.snapshot_path, PathBuf::from(DEFAULT_SNAPSHOT_FILE));
        assert_eq!(config.interval, DEFAULT_INTERVAL);
        assert_eq!(config.directory, PathBuf::from("/srv"));
        assert!(!config.recursive);
    }

    #[test]
    fn cli_wins_over_file() {
        let file = FileConfig {
            snapshot_path: Some(PathBuf::from("/from/file.json")),
            interval: Some("5m".to_string()),
            recursive: Some(false),
        };
        let config = watch_config(
            &["--snapshot", "/from/cli.json", "watch", "/srv", "-r", "-i", "7"],
            file,
        )
        .unwrap();

        assert_eq!(config.snapshot_path, PathBuf::from("/from/cli.json"));
        assert_eq!(config.interval, Duration::from_secs(7));
        assert!(config.recursive);
    }

    #[test]
    fn file_fills_gaps() {
        let file = FileConfig {
            snapshot_path: Some(PathBuf::from("/from/file.json")),
            interval: Some("2m".to_string()),
            recursive: Some(true),
        };
        let config = watch_config(&["watch", "/srv"], file).unwrap();

        assert_eq!(config.snapshot_path, PathBuf::from("/from/file.json"));
        assert_eq!(config.interval, Duration::from_secs(120));
        assert!(config.recursive);
    }

    #[test]
    fn zero_interval_flag_rejected_by_parser() {
        let result = Cli::try_parse_from(["fimon", "watch", "/srv", "-i", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn file_config_parses_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "snapshot_path = \"/x.json\"\ninterval = \"10s\"\nrecursive = true\n").unwrap();

        let file = FileConfig::load(&path).unwrap();
        assert_eq!(file.snapshot_path, Some(PathBuf::from("/x.json")));
        assert_eq!(file.interval.as_deref(), Some("10s"));
        assert_eq!(file.recursive, Some(true));
    }

    #[test]
    fn file_config_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "snapshot = \"/x.json\"\n").unwrap();

        assert!(matches!(FileConfig::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn explicit_missing_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileConfig::discover(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
