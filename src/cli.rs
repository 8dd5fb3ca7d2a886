use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fimon")]
#[command(about = "A file integrity monitor: hashes a directory tree and reports what changed")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the platform config dir, e.g. ~/.config/fimon/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Snapshot file holding the last known hashes
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Show detailed output including scan timing and debug logs
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Perform a single integrity check
    Scan(ScanArgs),

    /// Check repeatedly at a fixed interval until interrupted
    Watch(WatchArgs),

    /// Show the persisted snapshot
    Status(StatusArgs),
}

#[derive(Args)]
pub struct TargetArgs {
    /// Directory to monitor
    pub directory: PathBuf,

    /// Scan directories recursively
    #[arg(long, short = 'r', default_value_t = false)]
    pub recursive: bool,

    /// Output as JSON, one object per check
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Monitoring interval in seconds (default: 60, or the config file's value)
    #[arg(long, short = 'i', value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
