use clap::Parser;
use fimon::cli::{Cli, Command};
use fimon::config::{self, Config, FileConfig};
use fimon::logging;
use fimon::monitor;
use fimon::report;
use fimon::store::SnapshotStore;
use std::process::ExitCode;

const EXIT_CHANGES: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn load_file_config(cli: &Cli) -> FileConfig {
    FileConfig::discover(cli.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(EXIT_ERROR.into());
    })
}

fn build_config(cli: &Cli, target: &fimon::cli::TargetArgs, interval: Option<u64>) -> Config {
    let file = load_file_config(cli);
    Config::from_target(cli, target, interval, file).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(EXIT_ERROR.into());
    })
}

fn run_scan(config: &Config) -> ExitCode {
    let store = SnapshotStore::new(&config.snapshot_path);
    let previous = store.load();

    match monitor::scan_once(&store, &previous, &config.directory, config.recursive) {
        Ok(outcome) => {
            report::print(&outcome, config);
            if !outcome.saved() {
                ExitCode::from(EXIT_ERROR)
            } else if outcome.changes_found() {
                ExitCode::from(EXIT_CHANGES)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            report::print_directory_error(&e, config);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

// runs until the process is interrupted; a failed check never ends the loop
fn run_watch(config: &Config) -> ExitCode {
    let store = SnapshotStore::new(&config.snapshot_path);
    let mut snapshot = store.load();

    if !config.json_output {
        println!(
            "Starting continuous monitoring of {} (interval: {})",
            config.directory.display(),
            humantime::format_duration(config.interval)
        );
    }

    loop {
        match monitor::scan_once(&store, &snapshot, &config.directory, config.recursive) {
            Ok(outcome) => {
                report::print(&outcome, config);
                snapshot = outcome.snapshot;
            }
            Err(e) => report::print_directory_error(&e, config),
        }

        std::thread::sleep(config.interval);
    }
}

fn run_status(cli: &Cli, json: bool) -> ExitCode {
    let file = load_file_config(cli);
    let store = SnapshotStore::new(config::snapshot_path(cli, &file));
    let snapshot = store.load();

    if json {
        match report::json::render_snapshot(&snapshot) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error rendering snapshot: {e}");
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        print!("{}", report::table::render(&snapshot, store.path()));
    }

    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match &cli.command {
        Command::Scan(args) => {
            let config = build_config(&cli, &args.target, None);
            run_scan(&config)
        }
        Command::Watch(args) => {
            let config = build_config(&cli, &args.target, args.interval);
            run_watch(&config)
        }
        Command::Status(args) => run_status(&cli, args.json),
    }
}
