pub mod json;
pub mod table;

use chrono::{DateTime, Local};

use crate::config::Config;
use crate::error::DirectoryError;
use crate::monitor::ScanOutcome;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn timestamp(at: &DateTime<Local>) -> String {
    at.format(TIME_FORMAT).to_string()
}

pub fn print(outcome: &ScanOutcome, config: &Config) {
    if config.json_output {
        println!("{}", json::render_outcome(outcome));
    } else {
        print!("{}", render(outcome));
        if config.verbose {
            print_scan_info(outcome);
        }
    }
}

/// Reports a scan that could not run at all.
pub fn print_directory_error(error: &DirectoryError, config: &Config) {
    if config.json_output {
        println!("{}", json::render_directory_error(error, &Local::now()));
    } else {
        eprintln!("[{}] ERROR: {error}", timestamp(&Local::now()));
    }
}

/// Change lines, read warnings and the completion line for one check.
pub fn render(outcome: &ScanOutcome) -> String {
    let mut output = String::new();

    for change in &outcome.changes {
        output.push_str(&format!(
            "[{}] {}: {}\n",
            timestamp(&change.detected_at),
            change.kind.label(),
            change.path
        ));
    }

    for error in &outcome.read_errors {
        output.push_str(&format!(
            "[{}] WARNING: {error}\n",
            timestamp(&outcome.completed_at)
        ));
    }

    let status = if outcome.changes_found() {
        "changes detected"
    } else {
        "no changes detected"
    };
    output.push_str(&format!(
        "[{}] Integrity check completed - {status}",
        timestamp(&outcome.completed_at)
    ));
    if let Some(e) = &outcome.save_error {
        output.push_str(&format!(" (snapshot not saved: {e})"));
    }
    output.push('\n');

    output
}

fn print_scan_info(outcome: &ScanOutcome) {
    let duration_sec = outcome.duration_ms as f64 / 1000.0;
    println!("\nscanned {} in {duration_sec:.2}s", outcome.root.display());
    println!("files tracked: {}", outcome.snapshot.len());
    println!("unreadable: {}", outcome.read_errors.len());

    if let Some(peak_bytes) = outcome.peak_memory_bytes {
        println!("peak memory: {:.1} MB", peak_bytes as f64 / 1_024_f64 / 1_024_f64);
    }
}
