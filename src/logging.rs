use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `FIMON_LOG` overrides the level,
/// otherwise warnings only, or debug with `--verbose`.
pub fn init(verbose: bool) {
    let default = if verbose { "fimon=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("FIMON_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    // ignore the error when a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
