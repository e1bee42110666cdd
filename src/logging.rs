use tracing_subscriber::EnvFilter;

/// Installs the process-wide subscriber. Call once from the binary entry point.
///
/// Events go to stderr as `LEVEL message` so stdout stays clean for CSV/JSON output.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
