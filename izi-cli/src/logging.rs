use tracing_subscriber::EnvFilter;

/// Initialise the global `tracing` subscriber for the CLI.
///
/// Respects the `RUST_LOG` environment variable and falls back to `info`.
/// Logs go to stderr so command output on stdout stays machine-readable.
///
/// Call this once, at the very start of `main`, before any tracing macro.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
