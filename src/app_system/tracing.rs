use tracing_subscriber::EnvFilter;

/// Initializes tracing once for the entire application.
///
/// Honors `RUST_LOG`; defaults to `info`. Logs go to stderr so they never
/// interleave with the console menus on stdout.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
