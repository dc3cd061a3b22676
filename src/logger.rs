use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Sets up diagnostic logging on stderr.
///
/// User-facing progress goes through the crate's `info!`/`success!` macros;
/// this subscriber only carries `tracing` events. It logs warnings and errors
/// by default and everything down to `debug` when `debug` is set. A `RUST_LOG`
/// value, if present, is layered on top.
pub fn init(debug: bool) {
    let level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let filter_layer = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    // A subscriber may already be installed when running under tests.
    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(debug)
                .compact(),
        )
        .try_init();
}
