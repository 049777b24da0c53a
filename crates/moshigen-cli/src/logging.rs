//! Log output for the CLI

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Default filter directive for a `-v` count
fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install a stderr subscriber; `RUST_LOG` overrides the verbosity flag
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false),
    );

    // Ignore error if a subscriber is already set
    let _ = tracing::subscriber::set_global_default(subscriber);
}
