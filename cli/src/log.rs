// SPDX-License-Identifier: MPL-2.0

use std::io;

use tracing_subscriber::EnvFilter;

/// Sends log output to stderr so that listings written to stdout stay clean.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        // `RUST_LOG` takes one of `TRACE`, `DEBUG`, `INFO`, `WARN`, or `ERROR`, or a list of
        // directives.
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(true)
        .with_level(true)
        // The target is mostly just noise.
        .with_target(false)
        .without_time()
        .init();
}
