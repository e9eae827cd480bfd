// SPDX-License-Identifier: MIT
//
// Tracing setup.
//
// The game owns the terminal, so log lines can never go to stdout or
// stderr while it runs. With `--log <path>` every event goes to that file
// (appended, no ANSI colors); without it no subscriber is installed and the
// `tracing` macros cost next to nothing.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Level used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "info";

/// Install a file subscriber writing to `path`.
///
/// A second call (or a subscriber installed elsewhere) is ignored.
///
/// # Errors
///
/// The file cannot be created or opened for appending.
pub fn init(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
    info!(path = %path.display(), version = env!("CARGO_PKG_VERSION"), "logging started");
    Ok(())
}
