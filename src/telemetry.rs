//! Tracing setup. The terminal belongs to the UI, so logs only go to a file.

use std::{fs::OpenOptions, path::Path, sync::Mutex};

use color_eyre::eyre::{eyre, WrapErr};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Appends formatted events to `path`.
///
/// `RUST_LOG` overrides `default_level` when set.
pub fn init_file_logging(path: &Path, default_level: &str) -> color_eyre::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("cannot open log file {}", path.display()))?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .wrap_err_with(|| format!("invalid log level '{default_level}'"))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_filter(env_filter),
        )
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}
