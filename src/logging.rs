/// Tracing subscriber setup.
///
/// The terminal belongs to the game while it runs, so log lines go to the
/// file named in [`Settings::log_file`] or are discarded.

use std::fs::File;
use std::io;
use std::sync::Mutex;

use anyhow::{anyhow, Context};
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

/// Install the global subscriber. `RUST_LOG` overrides the `info` default.
///
/// Fails if the log file cannot be created or a subscriber is already set.
pub fn init(settings: &Settings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false);

    match &settings.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            builder
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| anyhow!(err))
        }
        None => builder
            .with_writer(io::sink)
            .try_init()
            .map_err(|err| anyhow!(err)),
    }
}
