//! Logging setup

use eyre::eyre;
use tracing_subscriber::EnvFilter;

use crate::config::{DaemonConfig, LogFormat};

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level.
///
/// # Errors
/// Returns error if the filter is invalid or a subscriber is already installed
pub fn init(config: &DaemonConfig) -> eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| eyre!("failed to install tracing subscriber: {e}"))
}
