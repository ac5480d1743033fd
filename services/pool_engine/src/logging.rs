//! Tracing subscriber setup for the engine binary

use anyhow::{anyhow, Context, Result};
use config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG`, when set, overrides the
/// configured level.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .with_context(|| format!("Invalid log filter: {}", config.level))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.json {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow!("Failed to install JSON subscriber: {}", e))
    } else {
        builder
            .try_init()
            .map_err(|e| anyhow!("Failed to install subscriber: {}", e))
    }
}

