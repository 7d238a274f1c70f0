//! Logging setup.
//!
//! Logs go to stderr so that CLI output on stdout stays clean. `RUST_LOG`
//! overrides the configured level.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global `tracing` subscriber.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = &config.level;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,member_qa={},member_qa_core={}",
            level, level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))?;

    tracing::debug!("logging initialized with level: {}", level);
    Ok(())
}
