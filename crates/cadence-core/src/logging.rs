//! Tracing subscriber setup.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// ## Summary
/// Installs a global `fmt` subscriber filtered at the configured level.
///
/// `RUST_LOG`, when set, takes precedence over `config.level`.
///
/// ## Errors
/// Returns an error if the level is not a valid filter directive or a global
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(directives.as_deref(), &config.level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::debug!(level = %config.level, "Tracing initialized");
    Ok(())
}

/// Builds the filter from `RUST_LOG` directives, falling back to `level`.
fn build_filter(directives: Option<&str>, level: &str) -> Result<EnvFilter> {
    let directives = directives
        .filter(|directives| !directives.trim().is_empty())
        .unwrap_or(level);
    Ok(EnvFilter::try_new(directives)?)
}
