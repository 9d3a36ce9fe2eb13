use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

/// Default cap for both pipeline safety counters.
pub const DEFAULT_ITERATION_LIMIT: u32 = 1000;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub limits: IterationLimits,
    pub logging: LoggingConfig,
}

/// ## Summary
/// Caps on the two independent safety counters every filtering stage keeps.
///
/// `max_empty_sets` bounds consecutive upstream batches that came out empty;
/// `max_filtered_instances` bounds consecutive single instances rejected by a
/// limiting stage. Reaching either cap fails the iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct IterationLimits {
    pub max_empty_sets: u32,
    pub max_filtered_instances: u32,
}

impl Default for IterationLimits {
    fn default() -> Self {
        Self {
            max_empty_sets: DEFAULT_ITERATION_LIMIT,
            max_filtered_instances: DEFAULT_ITERATION_LIMIT,
        }
    }
}

impl IterationLimits {
    /// ## Summary
    /// Checks both caps are non-zero.
    ///
    /// ## Errors
    /// Returns `ConfigError` if either cap is zero, since a zero cap would fail
    /// before the first upstream pull.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_empty_sets == 0 || self.max_filtered_instances == 0 {
            return Err(CoreError::ConfigError(
                "iteration limits must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, an optional `cadence.toml` and
    /// `CADENCE__`-prefixed environment variables, later sources winning.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing or validating the
    /// configuration fails.
    pub fn load() -> Result<Self> {
        Self::load_with(environment())
    }

    fn load_with(env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .set_default("limits.max_empty_sets", i64::from(DEFAULT_ITERATION_LIMIT))?
            .set_default(
                "limits.max_filtered_instances",
                i64::from(DEFAULT_ITERATION_LIMIT),
            )?
            .set_default("logging.level", "info")?
            // TOML file
            .add_source(config::File::with_name("cadence.toml").required(false))
            .add_source(env)
            .build()?
            .try_deserialize::<Settings>()?;

        settings.limits.validate()?;
        Ok(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("CADENCE")
        .prefix_separator("__")
        .separator("__")
        .ignore_empty(true)
        .try_parsing(true)
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
