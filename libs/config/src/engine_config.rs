//! Engine Configuration Module
//!
//! Loads the pool engine configuration from built-in defaults, an optional
//! TOML file, an optional per-environment overlay and `RESERVOIR__*`
//! environment variables, in that order of precedence (last wins).

use crate::defaults;
use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Main engine configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Parameters applied when creating pools
    pub pool: PoolDefaults,

    /// Caller-side trade guard thresholds
    pub policy: TradePolicyConfig,

    /// Log output settings
    pub logging: LoggingConfig,
}

/// Pool creation defaults
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PoolDefaults {
    pub fee_numerator: u32,
    pub fee_denominator: u32,
    pub default_slippage_bps: u32,
}

/// Thresholds for rejecting trades before they reach a pool
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct TradePolicyConfig {
    pub max_price_impact_bps: u32,
    pub max_input_reserve_bps: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `pool_engine=debug`
    pub level: String,
    /// Emit newline-delimited JSON instead of human-readable lines
    pub json: bool,
}

impl Default for PoolDefaults {
    fn default() -> Self {
        Self {
            fee_numerator: defaults::pool::FEE_NUMERATOR,
            fee_denominator: defaults::pool::FEE_DENOMINATOR,
            default_slippage_bps: defaults::pool::DEFAULT_SLIPPAGE_BPS,
        }
    }
}

impl Default for TradePolicyConfig {
    fn default() -> Self {
        Self {
            max_price_impact_bps: defaults::policy::MAX_PRICE_IMPACT_BPS,
            max_input_reserve_bps: defaults::policy::MAX_INPUT_RESERVE_BPS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::logging::LEVEL.to_string(),
            json: defaults::logging::JSON,
        }
    }
}

impl EngineConfig {
    /// Load configuration with environment overrides.
    ///
    /// `base_path` is required to exist when given. Environment overlays are
    /// looked up in `<base dir>/environments/<environment>.toml`, or in
    /// `config/environments` when no base file is given.
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(base) = base_path {
            debug!("Loading engine config: {:?}", base);
            builder = builder.add_source(File::from(base).required(true));
        }

        if let Some(env) = environment {
            let env_dir = base_path
                .and_then(Path::parent)
                .map(|dir| dir.join("environments"))
                .unwrap_or_else(|| PathBuf::from(defaults::ENVIRONMENTS_DIR));
            let env_file = env_dir.join(format!("{}.toml", env));

            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(defaults::ENV_PREFIX)
                .prefix_separator(defaults::ENV_SEPARATOR)
                .separator(defaults::ENV_SEPARATOR)
                .try_parsing(true),
        );

        let config: EngineConfig = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        let pool = &self.pool;
        if pool.fee_denominator == 0 || pool.fee_numerator >= pool.fee_denominator {
            bail!(
                "pool fee {}/{} must be below 100% with a non-zero denominator",
                pool.fee_numerator,
                pool.fee_denominator
            );
        }
        if pool.default_slippage_bps > 10_000 {
            bail!(
                "default_slippage_bps {} exceeds 10000",
                pool.default_slippage_bps
            );
        }
        if self.policy.max_price_impact_bps > 10_000 {
            bail!(
                "max_price_impact_bps {} exceeds 10000",
                self.policy.max_price_impact_bps
            );
        }
        if self.policy.max_input_reserve_bps > 10_000 {
            bail!(
                "max_input_reserve_bps {} exceeds 10000",
                self.policy.max_input_reserve_bps
            );
        }
        if self.logging.level.trim().is_empty() {
            bail!("logging.level must not be empty");
        }
        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render configuration as TOML")
    }
}

/// Convenience function to load configuration with defaults
pub fn load_config(path: Option<&Path>, environment: Option<&str>) -> Result<EngineConfig> {
    EngineConfig::load(path, environment)
}
