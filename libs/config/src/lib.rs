//! # Reservoir Centralized Configuration
//!
//! Configuration loading and defaults for the pool engine and its CLI.
//!
//! ## Features
//!
//! - **Pool Defaults**: Fee fraction and preview slippage for new pools
//! - **Trade Policy**: Price-impact and input-size ceilings for the caller-side guard
//! - **Logging**: Filter directive and output format
//!
//! ## Usage
//!
//! ```rust,no_run
//! use config::EngineConfig;
//!
//! let config = EngineConfig::load(None, Some("production")).unwrap();
//! let ceiling = config.policy.max_price_impact_bps;
//! ```

pub mod defaults;
pub mod engine_config;

// Re-export commonly used types
pub use engine_config::{
    load_config, EngineConfig, LoggingConfig, PoolDefaults, TradePolicyConfig,
};
