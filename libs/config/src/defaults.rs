//! Default configuration values
//!
//! Every default here can be overridden by a config file or a
//! `RESERVOIR__` environment variable.

/// Pool creation defaults
pub mod pool {
    /// 3/1000 = 0.3%
    pub const FEE_NUMERATOR: u32 = 3;
    pub const FEE_DENOMINATOR: u32 = 1000;

    /// Slippage tolerance applied to previews when the caller supplies none
    pub const DEFAULT_SLIPPAGE_BPS: u32 = 50;
}

/// Caller-side trade policy defaults
pub mod policy {
    /// Reject trades whose size exceeds 5% of the input reserve
    pub const MAX_PRICE_IMPACT_BPS: u32 = 500;

    /// Never accept an input larger than 90% of the input reserve
    pub const MAX_INPUT_RESERVE_BPS: u32 = 9_000;
}

/// Logging defaults
pub mod logging {
    pub const LEVEL: &str = "info";
    pub const JSON: bool = false;
}

/// Environment variable prefix for overrides (`RESERVOIR__POLICY__MAX_PRICE_IMPACT_BPS`)
pub const ENV_PREFIX: &str = "RESERVOIR";

/// Nested-key separator for environment overrides
pub const ENV_SEPARATOR: &str = "__";

/// Directory searched for `<environment>.toml` overlays
pub const ENVIRONMENTS_DIR: &str = "config/environments";
