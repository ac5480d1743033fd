//! Caller-side trade guards
//!
//! The pool accepts any trade that satisfies the constant-product rules.
//! [`TradePolicy`] adds limits a venue may want on top: a ceiling on price
//! impact and on trade size relative to the input reserve.

use crate::error::{PoolError, Result};
use amm::math::{wide_mul, BPS_DENOMINATOR};
use amm::{AmmPool, ConstantProduct, SwapDirection};
use config::TradePolicyConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradePolicy {
    /// Highest accepted price impact in basis points (inclusive)
    pub max_price_impact_bps: u64,
    /// Highest accepted `amount_in / reserve_in` in basis points (inclusive)
    pub max_input_reserve_bps: u64,
}

impl TradePolicy {
    pub fn new(max_price_impact_bps: u64, max_input_reserve_bps: u64) -> Self {
        Self {
            max_price_impact_bps,
            max_input_reserve_bps,
        }
    }

    pub fn from_config(config: &TradePolicyConfig) -> Self {
        Self::new(
            u64::from(config.max_price_impact_bps),
            u64::from(config.max_input_reserve_bps),
        )
    }

    /// Accepts every trade the pool itself accepts
    pub fn permissive() -> Self {
        Self::new(BPS_DENOMINATOR, BPS_DENOMINATOR)
    }

    /// Reject the trade if it breaches a limit. A trade exactly at a limit passes.
    pub fn check<P: AmmPool>(
        &self,
        pool: &P,
        direction: SwapDirection,
        amount_in: u64,
    ) -> Result<()> {
        let (reserve_in, _) = pool.reserves_for(direction);
        let impact_bps = ConstantProduct::price_impact_bps(reserve_in, amount_in)?;
        if impact_bps > self.max_price_impact_bps {
            return Err(PoolError::PolicyRejected {
                reason: format!(
                    "price impact {} bps exceeds limit {} bps",
                    impact_bps, self.max_price_impact_bps
                ),
            });
        }

        // Exact comparison; the impact figure saturates at 100%
        let limit = wide_mul(reserve_in, self.max_input_reserve_bps);
        if wide_mul(amount_in, BPS_DENOMINATOR) > limit {
            return Err(PoolError::PolicyRejected {
                reason: format!(
                    "trade of {} exceeds {} bps of input reserve {}",
                    amount_in, self.max_input_reserve_bps, reserve_in
                ),
            });
        }

        Ok(())
    }
}

impl Default for TradePolicy {
    fn default() -> Self {
        Self::from_config(&TradePolicyConfig::default())
    }
}
