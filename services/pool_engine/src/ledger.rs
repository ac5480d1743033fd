//! Liquidity ledger: share issuance and redemption
//!
//! - First deposit (empty pool): `isqrt(amount_a * amount_b)` shares.
//! - Later deposits: `min(a * supply / reserve_a, b * supply / reserve_b)`.
//!   The unmatched part of an imbalanced deposit stays in the pool.
//! - Withdrawal: `reserve_x * shares / supply` of each asset, multiply first
//!   with a `u128` intermediate so only one floor is taken.

use crate::events::{BurnReceipt, MintReceipt};
use crate::pool::{Pool, PoolCounters};
use crate::types::{AccountId, AssetId, PoolId};
use amm::math::{checked_add, checked_sub, geometric_mean, mul_div_floor};
use amm::{AmmError, FeeRate, Result};
use std::collections::BTreeMap;

/// Shares minted for depositing `(amount_a, amount_b)`
pub fn shares_for_deposit(
    reserve_a: u64,
    reserve_b: u64,
    share_supply: u64,
    amount_a: u64,
    amount_b: u64,
) -> Result<u64> {
    if amount_a == 0 || amount_b == 0 {
        return Err(AmmError::ZeroAmount);
    }
    if share_supply == 0 {
        return Ok(geometric_mean(amount_a, amount_b));
    }
    if reserve_a == 0 || reserve_b == 0 {
        return Err(AmmError::InsufficientReserves);
    }

    let from_a = mul_div_floor(amount_a, share_supply, reserve_a)?;
    let from_b = mul_div_floor(amount_b, share_supply, reserve_b)?;
    Ok(from_a.min(from_b))
}

/// Asset amounts released by burning `shares` out of `share_supply`
pub fn amounts_for_burn(
    reserve_a: u64,
    reserve_b: u64,
    share_supply: u64,
    shares: u64,
) -> Result<(u64, u64)> {
    if shares == 0 {
        return Err(AmmError::ZeroAmount);
    }
    if shares > share_supply {
        return Err(AmmError::InsufficientShares {
            requested: shares,
            held: share_supply,
        });
    }
    let amount_a = mul_div_floor(reserve_a, shares, share_supply)?;
    let amount_b = mul_div_floor(reserve_b, shares, share_supply)?;
    Ok((amount_a, amount_b))
}

impl Pool {
    /// Create a pool seeded with `(amount_a, amount_b)` from `creator`.
    ///
    /// The engine keeps no registry here: asking twice for the same pair
    /// yields two independent pools.
    pub fn create(
        id: PoolId,
        creator: AccountId,
        asset_a: AssetId,
        asset_b: AssetId,
        amount_a: u64,
        amount_b: u64,
        fee: FeeRate,
    ) -> Result<(Self, MintReceipt)> {
        let mut pool = Pool {
            id,
            asset_a,
            asset_b,
            reserve_a: 0,
            reserve_b: 0,
            share_supply: 0,
            fee,
            counters: PoolCounters::default(),
            positions: BTreeMap::new(),
            sequence: 0,
        };
        let receipt = pool.add_liquidity(creator, amount_a, amount_b, 0)?;
        Ok((pool, receipt))
    }

    /// Deposit both assets and credit `provider` with the minted shares.
    ///
    /// On an emptied pool this re-seeds it with the first-deposit rule.
    pub fn add_liquidity(
        &mut self,
        provider: AccountId,
        amount_a: u64,
        amount_b: u64,
        min_shares_out: u64,
    ) -> Result<MintReceipt> {
        let shares_minted = shares_for_deposit(
            self.reserve_a,
            self.reserve_b,
            self.share_supply,
            amount_a,
            amount_b,
        )?;
        if shares_minted == 0 {
            return Err(AmmError::InsufficientLiquidityMinted);
        }
        if shares_minted < min_shares_out {
            return Err(AmmError::SlippageExceeded {
                minimum: min_shares_out,
                actual: shares_minted,
            });
        }

        let reserve_a = checked_add(self.reserve_a, amount_a, "reserve A")?;
        let reserve_b = checked_add(self.reserve_b, amount_b, "reserve B")?;
        let share_supply = checked_add(self.share_supply, shares_minted, "share supply")?;
        let balance = checked_add(self.share_balance(&provider), shares_minted, "position")?;

        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.share_supply = share_supply;
        self.positions.insert(provider, balance);

        let sequence = self.next_sequence();
        debug_assert!(self.verify().is_ok());

        Ok(MintReceipt {
            pool_id: self.id,
            sequence,
            provider,
            amount_a,
            amount_b,
            shares_minted,
        })
    }

    /// Burn `shares_in` of `provider`'s position for a proportional slice of
    /// both reserves.
    ///
    /// Burning the whole supply returns the entire reserves and leaves the
    /// pool empty but still present.
    pub fn remove_liquidity(
        &mut self,
        provider: AccountId,
        shares_in: u64,
        min_amount_a: u64,
        min_amount_b: u64,
    ) -> Result<BurnReceipt> {
        if shares_in == 0 {
            return Err(AmmError::ZeroAmount);
        }
        let held = self.share_balance(&provider);
        if shares_in > held {
            return Err(AmmError::InsufficientShares {
                requested: shares_in,
                held,
            });
        }

        let (amount_a, amount_b) =
            amounts_for_burn(self.reserve_a, self.reserve_b, self.share_supply, shares_in)?;
        if amount_a == 0 && amount_b == 0 {
            return Err(AmmError::InsufficientOutputAmount);
        }
        if amount_a < min_amount_a {
            return Err(AmmError::SlippageExceeded {
                minimum: min_amount_a,
                actual: amount_a,
            });
        }
        if amount_b < min_amount_b {
            return Err(AmmError::SlippageExceeded {
                minimum: min_amount_b,
                actual: amount_b,
            });
        }

        let reserve_a = checked_sub(self.reserve_a, amount_a, "reserve A")?;
        let reserve_b = checked_sub(self.reserve_b, amount_b, "reserve B")?;
        let share_supply = checked_sub(self.share_supply, shares_in, "share supply")?;
        let remaining = held - shares_in;

        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.share_supply = share_supply;
        if remaining == 0 {
            self.positions.remove(&provider);
        } else {
            self.positions.insert(provider, remaining);
        }

        let sequence = self.next_sequence();
        debug_assert!(self.verify().is_ok());

        Ok(BurnReceipt {
            pool_id: self.id,
            sequence,
            provider,
            shares_burned: shares_in,
            amount_a,
            amount_b,
        })
    }
}
