//! Pool record and share positions
//!
//! A [`Pool`] is mutated only through the liquidity ledger
//! (`ledger.rs`) and the swap executor (`swap.rs`). Both compute the complete
//! next state first and assign it only after every check has passed, so a
//! failed call leaves the record untouched.

use crate::types::{AccountId, AssetId, PoolId};
use amm::{AmmError, AmmPool, FeeRate};
use config::PoolDefaults;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Informational running totals. Never read by the pricing formulas.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolCounters {
    pub cumulative_fee_a: u128,
    pub cumulative_fee_b: u128,
    pub cumulative_volume_a: u128,
    pub cumulative_volume_b: u128,
}

/// One holder's claim on a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePosition {
    pub pool_id: PoolId,
    pub owner: AccountId,
    pub share_amount: u64,
}

/// Persistent state of a single two-asset pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    pub(crate) id: PoolId,
    pub(crate) asset_a: AssetId,
    pub(crate) asset_b: AssetId,
    pub(crate) reserve_a: u64,
    pub(crate) reserve_b: u64,
    pub(crate) share_supply: u64,
    pub(crate) fee: FeeRate,
    pub(crate) counters: PoolCounters,
    /// Holder ledger; entries that reach zero are removed
    pub(crate) positions: BTreeMap<AccountId, u64>,
    /// Number of committed mutations, creation included
    pub(crate) sequence: u64,
}

/// Copy of a pool's numeric state, safe to hand out without holding a lock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub id: PoolId,
    pub asset_a: AssetId,
    pub asset_b: AssetId,
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub share_supply: u64,
    pub fee: FeeRate,
    pub counters: PoolCounters,
    pub holders: usize,
    pub sequence: u64,
}

impl Pool {
    pub fn id(&self) -> PoolId {
        self.id
    }

    pub fn assets(&self) -> (AssetId, AssetId) {
        (self.asset_a, self.asset_b)
    }

    pub fn share_supply(&self) -> u64 {
        self.share_supply
    }

    pub fn counters(&self) -> PoolCounters {
        self.counters
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// True once every share has been redeemed
    pub fn is_empty(&self) -> bool {
        self.share_supply == 0
    }

    pub fn share_balance(&self, owner: &AccountId) -> u64 {
        self.positions.get(owner).copied().unwrap_or(0)
    }

    pub fn position(&self, owner: &AccountId) -> Option<SharePosition> {
        self.positions.get(owner).map(|&share_amount| SharePosition {
            pool_id: self.id,
            owner: *owner,
            share_amount,
        })
    }

    pub fn positions(&self) -> impl Iterator<Item = SharePosition> + '_ {
        self.positions
            .iter()
            .map(move |(&owner, &share_amount)| SharePosition {
                pool_id: self.id,
                owner,
                share_amount,
            })
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            id: self.id,
            asset_a: self.asset_a,
            asset_b: self.asset_b,
            reserve_a: self.reserve_a,
            reserve_b: self.reserve_b,
            share_supply: self.share_supply,
            fee: self.fee,
            counters: self.counters,
            holders: self.positions.len(),
            sequence: self.sequence,
        }
    }

    /// Check the structural invariants of the record.
    ///
    /// - holder balances sum exactly to `share_supply`
    /// - a pool with shares outstanding has both reserves non-zero
    /// - an emptied pool holds no reserves
    pub fn verify(&self) -> Result<(), AmmError> {
        let held: u128 = self.positions.values().map(|&s| s as u128).sum();
        if held != self.share_supply as u128 {
            return Err(AmmError::InvariantViolation(
                "holder balances do not sum to share supply",
            ));
        }
        if self.share_supply > 0 && (self.reserve_a == 0 || self.reserve_b == 0) {
            return Err(AmmError::InvariantViolation(
                "live pool has an empty reserve",
            ));
        }
        if self.share_supply == 0 && (self.reserve_a != 0 || self.reserve_b != 0) {
            return Err(AmmError::InvariantViolation(
                "emptied pool still holds reserves",
            ));
        }
        Ok(())
    }

    pub(crate) fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }
}

impl AmmPool for Pool {
    fn reserves(&self) -> (u64, u64) {
        (self.reserve_a, self.reserve_b)
    }

    fn fee_rate(&self) -> FeeRate {
        self.fee
    }
}

impl AmmPool for PoolSnapshot {
    fn reserves(&self) -> (u64, u64) {
        (self.reserve_a, self.reserve_b)
    }

    fn fee_rate(&self) -> FeeRate {
        self.fee
    }
}

/// Fee rate configured for new pools
pub fn fee_from_defaults(defaults: &PoolDefaults) -> Result<FeeRate, AmmError> {
    FeeRate::new(defaults.fee_numerator, defaults.fee_denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pool() -> Pool {
        let alice = AccountId([0xa1; 20]);
        let bob = AccountId([0xb0; 20]);
        Pool {
            id: PoolId(1),
            asset_a: AssetId([1; 20]),
            asset_b: AssetId([2; 20]),
            reserve_a: 1000,
            reserve_b: 4000,
            share_supply: 2000,
            fee: FeeRate::STANDARD,
            counters: PoolCounters::default(),
            positions: BTreeMap::from([(alice, 1500), (bob, 500)]),
            sequence: 2,
        }
    }

    #[test]
    fn test_snapshot_mirrors_pool() {
        let pool = sample_pool();
        let snapshot = pool.snapshot();
        assert_eq!(snapshot.reserves(), (1000, 4000));
        assert_eq!(snapshot.share_supply, 2000);
        assert_eq!(snapshot.holders, 2);
        assert_eq!(snapshot.invariant_k(), pool.invariant_k());
    }

    #[test]
    fn test_positions_view() {
        let pool = sample_pool();
        let alice = AccountId([0xa1; 20]);
        assert_eq!(pool.share_balance(&alice), 1500);
        assert_eq!(pool.position(&alice).unwrap().share_amount, 1500);
        assert!(pool.position(&AccountId([0xff; 20])).is_none());
        assert_eq!(pool.positions().map(|p| p.share_amount).sum::<u64>(), 2000);
    }

    #[test]
    fn test_verify_detects_unbalanced_ledger() {
        let mut pool = sample_pool();
        pool.verify().unwrap();

        pool.share_supply += 1;
        assert!(matches!(
            pool.verify(),
            Err(AmmError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_decoded_snapshot_rejects_invalid_fee() {
        let mut value = serde_json::to_value(sample_pool().snapshot()).unwrap();
        let decoded: PoolSnapshot = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(decoded, sample_pool().snapshot());

        value["fee"] = serde_json::json!({ "numerator": 2000, "denominator": 1000 });
        assert!(serde_json::from_value::<PoolSnapshot>(value.clone()).is_err());

        value["fee"] = serde_json::json!({ "numerator": 0, "denominator": 0 });
        assert!(serde_json::from_value::<PoolSnapshot>(value).is_err());
    }

    #[test]
    fn test_fee_from_defaults() {
        let fee = fee_from_defaults(&PoolDefaults::default()).unwrap();
        assert_eq!(fee, FeeRate::STANDARD);

        let bad = PoolDefaults {
            fee_numerator: 10,
            fee_denominator: 10,
            ..PoolDefaults::default()
        };
        assert!(fee_from_defaults(&bad).is_err());
    }
}
