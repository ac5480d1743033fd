//! Pool directory
//!
//! Routing index from an unordered asset pair and fee tier to the pool that
//! serves it. The engine itself allows several pools per pair; the directory
//! is where a venue enforces one pool per `(pair, fee)`.

use crate::error::{PoolError, Result};
use crate::pool::PoolSnapshot;
use crate::types::{AssetId, AssetPair, PoolId};
use amm::{FeeRate, SwapDirection};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DirectoryEntry {
    pool_id: PoolId,
    /// Orientation of the registered pool
    asset_a: AssetId,
}

/// Where to send a trade and which way round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolRoute {
    pub pool_id: PoolId,
    pub direction: SwapDirection,
}

#[derive(Debug, Default)]
pub struct PoolDirectory {
    entries: DashMap<(AssetPair, FeeRate), DirectoryEntry>,
}

impl PoolDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `pool_id` as the pool for `(asset_a, asset_b)` at `fee`
    pub fn register(
        &self,
        pool_id: PoolId,
        asset_a: AssetId,
        asset_b: AssetId,
        fee: FeeRate,
    ) -> Result<()> {
        let pair = AssetPair::new(asset_a, asset_b)?;
        match self.entries.entry((pair, fee)) {
            Entry::Occupied(existing) => Err(PoolError::DuplicatePool {
                existing: existing.get().pool_id,
            }),
            Entry::Vacant(slot) => {
                slot.insert(DirectoryEntry { pool_id, asset_a });
                debug!("Registered {} for {} / {} at {}", pool_id, asset_a, asset_b, fee);
                Ok(())
            }
        }
    }

    pub fn register_snapshot(&self, snapshot: &PoolSnapshot) -> Result<()> {
        self.register(snapshot.id, snapshot.asset_a, snapshot.asset_b, snapshot.fee)
    }

    /// Route a trade paying `from` and receiving `to`
    pub fn lookup(&self, from: AssetId, to: AssetId, fee: FeeRate) -> Option<PoolRoute> {
        let pair = AssetPair::new(from, to).ok()?;
        self.entries.get(&(pair, fee)).map(|entry| PoolRoute {
            pool_id: entry.pool_id,
            direction: if entry.asset_a == from {
                SwapDirection::AToB
            } else {
                SwapDirection::BToA
            },
        })
    }

    /// Every registered pool for the pair, across fee tiers
    pub fn pools_for_pair(&self, x: AssetId, y: AssetId) -> Vec<(FeeRate, PoolId)> {
        let Ok(pair) = AssetPair::new(x, y) else {
            return Vec::new();
        };
        let mut pools: Vec<(FeeRate, PoolId)> = self
            .entries
            .iter()
            .filter(|entry| entry.key().0 == pair)
            .map(|entry| (entry.key().1, entry.value().pool_id))
            .collect();
        pools.sort_by_key(|&(_, pool_id)| pool_id);
        pools
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
