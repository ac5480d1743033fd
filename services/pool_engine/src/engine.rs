//! Pool Engine
//!
//! Single-writer host for every pool. Each pool lives behind its own
//! `RwLock`; a mutation holds the write lock across re-quote, checks and
//! commit, so mutations of one pool are totally ordered. Quotes copy a
//! snapshot under the read lock and compute without holding it.

use crate::error::{PoolError, Result};
use crate::events::{BurnReceipt, MintReceipt, PoolEvent, SwapReceipt};
use crate::policy::TradePolicy;
use crate::pool::{Pool, PoolSnapshot, SharePosition};
use crate::types::{AccountId, AssetId, AssetPair, PoolId};
use amm::{AmmError, AmmPool, FeeRate, Quote, SwapDirection};
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Callback receiving each committed event.
///
/// Runs while the pool's write lock is held. The lock is not re-entrant: a
/// sink that calls back into the engine for the same pool deadlocks.
pub type EventSink = Box<dyn Fn(&PoolEvent) + Send + Sync>;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub total_pools: usize,
    pub swaps: u64,
    pub deposits: u64,
    pub withdrawals: u64,
    pub rejected: u64,
}

/// Owns all pools and serializes mutations per pool
pub struct PoolEngine {
    pools: DashMap<PoolId, Arc<RwLock<Pool>>>,
    next_pool_id: AtomicU64,
    stats: RwLock<EngineStats>,
    event_sink: Option<EventSink>,
}

impl PoolEngine {
    pub fn new() -> Self {
        Self {
            pools: DashMap::new(),
            next_pool_id: AtomicU64::new(1),
            stats: RwLock::new(EngineStats::default()),
            event_sink: None,
        }
    }

    /// Engine that reports every committed mutation to `sink`.
    ///
    /// Events of one pool reach the sink in sequence order. The sink is called
    /// with that pool's write lock held, so it must not call back into the
    /// engine for the same pool (`snapshot`, `get_reserves`, any mutation);
    /// doing so deadlocks. Hand events off to a queue or buffer instead.
    pub fn with_event_sink<F>(sink: F) -> Self
    where
        F: Fn(&PoolEvent) + Send + Sync + 'static,
    {
        Self {
            event_sink: Some(Box::new(sink)),
            ..Self::new()
        }
    }

    /// Create and seed a new pool.
    ///
    /// Duplicates for the same pair are allowed; use
    /// [`PoolDirectory`](crate::directory::PoolDirectory) to deduplicate.
    pub fn create_pool(
        &self,
        creator: AccountId,
        asset_a: AssetId,
        asset_b: AssetId,
        amount_a: u64,
        amount_b: u64,
        fee: FeeRate,
    ) -> Result<(PoolId, u64)> {
        let created = AssetPair::new(asset_a, asset_b).and_then(|_| {
            if amount_a == 0 || amount_b == 0 {
                return Err(AmmError::ZeroAmount.into());
            }
            let pool_id = PoolId(self.next_pool_id.fetch_add(1, Ordering::SeqCst));
            Ok(Pool::create(pool_id, creator, asset_a, asset_b, amount_a, amount_b, fee)?)
        });
        let (pool, receipt) = match created {
            Ok(created) => created,
            Err(err) => {
                warn!("Pool creation for {} / {} rejected: {}", asset_a, asset_b, err);
                self.stats.write().rejected += 1;
                return Err(err);
            }
        };
        let pool_id = receipt.pool_id;
        let shares = receipt.shares_minted;
        let event = PoolEvent::Created(receipt);

        let pool = Arc::new(RwLock::new(pool));
        {
            // Publish only after the creation event is out so no other event
            // of this pool can precede it.
            let _guard = pool.write();
            self.pools.insert(pool_id, pool.clone());
            self.emit(&event);
        }

        self.record(&event);
        info!(
            "Created {} ({} / {}) fee {} with {} shares",
            pool_id, asset_a, asset_b, fee, shares
        );
        Ok((pool_id, shares))
    }

    /// Preview a swap against the current reserves
    pub fn quote_swap(
        &self,
        pool_id: PoolId,
        direction: SwapDirection,
        amount_in: u64,
        slippage_bps: u32,
    ) -> Result<Quote> {
        let snapshot = self.snapshot(pool_id)?;
        Ok(snapshot.quote(direction, amount_in, slippage_bps)?)
    }

    pub fn execute_swap(
        &self,
        pool_id: PoolId,
        direction: SwapDirection,
        amount_in: u64,
        min_amount_out: u64,
    ) -> Result<SwapReceipt> {
        self.commit(pool_id, "swap", |pool| {
            Ok(pool.execute_swap(direction, amount_in, min_amount_out)?)
        })
    }

    /// Swap after checking `policy` against the reserves the swap will
    /// execute on, inside the same critical section
    pub fn execute_swap_with_policy(
        &self,
        policy: &TradePolicy,
        pool_id: PoolId,
        direction: SwapDirection,
        amount_in: u64,
        min_amount_out: u64,
    ) -> Result<SwapReceipt> {
        self.commit(pool_id, "swap", |pool| {
            policy.check(&*pool, direction, amount_in)?;
            Ok(pool.execute_swap(direction, amount_in, min_amount_out)?)
        })
    }

    pub fn add_liquidity(
        &self,
        pool_id: PoolId,
        provider: AccountId,
        amount_a: u64,
        amount_b: u64,
        min_shares_out: u64,
    ) -> Result<MintReceipt> {
        self.commit(pool_id, "deposit", |pool| {
            Ok(pool.add_liquidity(provider, amount_a, amount_b, min_shares_out)?)
        })
    }

    pub fn remove_liquidity(
        &self,
        pool_id: PoolId,
        provider: AccountId,
        shares_in: u64,
        min_amount_a: u64,
        min_amount_b: u64,
    ) -> Result<BurnReceipt> {
        self.commit(pool_id, "withdrawal", |pool| {
            Ok(pool.remove_liquidity(provider, shares_in, min_amount_a, min_amount_b)?)
        })
    }

    pub fn get_reserves(&self, pool_id: PoolId) -> Result<(u64, u64)> {
        Ok(self.pool(pool_id)?.read().reserves())
    }

    pub fn get_share_supply(&self, pool_id: PoolId) -> Result<u64> {
        Ok(self.pool(pool_id)?.read().share_supply())
    }

    pub fn snapshot(&self, pool_id: PoolId) -> Result<PoolSnapshot> {
        Ok(self.pool(pool_id)?.read().snapshot())
    }

    pub fn share_position(
        &self,
        pool_id: PoolId,
        owner: &AccountId,
    ) -> Result<Option<SharePosition>> {
        Ok(self.pool(pool_id)?.read().position(owner))
    }

    pub fn pool_ids(&self) -> Vec<PoolId> {
        let mut ids: Vec<PoolId> = self.pools.iter().map(|entry| *entry.key()).collect();
        ids.sort();
        ids
    }

    pub fn stats(&self) -> EngineStats {
        self.stats.read().clone()
    }

    /// Clone the pool handle so the map shard is released before locking
    fn pool(&self, pool_id: PoolId) -> Result<Arc<RwLock<Pool>>> {
        self.pools
            .get(&pool_id)
            .map(|entry| entry.value().clone())
            .ok_or(PoolError::PoolNotFound(pool_id))
    }

    fn commit<R, F>(&self, pool_id: PoolId, operation: &'static str, apply: F) -> Result<R>
    where
        R: Into<PoolEvent> + Clone,
        F: FnOnce(&mut Pool) -> Result<R>,
    {
        let handle = self.pool(pool_id)?;
        let mut pool = handle.write();

        match apply(&mut *pool) {
            Ok(receipt) => {
                let event: PoolEvent = receipt.clone().into();
                debug!(
                    "{} {} committed at sequence {}",
                    pool_id,
                    operation,
                    event.sequence()
                );
                self.emit(&event);
                drop(pool);

                self.record(&event);
                Ok(receipt)
            }
            Err(err) => {
                drop(pool);
                warn!("{} {} rejected: {}", pool_id, operation, err);
                self.stats.write().rejected += 1;
                Err(err)
            }
        }
    }

    fn record(&self, event: &PoolEvent) {
        let mut stats = self.stats.write();
        match event {
            PoolEvent::Created(_) => stats.total_pools += 1,
            PoolEvent::Swap(_) => stats.swaps += 1,
            PoolEvent::Mint(_) => stats.deposits += 1,
            PoolEvent::Burn(_) => stats.withdrawals += 1,
        }
    }

    fn emit(&self, event: &PoolEvent) {
        if let Some(sink) = &self.event_sink {
            sink(event);
        }
    }
}

impl Default for PoolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl From<SwapReceipt> for PoolEvent {
    fn from(receipt: SwapReceipt) -> Self {
        PoolEvent::Swap(receipt)
    }
}

impl From<MintReceipt> for PoolEvent {
    fn from(receipt: MintReceipt) -> Self {
        PoolEvent::Mint(receipt)
    }
}

impl From<BurnReceipt> for PoolEvent {
    fn from(receipt: BurnReceipt) -> Self {
        PoolEvent::Burn(receipt)
    }
}
