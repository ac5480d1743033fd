//! # Reservoir Pool Engine - Constant-Product Liquidity Pools
//!
//! ## Purpose
//!
//! Hosts two-asset constant-product pools: creation, liquidity deposits and
//! withdrawals against fungible pool shares, and fee-charging swaps. Every
//! mutation is all-or-nothing and re-derives its quote from the reserves it
//! commits against.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Caller trade and liquidity requests, `EngineConfig` defaults
//! - **Output Destinations**: Receipts to callers, `PoolEvent`s to an optional sink
//! - **Math**: `amm` crate formulas with `u128` intermediates
//! - **Routing**: `PoolDirectory` maps an unordered pair and fee tier to a pool
//! - **Guards**: `TradePolicy` caps price impact and trade size before a swap commits
//!
//! ## Architecture Role
//!
//! ```text
//! Caller → [PoolEngine] → Arc<RwLock<Pool>> → [Ledger | Swap Executor] → Receipt
//!              ↓                                          ↓
//!        Read snapshot → Quote                      PoolEvent → Sink
//! ```
//!
//! ## Concurrency
//!
//! One lock per pool. Mutations hold the write lock across re-quote, checks
//! and commit, so the per-pool sequence numbers carried by events are gap-free
//! and match commit order. Different pools never contend.

pub mod directory;
pub mod engine;
pub mod error;
pub mod events;
pub mod ledger;
pub mod logging;
pub mod policy;
pub mod pool;
pub mod swap;
pub mod types;

pub use directory::{PoolDirectory, PoolRoute};
pub use engine::{EngineStats, EventSink, PoolEngine};
pub use error::{PoolError, Result};
pub use events::{BurnReceipt, MintReceipt, PoolEvent, SequenceTracker, SwapReceipt};
pub use policy::TradePolicy;
pub use pool::{fee_from_defaults, Pool, PoolCounters, PoolSnapshot, SharePosition};
pub use types::{AccountId, AssetId, AssetPair, PoolId};

pub use amm::{AmmError, AmmPool, FeeRate, Quote, SwapDirection};
