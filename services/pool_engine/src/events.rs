//! Committed-mutation events and sequence tracking
//!
//! Every successful mutation of a pool is stamped with the pool's next
//! sequence number. Creation is sequence 1, so a consumer that sees every
//! event of a pool observes 1, 2, 3, ... with no gaps.

use crate::error::{PoolError, Result};
use crate::types::{AccountId, PoolId};
use amm::SwapDirection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapReceipt {
    pub pool_id: PoolId,
    pub sequence: u64,
    pub direction: SwapDirection,
    pub amount_in: u64,
    pub amount_out: u64,
    pub fee_amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintReceipt {
    pub pool_id: PoolId,
    pub sequence: u64,
    pub provider: AccountId,
    pub amount_a: u64,
    pub amount_b: u64,
    pub shares_minted: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnReceipt {
    pub pool_id: PoolId,
    pub sequence: u64,
    pub provider: AccountId,
    pub shares_burned: u64,
    pub amount_a: u64,
    pub amount_b: u64,
}

/// Events that record a committed pool mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolEvent {
    Created(MintReceipt),
    Swap(SwapReceipt),
    Mint(MintReceipt),
    Burn(BurnReceipt),
}

impl PoolEvent {
    pub fn pool_id(&self) -> PoolId {
        match self {
            PoolEvent::Created(r) | PoolEvent::Mint(r) => r.pool_id,
            PoolEvent::Swap(r) => r.pool_id,
            PoolEvent::Burn(r) => r.pool_id,
        }
    }

    pub fn sequence(&self) -> u64 {
        match self {
            PoolEvent::Created(r) | PoolEvent::Mint(r) => r.sequence,
            PoolEvent::Swap(r) => r.sequence,
            PoolEvent::Burn(r) => r.sequence,
        }
    }
}

/// Follows one pool's event stream and flags a missed or repeated commit.
///
/// Keep one tracker per [`PoolId`]; sequences of different pools are
/// unrelated.
#[derive(Debug)]
pub struct SequenceTracker {
    next_expected: u64,
    last_processed: u64,
}

impl SequenceTracker {
    /// Tracker for a stream observed from the pool's creation event
    pub fn new() -> Self {
        Self {
            next_expected: 1,
            last_processed: 0,
        }
    }

    pub fn next_expected(&self) -> u64 {
        self.next_expected
    }

    pub fn last_sequence(&self) -> u64 {
        self.last_processed
    }

    /// Continue from a [`PoolSnapshot`](crate::pool::PoolSnapshot), whose
    /// `sequence` counts every commit it already reflects
    pub fn set_last_sequence(&mut self, sequence: u64) {
        self.last_processed = sequence;
        self.next_expected = sequence + 1;
    }

    /// Accept the next commit of the pool; anything else is a `SequenceGap`
    pub fn track(&mut self, sequence: u64) -> Result<()> {
        if sequence == self.next_expected {
            self.last_processed = sequence;
            self.next_expected += 1;
            Ok(())
        } else {
            Err(PoolError::SequenceGap {
                expected: self.next_expected,
                actual: sequence,
            })
        }
    }
}

impl Default for SequenceTracker {
    fn default() -> Self {
        Self::new()
    }
}
