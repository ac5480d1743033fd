//! Pool trait definitions for a unified quoting interface

use crate::{ConstantProduct, FeeRate, Quote, Result, SwapDirection, SwapQuote};

/// Read-only view of a two-asset constant-product pool.
///
/// Implementors only expose reserves and the fee; quoting is provided on top
/// so that the pool record and any copied snapshot of it price identically.
pub trait AmmPool {
    /// Current `(reserve_a, reserve_b)`
    fn reserves(&self) -> (u64, u64);

    /// Fee charged on swap inputs
    fn fee_rate(&self) -> FeeRate;

    /// `(reserve_in, reserve_out)` for a swap in `direction`
    fn reserves_for(&self, direction: SwapDirection) -> (u64, u64) {
        let (reserve_a, reserve_b) = self.reserves();
        direction.orient(reserve_a, reserve_b)
    }

    /// Output for an exact input
    fn get_amount_out(&self, direction: SwapDirection, amount_in: u64) -> Result<SwapQuote> {
        let (reserve_in, reserve_out) = self.reserves_for(direction);
        ConstantProduct::quote_swap(reserve_in, reserve_out, amount_in, self.fee_rate())
    }

    /// Input required for an exact output
    fn get_amount_in(&self, direction: SwapDirection, amount_out: u64) -> Result<u64> {
        let (reserve_in, reserve_out) = self.reserves_for(direction);
        ConstantProduct::quote_input(amount_out, reserve_in, reserve_out, self.fee_rate())
    }

    /// Full preview including price impact and slippage-adjusted minimum
    fn quote(&self, direction: SwapDirection, amount_in: u64, slippage_bps: u32) -> Result<Quote> {
        let (reserve_in, reserve_out) = self.reserves_for(direction);
        ConstantProduct::quote(
            reserve_in,
            reserve_out,
            amount_in,
            self.fee_rate(),
            slippage_bps,
        )
    }

    /// `reserve_a * reserve_b`
    fn invariant_k(&self) -> u128 {
        let (reserve_a, reserve_b) = self.reserves();
        reserve_a as u128 * reserve_b as u128
    }
}

/// Bare reserves plus fee, for quoting without a pool record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservePair {
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub fee: FeeRate,
}

impl AmmPool for ReservePair {
    fn reserves(&self) -> (u64, u64) {
        (self.reserve_a, self.reserve_b)
    }

    fn fee_rate(&self) -> FeeRate {
        self.fee
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_pair_quotes_both_directions() {
        let pair = ReservePair {
            reserve_a: 1000,
            reserve_b: 4000,
            fee: FeeRate::ZERO,
        };

        let a_to_b = pair.get_amount_out(SwapDirection::AToB, 100).unwrap();
        let b_to_a = pair.get_amount_out(SwapDirection::BToA, 100).unwrap();

        // 100 * 4000 / 1100 and 100 * 1000 / 4100
        assert_eq!(a_to_b.amount_out, 363);
        assert_eq!(b_to_a.amount_out, 24);
        assert_eq!(pair.invariant_k(), 4_000_000);
    }

    #[test]
    fn test_get_amount_in_round_trips() {
        let pair = ReservePair {
            reserve_a: 50_000,
            reserve_b: 20_000,
            fee: FeeRate::STANDARD,
        };
        let needed = pair.get_amount_in(SwapDirection::AToB, 1_000).unwrap();
        let out = pair.get_amount_out(SwapDirection::AToB, needed).unwrap();
        assert!(out.amount_out >= 1_000);
    }
}
