//! Swap executor
//!
//! The only place reserves change because of trading. The quote is always
//! re-derived from the pool's current reserves; a caller-held preview is
//! never trusted, only its minimum-output bound is enforced.

use crate::events::SwapReceipt;
use crate::pool::Pool;
use amm::math::{checked_add, checked_sub, wide_mul};
use amm::{AmmError, AmmPool, ConstantProduct, Result, SwapDirection};

impl Pool {
    /// Swap `amount_in` of the input asset for at least `min_amount_out` of
    /// the other one.
    pub fn execute_swap(
        &mut self,
        direction: SwapDirection,
        amount_in: u64,
        min_amount_out: u64,
    ) -> Result<SwapReceipt> {
        let (reserve_in, reserve_out) = self.reserves_for(direction);
        let quote = ConstantProduct::quote_swap(reserve_in, reserve_out, amount_in, self.fee)?;

        if quote.amount_out == 0 {
            return Err(AmmError::InsufficientOutputAmount);
        }
        if quote.amount_out < min_amount_out {
            return Err(AmmError::SlippageExceeded {
                minimum: min_amount_out,
                actual: quote.amount_out,
            });
        }

        let new_reserve_in = checked_add(reserve_in, amount_in, "input reserve")?;
        let new_reserve_out = checked_sub(reserve_out, quote.amount_out, "output reserve")?;

        if wide_mul(new_reserve_in, new_reserve_out) < wide_mul(reserve_in, reserve_out) {
            return Err(AmmError::InvariantViolation("swap decreased k"));
        }

        let fee = quote.fee_amount as u128;
        let volume = amount_in as u128;
        match direction {
            SwapDirection::AToB => {
                self.reserve_a = new_reserve_in;
                self.reserve_b = new_reserve_out;
                self.counters.cumulative_fee_a = self.counters.cumulative_fee_a.saturating_add(fee);
                self.counters.cumulative_volume_a =
                    self.counters.cumulative_volume_a.saturating_add(volume);
            }
            SwapDirection::BToA => {
                self.reserve_b = new_reserve_in;
                self.reserve_a = new_reserve_out;
                self.counters.cumulative_fee_b = self.counters.cumulative_fee_b.saturating_add(fee);
                self.counters.cumulative_volume_b =
                    self.counters.cumulative_volume_b.saturating_add(volume);
            }
        }

        let sequence = self.next_sequence();

        Ok(SwapReceipt {
            pool_id: self.id,
            sequence,
            direction,
            amount_in,
            amount_out: quote.amount_out,
            fee_amount: quote.fee_amount,
        })
    }
}
