//! Constant-product (x*y=k) quoting with exact integer arithmetic
//!
//! Every function here is pure: it reads only its arguments, so previews can
//! be computed as often as callers like and a swap can re-derive the very same
//! numbers at commit time.

use crate::error::{AmmError, Result};
use crate::fee::FeeRate;
use crate::math::{checked_sub, mul_div_ceil, mul_div_floor, narrow, wide_mul, BPS_DENOMINATOR};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Which reserve a swap draws from.
///
/// Direction is a per-call parameter, never part of a pool's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapDirection {
    /// Pay asset A, receive asset B
    AToB,
    /// Pay asset B, receive asset A
    BToA,
}

impl SwapDirection {
    /// Order `(reserve_a, reserve_b)` as `(reserve_in, reserve_out)`
    pub fn orient(self, reserve_a: u64, reserve_b: u64) -> (u64, u64) {
        match self {
            SwapDirection::AToB => (reserve_a, reserve_b),
            SwapDirection::BToA => (reserve_b, reserve_a),
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            SwapDirection::AToB => SwapDirection::BToA,
            SwapDirection::BToA => SwapDirection::AToB,
        }
    }
}

/// Raw result of the swap formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub amount_out: u64,
    pub fee_amount: u64,
    pub amount_in_net: u64,
}

/// Caller-facing preview of a swap.
///
/// Valid only until the next mutation of the pool it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub amount_in: u64,
    pub amount_in_net: u64,
    pub amount_out: u64,
    pub fee_amount: u64,
    pub price_impact_bps: u64,
    pub price_impact_pct: Decimal,
    pub minimum_received: u64,
}

/// Constant-product formulas
pub struct ConstantProduct;

impl ConstantProduct {
    /// Output for an exact input.
    ///
    /// `fee = floor(amount_in * fee_rate)`, `net = amount_in - fee`,
    /// `amount_out = floor(net * reserve_out / (reserve_in + net))`.
    ///
    /// A zero `amount_out` is returned as-is; the executor rejects it.
    pub fn quote_swap(
        reserve_in: u64,
        reserve_out: u64,
        amount_in: u64,
        fee: FeeRate,
    ) -> Result<SwapQuote> {
        if amount_in == 0 {
            return Err(AmmError::ZeroAmount);
        }
        if reserve_in == 0 || reserve_out == 0 {
            return Err(AmmError::InsufficientReserves);
        }

        let fee_amount = fee.fee_on(amount_in)?;
        let amount_in_net = amount_in
            .checked_sub(fee_amount)
            .ok_or(AmmError::InvalidFee {
                numerator: fee.numerator(),
                denominator: fee.denominator(),
            })?;

        let numerator = wide_mul(amount_in_net, reserve_out);
        let denominator = reserve_in as u128 + amount_in_net as u128;
        let amount_out = narrow(numerator / denominator)?;

        // net / (reserve_in + net) < 1 whenever reserve_in > 0
        debug_assert!(amount_out < reserve_out);

        Ok(SwapQuote {
            amount_out,
            fee_amount,
            amount_in_net,
        })
    }

    /// Smallest input whose quoted output is at least `amount_out`.
    ///
    /// Both the pre-fee and the post-fee amounts are rounded up so the pool
    /// never delivers more than it is paid for.
    pub fn quote_input(
        amount_out: u64,
        reserve_in: u64,
        reserve_out: u64,
        fee: FeeRate,
    ) -> Result<u64> {
        if amount_out == 0 {
            return Err(AmmError::ZeroAmount);
        }
        if reserve_in == 0 || amount_out >= reserve_out {
            return Err(AmmError::InsufficientReserves);
        }

        let amount_in_net = mul_div_ceil(reserve_in, amount_out, reserve_out - amount_out)?;

        let denominator = fee.denominator() as u64;
        let kept = checked_sub(denominator, fee.numerator() as u64, "fee above 100%")?;
        mul_div_ceil(amount_in_net, denominator, kept)
    }

    /// Trade size relative to the input reserve, as a percentage capped at 100.
    ///
    /// Display value for the caller-side policy layer; the engine never
    /// rejects on it.
    pub fn price_impact(reserve_in: u64, amount_in: u64) -> Result<Decimal> {
        if reserve_in == 0 {
            return Err(AmmError::InsufficientReserves);
        }
        let pct = Decimal::from(amount_in) / Decimal::from(reserve_in) * dec!(100);
        Ok(pct.min(dec!(100)))
    }

    /// Integer form of [`Self::price_impact`] in basis points, capped at 10 000
    pub fn price_impact_bps(reserve_in: u64, amount_in: u64) -> Result<u64> {
        if reserve_in == 0 {
            return Err(AmmError::InsufficientReserves);
        }
        let bps = wide_mul(amount_in, BPS_DENOMINATOR) / reserve_in as u128;
        Ok(bps.min(BPS_DENOMINATOR as u128) as u64)
    }

    /// Marginal price of the input asset in units of the output asset
    pub fn spot_price(reserve_in: u64, reserve_out: u64) -> Result<Decimal> {
        if reserve_in == 0 || reserve_out == 0 {
            return Err(AmmError::InsufficientReserves);
        }
        Ok(Decimal::from(reserve_out) / Decimal::from(reserve_in))
    }

    /// `amount_out` reduced by a slippage tolerance in basis points, floored
    pub fn minimum_received(amount_out: u64, slippage_bps: u32) -> Result<u64> {
        let slippage = slippage_bps as u64;
        if slippage > BPS_DENOMINATOR {
            return Err(AmmError::InvalidSlippage(slippage_bps));
        }
        mul_div_floor(amount_out, BPS_DENOMINATOR - slippage, BPS_DENOMINATOR)
    }

    /// Full preview: formula output, fee, impact and slippage-adjusted minimum
    pub fn quote(
        reserve_in: u64,
        reserve_out: u64,
        amount_in: u64,
        fee: FeeRate,
        slippage_bps: u32,
    ) -> Result<Quote> {
        let swap = Self::quote_swap(reserve_in, reserve_out, amount_in, fee)?;
        Ok(Quote {
            amount_in,
            amount_in_net: swap.amount_in_net,
            amount_out: swap.amount_out,
            fee_amount: swap.fee_amount,
            price_impact_bps: Self::price_impact_bps(reserve_in, amount_in)?,
            price_impact_pct: Self::price_impact(reserve_in, amount_in)?,
            minimum_received: Self::minimum_received(swap.amount_out, slippage_bps)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_swap_reference_values() {
        let fee = FeeRate::new(30, 1000).unwrap();
        let quote = ConstantProduct::quote_swap(1000, 1000, 100, fee).unwrap();

        assert_eq!(quote.fee_amount, 3);
        assert_eq!(quote.amount_in_net, 97);
        assert_eq!(quote.amount_out, 88);
    }

    #[test]
    fn test_quote_swap_uneven_reserves() {
        // 100 in against 1000:2000 at 0.3%: net 100 (fee floors to 0)
        let quote = ConstantProduct::quote_swap(1000, 2000, 100, FeeRate::STANDARD).unwrap();
        assert_eq!(quote.fee_amount, 0);
        assert_eq!(quote.amount_out, 181);
    }

    #[test]
    fn test_quote_swap_rejects_bad_inputs() {
        assert_eq!(
            ConstantProduct::quote_swap(1000, 1000, 0, FeeRate::STANDARD),
            Err(AmmError::ZeroAmount)
        );
        assert_eq!(
            ConstantProduct::quote_swap(0, 1000, 10, FeeRate::STANDARD),
            Err(AmmError::InsufficientReserves)
        );
        assert_eq!(
            ConstantProduct::quote_swap(1000, 0, 10, FeeRate::STANDARD),
            Err(AmmError::InsufficientReserves)
        );
    }

    #[test]
    fn test_quote_swap_tiny_input_yields_zero() {
        let quote = ConstantProduct::quote_swap(1_000_000, 10, 1, FeeRate::ZERO).unwrap();
        assert_eq!(quote.amount_out, 0);
    }

    #[test]
    fn test_quote_swap_never_drains_output_reserve() {
        let quote = ConstantProduct::quote_swap(1, 1_000, u64::MAX, FeeRate::ZERO).unwrap();
        assert_eq!(quote.amount_out, 999);
    }

    #[test]
    fn test_direction_symmetry() {
        let (ra, rb) = (5_000u64, 12_000u64);
        let (rin, rout) = SwapDirection::BToA.orient(ra, rb);
        let via_direction = ConstantProduct::quote_swap(rin, rout, 700, FeeRate::HIGH).unwrap();
        let explicit = ConstantProduct::quote_swap(rb, ra, 700, FeeRate::HIGH).unwrap();
        assert_eq!(via_direction, explicit);
        assert_eq!(SwapDirection::AToB.reverse(), SwapDirection::BToA);
    }

    #[test]
    fn test_quote_input_covers_requested_output() {
        for (rin, rout, out) in [(1000u64, 1000u64, 88u64), (10_000, 3_000, 1), (5, 7, 6)] {
            for fee in [FeeRate::ZERO, FeeRate::STANDARD, FeeRate::HIGH] {
                let amount_in = ConstantProduct::quote_input(out, rin, rout, fee).unwrap();
                let quoted = ConstantProduct::quote_swap(rin, rout, amount_in, fee).unwrap();
                assert!(quoted.amount_out >= out, "{rin}/{rout} out={out} fee={fee}");
            }
        }
    }

    #[test]
    fn test_quote_input_rejects_draining() {
        assert_eq!(
            ConstantProduct::quote_input(1000, 1000, 1000, FeeRate::STANDARD),
            Err(AmmError::InsufficientReserves)
        );
        assert_eq!(
            ConstantProduct::quote_input(0, 1000, 1000, FeeRate::STANDARD),
            Err(AmmError::ZeroAmount)
        );
    }

    #[test]
    fn test_price_impact() {
        assert_eq!(ConstantProduct::price_impact(1000, 50).unwrap(), dec!(5));
        assert_eq!(ConstantProduct::price_impact(1000, 5000).unwrap(), dec!(100));
        assert_eq!(ConstantProduct::price_impact_bps(1000, 50).unwrap(), 500);
        assert_eq!(ConstantProduct::price_impact_bps(1000, 5000).unwrap(), 10_000);
    }

    #[test]
    fn test_spot_price() {
        assert_eq!(ConstantProduct::spot_price(1000, 2000).unwrap(), dec!(2));
    }

    #[test]
    fn test_minimum_received() {
        assert_eq!(ConstantProduct::minimum_received(88, 50).unwrap(), 87);
        assert_eq!(ConstantProduct::minimum_received(88, 0).unwrap(), 88);
        assert_eq!(ConstantProduct::minimum_received(88, 10_000).unwrap(), 0);
        assert_eq!(
            ConstantProduct::minimum_received(88, 10_001),
            Err(AmmError::InvalidSlippage(10_001))
        );
    }

    #[test]
    fn test_full_quote() {
        let fee = FeeRate::new(30, 1000).unwrap();
        let quote = ConstantProduct::quote(1000, 1000, 100, fee, 100).unwrap();
        assert_eq!(quote.amount_out, 88);
        assert_eq!(quote.fee_amount, 3);
        assert_eq!(quote.price_impact_bps, 1000);
        assert_eq!(quote.price_impact_pct, dec!(10));
        assert_eq!(quote.minimum_received, 87);
    }
}
