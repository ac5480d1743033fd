//! Constant-Product Quote Property Tests
//!
//! Arithmetic properties of the pure quoting functions that must hold for
//! any reserves, trade size and fee.

use amm::math::{geometric_mean, isqrt};
use amm::{ConstantProduct, FeeRate};
use proptest::prelude::*;

prop_compose! {
    fn valid_reserve()
        (reserve in 1u64..=u64::MAX) -> u64 {
        reserve
    }
}

prop_compose! {
    fn valid_fee()
        (denominator in 1u32..=1_000_000u32)
        (numerator in 0..denominator, denominator in Just(denominator)) -> FeeRate {
        FeeRate::new(numerator, denominator).unwrap()
    }
}

proptest! {
    /// Property: A swap can never drain the output reserve
    #[test]
    fn output_strictly_below_reserve(
        reserve_in in valid_reserve(),
        reserve_out in valid_reserve(),
        amount_in in 1u64..=u64::MAX,
        fee in valid_fee(),
    ) {
        let quote = ConstantProduct::quote_swap(reserve_in, reserve_out, amount_in, fee).unwrap();
        prop_assert!(quote.amount_out < reserve_out);
        prop_assert_eq!(quote.fee_amount + quote.amount_in_net, amount_in);
    }

    /// Property: The post-trade product never falls below the pre-trade product
    #[test]
    fn product_never_decreases(
        reserve_in in 1u64..=1u64 << 40,
        reserve_out in 1u64..=1u64 << 40,
        amount_in in 1u64..=1u64 << 40,
        fee in valid_fee(),
    ) {
        let quote = ConstantProduct::quote_swap(reserve_in, reserve_out, amount_in, fee).unwrap();
        let before = reserve_in as u128 * reserve_out as u128;
        let after = (reserve_in + amount_in) as u128 * (reserve_out - quote.amount_out) as u128;
        prop_assert!(after >= before);
        if quote.fee_amount > 0 {
            prop_assert!(after > before);
        }
    }

    /// Property: More input never yields less output
    #[test]
    fn output_monotone_in_input(
        reserve_in in valid_reserve(),
        reserve_out in valid_reserve(),
        amount_in in 1u64..u64::MAX,
    ) {
        let fee = FeeRate::STANDARD;
        let small = ConstantProduct::quote_swap(reserve_in, reserve_out, amount_in, fee).unwrap();
        let large = ConstantProduct::quote_swap(reserve_in, reserve_out, amount_in + 1, fee).unwrap();
        prop_assert!(large.amount_out >= small.amount_out);
    }

    /// Property: The exact-output quote buys at least the requested amount
    #[test]
    fn quote_input_is_sufficient(
        reserve_in in 1u64..=1u64 << 48,
        reserve_out in 2u64..=1u64 << 48,
        out_fraction in 1u64..10_000u64,
        fee in valid_fee(),
    ) {
        let amount_out = (reserve_out as u128 * out_fraction as u128 / 10_000) as u64;
        prop_assume!(amount_out > 0);
        let amount_in = ConstantProduct::quote_input(amount_out, reserve_in, reserve_out, fee);
        // Inputs beyond u64 are reported as overflow, not silently truncated
        if let Ok(amount_in) = amount_in {
            let quote = ConstantProduct::quote_swap(reserve_in, reserve_out, amount_in, fee).unwrap();
            prop_assert!(quote.amount_out >= amount_out);
        }
    }

    /// Property: isqrt is the floor square root
    #[test]
    fn isqrt_is_floor(value in any::<u128>()) {
        let root = isqrt(value);
        prop_assert!(root * root <= value);
        let next = root + 1;
        prop_assert!(next.checked_mul(next).map_or(true, |sq| sq > value));
    }

    /// Property: First-deposit issuance does not depend on asset order
    #[test]
    fn geometric_mean_is_symmetric(a in any::<u64>(), b in any::<u64>()) {
        prop_assert_eq!(geometric_mean(a, b), geometric_mean(b, a));
    }
}
