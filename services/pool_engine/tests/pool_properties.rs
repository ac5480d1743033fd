//! Pool Lifecycle Property Tests
//!
//! Invariants of swaps and share accounting that must hold for any pool
//! and any sequence of accepted operations.

use pool_engine::{AccountId, AmmPool, AssetId, FeeRate, Pool, PoolId, SwapDirection};
use proptest::prelude::*;

const CREATOR: AccountId = AccountId([0xa1; 20]);
const PROVIDER: AccountId = AccountId([0xb0; 20]);

fn new_pool(amount_a: u64, amount_b: u64, fee: FeeRate) -> Pool {
    Pool::create(
        PoolId(1),
        CREATOR,
        AssetId([1; 20]),
        AssetId([2; 20]),
        amount_a,
        amount_b,
        fee,
    )
    .unwrap()
    .0
}

prop_compose! {
    fn valid_reserve()
        (reserve in 1_000u64..10_000_000_000u64) -> u64 {
        reserve
    }
}

prop_compose! {
    fn charged_fee()
        (numerator in 1u32..100u32) -> FeeRate {
        FeeRate::new(numerator, 1000).unwrap()
    }
}

fn direction() -> impl Strategy<Value = SwapDirection> {
    prop_oneof![Just(SwapDirection::AToB), Just(SwapDirection::BToA)]
}

proptest! {
    /// Property: k never decreases across a sequence of swaps, and strictly
    /// grows whenever a fee is charged
    #[test]
    fn swaps_preserve_k(
        reserve_a in valid_reserve(),
        reserve_b in valid_reserve(),
        fee in charged_fee(),
        trades in prop::collection::vec((direction(), 1u64..1_000_000_000u64), 1..20),
    ) {
        let mut pool = new_pool(reserve_a, reserve_b, fee);
        for (direction, amount_in) in trades {
            let k_before = pool.invariant_k();
            if let Ok(receipt) = pool.execute_swap(direction, amount_in, 0) {
                let k_after = pool.invariant_k();
                prop_assert!(k_after >= k_before);
                if receipt.fee_amount > 0 {
                    prop_assert!(k_after > k_before);
                }
            }
        }
        prop_assert!(pool.verify().is_ok());
    }

    /// Property: Swapping there and back loses value when a fee is charged
    #[test]
    fn round_trip_loses_to_fees(
        reserve_a in valid_reserve(),
        reserve_b in valid_reserve(),
        fee in charged_fee(),
        amount_in in 1_000u64..1_000_000_000u64,
    ) {
        let mut pool = new_pool(reserve_a, reserve_b, fee);
        let there = pool.execute_swap(SwapDirection::AToB, amount_in, 0);
        prop_assume!(there.is_ok());
        let there = there.unwrap();
        prop_assume!(there.fee_amount > 0);

        if let Ok(back) = pool.execute_swap(SwapDirection::BToA, there.amount_out, 0) {
            prop_assert!(back.amount_out < amount_in);
        }
    }

    /// Property: First-deposit issuance is symmetric in the two amounts
    #[test]
    fn first_deposit_symmetric(a in 1u64..=u64::MAX, b in 1u64..=u64::MAX) {
        let ab = new_pool(a, b, FeeRate::STANDARD);
        let ba = new_pool(b, a, FeeRate::STANDARD);
        prop_assert_eq!(ab.share_supply(), ba.share_supply());
        prop_assert!(ab.share_supply() > 0);
    }

    /// Property: Burning the whole supply returns exactly the reserves
    #[test]
    fn full_withdrawal_is_exact(
        reserve_a in valid_reserve(),
        reserve_b in valid_reserve(),
        trades in prop::collection::vec((direction(), 1u64..100_000_000u64), 0..10),
    ) {
        let mut pool = new_pool(reserve_a, reserve_b, FeeRate::STANDARD);
        for (direction, amount_in) in trades {
            let _ = pool.execute_swap(direction, amount_in, 0);
        }
        let (final_a, final_b) = pool.reserves();
        let supply = pool.share_supply();

        let burn = pool.remove_liquidity(CREATOR, supply, 0, 0).unwrap();
        prop_assert_eq!((burn.amount_a, burn.amount_b), (final_a, final_b));
        prop_assert_eq!(pool.reserves(), (0, 0));
        prop_assert!(pool.is_empty());
        prop_assert!(pool.verify().is_ok());
    }

    /// Property: Depositing and immediately withdrawing never pays out more
    /// than was put in
    #[test]
    fn deposit_withdraw_never_profits(
        reserve_a in valid_reserve(),
        reserve_b in valid_reserve(),
        amount_a in 1u64..1_000_000_000u64,
        amount_b in 1u64..1_000_000_000u64,
    ) {
        let mut pool = new_pool(reserve_a, reserve_b, FeeRate::STANDARD);
        let minted = pool.add_liquidity(PROVIDER, amount_a, amount_b, 0);
        prop_assume!(minted.is_ok());
        let shares = minted.unwrap().shares_minted;

        if let Ok(burn) = pool.remove_liquidity(PROVIDER, shares, 0, 0) {
            prop_assert!(burn.amount_a <= amount_a);
            prop_assert!(burn.amount_b <= amount_b);
        }
        prop_assert!(pool.verify().is_ok());
    }
}
