//! Exact unsigned integer arithmetic for reserves and shares
//!
//! Reserves and share balances are `u64`. Every product of two of them is
//! taken in `u128`, which holds any `u64 * u64` exactly, so multiply-before-
//! divide never overflows and floors only once.

use crate::error::{AmmError, Result};

/// Basis-point denominator (10 000 bps = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

pub fn checked_add(a: u64, b: u64, what: &'static str) -> Result<u64> {
    a.checked_add(b).ok_or(AmmError::Overflow(what))
}

pub fn checked_sub(a: u64, b: u64, what: &'static str) -> Result<u64> {
    a.checked_sub(b).ok_or(AmmError::Overflow(what))
}

/// Full-width product of two `u64` values
#[inline]
pub fn wide_mul(a: u64, b: u64) -> u128 {
    a as u128 * b as u128
}

/// `floor(a * b / denominator)` with a `u128` intermediate.
///
/// Fails when `denominator` is zero or the quotient does not fit in `u64`.
pub fn mul_div_floor(a: u64, b: u64, denominator: u64) -> Result<u64> {
    if denominator == 0 {
        return Err(AmmError::Overflow("division by zero"));
    }
    narrow(wide_mul(a, b) / denominator as u128)
}

/// `ceil(a * b / denominator)` with a `u128` intermediate.
pub fn mul_div_ceil(a: u64, b: u64, denominator: u64) -> Result<u64> {
    if denominator == 0 {
        return Err(AmmError::Overflow("division by zero"));
    }
    let numerator = wide_mul(a, b);
    let d = denominator as u128;
    let quotient = numerator / d;
    let rounded = if numerator % d == 0 {
        quotient
    } else {
        quotient + 1
    };
    narrow(rounded)
}

/// Narrow a `u128` result back to the `u64` reserve width
pub fn narrow(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| AmmError::Overflow("result exceeds u64"))
}

/// Integer square root: the largest `r` with `r * r <= n`.
///
/// Newton's iteration starting above the root; it decreases monotonically
/// and stops at the floor.
pub fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }

    // 2^ceil(bits/2) is always >= sqrt(n)
    let bits = 128 - n.leading_zeros();
    let mut x = 1u128 << bits.div_ceil(2);
    loop {
        let y = (x + n / x) >> 1;
        if y >= x {
            return x;
        }
        x = y;
    }
}

/// Geometric mean `floor(sqrt(a * b))`, used for first-deposit share issuance.
///
/// The root of a product of two `u64` values always fits in `u64`.
pub fn geometric_mean(a: u64, b: u64) -> u64 {
    isqrt(wide_mul(a, b)) as u64
}
