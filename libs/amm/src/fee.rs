//! Swap fee rates expressed as an exact fraction

use crate::error::{AmmError, Result};
use crate::math::{mul_div_floor, BPS_DENOMINATOR};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fee charged on the input side of a swap, as `numerator / denominator`.
///
/// Deployments use different denominators (3/1000, 18/1000), so the rate is
/// kept as a fraction rather than normalised to one universal unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFeeRate")]
pub struct FeeRate {
    numerator: u32,
    denominator: u32,
}

impl FeeRate {
    /// 0.3%
    pub const STANDARD: FeeRate = FeeRate {
        numerator: 3,
        denominator: 1000,
    };

    /// 1.8%
    pub const HIGH: FeeRate = FeeRate {
        numerator: 18,
        denominator: 1000,
    };

    pub const ZERO: FeeRate = FeeRate {
        numerator: 0,
        denominator: 1,
    };

    /// Build a fee rate, rejecting a zero denominator or a rate of 100% or more
    pub fn new(numerator: u32, denominator: u32) -> Result<Self> {
        if denominator == 0 || numerator >= denominator {
            return Err(AmmError::InvalidFee {
                numerator,
                denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// `floor(amount * numerator / denominator)`
    pub fn fee_on(&self, amount: u64) -> Result<u64> {
        mul_div_floor(amount, self.numerator as u64, self.denominator as u64)
    }

    /// Rate in basis points, floored. Display only; the formulas use the fraction.
    pub fn as_bps(&self) -> u64 {
        (self.numerator as u64 * BPS_DENOMINATOR)
            .checked_div(self.denominator as u64)
            .unwrap_or(0)
    }
}

/// Unchecked wire form; decoding goes through [`FeeRate::new`]
#[derive(Deserialize)]
struct RawFeeRate {
    numerator: u32,
    denominator: u32,
}

impl TryFrom<RawFeeRate> for FeeRate {
    type Error = AmmError;

    fn try_from(raw: RawFeeRate) -> Result<Self> {
        FeeRate::new(raw.numerator, raw.denominator)
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_validation() {
        assert!(FeeRate::new(3, 1000).is_ok());
        assert!(FeeRate::new(0, 1000).is_ok());
        assert_eq!(
            FeeRate::new(1, 0),
            Err(AmmError::InvalidFee {
                numerator: 1,
                denominator: 0
            })
        );
        assert!(FeeRate::new(1000, 1000).is_err());
    }

    #[test]
    fn test_fee_is_floored() {
        let fee = FeeRate::new(30, 1000).unwrap();
        assert_eq!(fee.fee_on(100).unwrap(), 3);
        assert_eq!(FeeRate::STANDARD.fee_on(333).unwrap(), 0);
        assert_eq!(FeeRate::STANDARD.fee_on(334).unwrap(), 1);
    }

    #[test]
    fn test_bps_and_display() {
        assert_eq!(FeeRate::STANDARD.as_bps(), 30);
        assert_eq!(FeeRate::HIGH.as_bps(), 180);
        assert_eq!(FeeRate::HIGH.to_string(), "18/1000");
    }

    #[test]
    fn test_decoding_validates_the_fraction() {
        let fee: FeeRate = serde_json::from_str(r#"{"numerator":18,"denominator":1000}"#).unwrap();
        assert_eq!(fee, FeeRate::HIGH);

        for bad in [
            r#"{"numerator":2000,"denominator":1000}"#,
            r#"{"numerator":1000,"denominator":1000}"#,
            r#"{"numerator":0,"denominator":0}"#,
        ] {
            let err = serde_json::from_str::<FeeRate>(bad).unwrap_err();
            assert!(err.to_string().contains("Invalid fee"), "{bad}: {err}");
        }
    }

    #[test]
    fn test_encoding_decodes_back() {
        let encoded = serde_json::to_string(&FeeRate::STANDARD).unwrap();
        assert_eq!(encoded, r#"{"numerator":3,"denominator":1000}"#);
        assert_eq!(serde_json::from_str::<FeeRate>(&encoded).unwrap(), FeeRate::STANDARD);
    }
}
