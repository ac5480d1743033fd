//! Error taxonomy shared by quoting, swapping and share accounting

use thiserror::Error;

/// Deterministic failures of the pool math.
///
/// Every variant is a pure function of the inputs and the pool state; none of
/// them is transient, so callers must not retry the same request blindly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    #[error("Amount must be positive")]
    ZeroAmount,

    #[error("Insufficient reserves to fill the request")]
    InsufficientReserves,

    #[error("Swap produced zero output")]
    InsufficientOutputAmount,

    #[error("Slippage exceeded: minimum {minimum}, actual {actual}")]
    SlippageExceeded { minimum: u64, actual: u64 },

    #[error("Deposit would mint zero shares")]
    InsufficientLiquidityMinted,

    #[error("Insufficient shares: requested {requested}, held {held}")]
    InsufficientShares { requested: u64, held: u64 },

    #[error("Invalid fee rate {numerator}/{denominator}")]
    InvalidFee { numerator: u32, denominator: u32 },

    #[error("Invalid slippage tolerance: {0} bps")]
    InvalidSlippage(u32),

    #[error("Arithmetic overflow: {0}")]
    Overflow(&'static str),

    #[error("Invariant violated: {0}")]
    InvariantViolation(&'static str),
}

pub type Result<T> = std::result::Result<T, AmmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slippage_message_carries_bounds() {
        let err = AmmError::SlippageExceeded {
            minimum: 90,
            actual: 88,
        };
        assert_eq!(err.to_string(), "Slippage exceeded: minimum 90, actual 88");
    }
}
