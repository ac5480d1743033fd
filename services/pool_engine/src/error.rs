//! Engine-level errors

use crate::types::{AssetId, PoolId};
use amm::AmmError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error(transparent)]
    Amm(#[from] AmmError),

    #[error("Pool not found: {0}")]
    PoolNotFound(PoolId),

    #[error("Pool assets must differ, got {0} twice")]
    IdenticalAssets(AssetId),

    #[error("A pool for this pair and fee tier is already registered: {existing}")]
    DuplicatePool { existing: PoolId },

    #[error("Trade rejected by policy: {reason}")]
    PolicyRejected { reason: String },

    #[error("Sequence gap detected: expected {expected}, actual {actual}")]
    SequenceGap { expected: u64, actual: u64 },
}

pub type Result<T> = std::result::Result<T, PoolError>;

impl PoolError {
    /// The underlying math error, if this is one
    pub fn as_amm(&self) -> Option<&AmmError> {
        match self {
            PoolError::Amm(err) => Some(err),
            _ => None,
        }
    }
}
