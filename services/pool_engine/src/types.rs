//! Strongly-typed identifiers for assets, accounts and pools

use crate::error::{PoolError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 20-byte asset identifier (token contract address)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub [u8; 20]);

/// 20-byte account identifier of a share holder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 20]);

/// Engine-assigned pool identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PoolId(pub u64);

fn parse_address(s: &str) -> std::result::Result<[u8; 20], hex::FromHexError> {
    let mut bytes = [0u8; 20];
    hex::decode_to_slice(s.trim_start_matches("0x"), &mut bytes)?;
    Ok(bytes)
}

impl FromStr for AssetId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_address(s).map(AssetId)
    }
}

impl FromStr for AccountId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_address(s).map(AccountId)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool#{}", self.0)
    }
}

/// Unordered asset pair.
///
/// `(x, y)` and `(y, x)` build the same value, so a pair can key pools
/// regardless of the orientation a caller names them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetPair {
    low: AssetId,
    high: AssetId,
}

impl AssetPair {
    pub fn new(x: AssetId, y: AssetId) -> Result<Self> {
        if x == y {
            return Err(PoolError::IdenticalAssets(x));
        }
        let (low, high) = if x < y { (x, y) } else { (y, x) };
        Ok(Self { low, high })
    }

    pub fn assets(&self) -> (AssetId, AssetId) {
        (self.low, self.high)
    }

    pub fn contains(&self, asset: AssetId) -> bool {
        self.low == asset || self.high == asset
    }
}
