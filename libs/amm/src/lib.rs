//! # Reservoir AMM Library - Exact Constant-Product Mathematics
//!
//! ## Purpose
//!
//! Pure mathematical core of the pool engine: exact unsigned integer
//! arithmetic, fee fractions, and constant-product quoting. Nothing in this
//! crate holds state or performs I/O, so every function can be called for
//! previews as often as needed and re-run at commit time with identical results.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Reserve snapshots from the pool engine, caller trade parameters
//! - **Output Destinations**: Swap executor, liquidity ledger, caller-side trade policy
//! - **Precision**: `u64` reserves and shares, `u128` intermediates, no floating point
//! - **Display Values**: Price impact and spot price as `Decimal`, never fed back into formulas
//!
//! ## Architecture Role
//!
//! ```text
//! Pool Snapshot → [Quote Engine] → Quote (preview)
//!                       ↓
//! Pool Record   → [Quote Engine] → Swap Executor / Liquidity Ledger (commit)
//! ```

pub mod constant_product;
pub mod error;
pub mod fee;
pub mod math;
pub mod pool_traits;

pub use constant_product::{ConstantProduct, Quote, SwapDirection, SwapQuote};
pub use error::{AmmError, Result};
pub use fee::FeeRate;
pub use pool_traits::{AmmPool, ReservePair};

/// Display types for price impact and spot price
pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;
