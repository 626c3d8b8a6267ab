//! Core data model
//!
//! This module contains the values the admission stage works on:
//! - Denominations, coins and fees
//! - Minimum gas price tables
//! - The fee-relevant view of a transaction

pub mod coin;
pub mod price;
pub mod transaction;

pub use coin::{validate_denom, Coin, CoinError, DecCoin, Denom, Fee, MAX_DENOM_LEN, MIN_DENOM_LEN};
pub use price::{PriceTable, PriceTableError, MAX_PRICE_DECIMALS, MAX_PRICE_EXPONENT};
pub use transaction::{MessageShape, TransactionError, Tx};
