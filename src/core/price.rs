//! Minimum gas price tables
//!
//! A `PriceTable` maps each denomination to the minimum amount of it that
//! must be paid per unit of gas. Tables are immutable once built and always
//! iterate in denomination order. An empty table means "no floor".

use crate::core::coin::{CoinError, DecCoin, Denom};
use bigdecimal::{BigDecimal, Signed};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Most decimal places a price may carry
pub const MAX_PRICE_DECIMALS: i64 = 18;

/// Largest power of ten a price may be written with
pub const MAX_PRICE_EXPONENT: i64 = 18;

/// Price table construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceTableError {
    #[error("Invalid price entry: {0}")]
    InvalidEntry(#[from] CoinError),
    #[error("Negative price for denomination {0}")]
    NegativePrice(Denom),
    #[error("Duplicate price for denomination {0}")]
    DuplicateDenom(Denom),
    #[error("Price for denomination {0} has more than 18 decimal places")]
    ExcessPrecision(Denom),
    #[error("Price for denomination {0} is out of range")]
    OutOfRange(Denom),
}

/// Sorted (denomination, price per gas) mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DecCoin>", into = "Vec<DecCoin>")]
pub struct PriceTable {
    prices: BTreeMap<Denom, BigDecimal>,
}

impl PriceTable {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from entries in any order.
    ///
    /// Rejects negative prices, repeated denominations and prices written with
    /// more than 18 decimal places or an exponent above 18. Zero prices are
    /// accepted and act as "no floor" for their denomination.
    pub fn try_from_entries(
        entries: impl IntoIterator<Item = DecCoin>,
    ) -> Result<Self, PriceTableError> {
        let mut prices = BTreeMap::new();
        for DecCoin { denom, amount } in entries {
            if amount.is_negative() {
                return Err(PriceTableError::NegativePrice(denom));
            }
            let (_, scale) = amount.as_bigint_and_exponent();
            if scale > MAX_PRICE_DECIMALS {
                return Err(PriceTableError::ExcessPrecision(denom));
            }
            if scale < -MAX_PRICE_EXPONENT {
                return Err(PriceTableError::OutOfRange(denom));
            }
            if prices.contains_key(&denom) {
                return Err(PriceTableError::DuplicateDenom(denom));
            }
            prices.insert(denom, amount);
        }
        Ok(Self { prices })
    }

    /// Parse the operator text form, e.g. `0.0025uatom,0.001stake`.
    /// An empty or blank string yields an empty table.
    pub fn parse(text: &str) -> Result<Self, PriceTableError> {
        let entries = text
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(DecCoin::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_from_entries(entries)
    }

    /// Wrap an already-validated map
    pub(crate) fn from_map(prices: BTreeMap<Denom, BigDecimal>) -> Self {
        Self { prices }
    }

    pub fn get(&self, denom: &Denom) -> Option<&BigDecimal> {
        self.prices.get(denom)
    }

    pub fn contains(&self, denom: &Denom) -> bool {
        self.prices.contains_key(denom)
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn denoms(&self) -> impl Iterator<Item = &Denom> {
        self.prices.keys()
    }

    /// Entries in denomination order
    pub fn iter(&self) -> impl Iterator<Item = (&Denom, &BigDecimal)> {
        self.prices.iter()
    }

    pub fn to_dec_coins(&self) -> Vec<DecCoin> {
        self.prices
            .iter()
            .map(|(denom, amount)| DecCoin::new(denom.clone(), amount.clone()))
            .collect()
    }
}

impl TryFrom<Vec<DecCoin>> for PriceTable {
    type Error = PriceTableError;

    fn try_from(entries: Vec<DecCoin>) -> Result<Self, Self::Error> {
        Self::try_from_entries(entries)
    }
}

impl From<PriceTable> for Vec<DecCoin> {
    fn from(table: PriceTable) -> Self {
        table.to_dec_coins()
    }
}

impl FromStr for PriceTable {
    type Err = PriceTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PriceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self.to_dec_coins().iter().map(DecCoin::to_string).collect();
        f.write_str(&entries.join(","))
    }
}

// =============================================================================
// Tests
// =============================================================================
