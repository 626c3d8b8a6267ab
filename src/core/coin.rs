//! Denominations and coins
//!
//! Text forms follow the usual chain conventions:
//! - `Coin`: integer amount followed by a denomination (`800uatom`)
//! - `DecCoin`: decimal amount followed by a denomination (`0.0025uatom`)

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Minimum length of a denomination
pub const MIN_DENOM_LEN: usize = 3;

/// Maximum length of a denomination
pub const MAX_DENOM_LEN: usize = 128;

// =============================================================================
// Error Types
// =============================================================================

/// Coin and denomination errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoinError {
    #[error("Invalid denomination: {0:?}")]
    InvalidDenom(String),
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),
    #[error("Duplicate denomination: {0}")]
    DuplicateDenom(String),
    #[error("Malformed coin expression: {0:?}")]
    Malformed(String),
}

// =============================================================================
// Denomination
// =============================================================================

/// Identifier of a unit of value. Ordered lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Denom(String);

impl Denom {
    /// Create a validated denomination
    pub fn new(denom: impl Into<String>) -> Result<Self, CoinError> {
        let denom = denom.into();
        validate_denom(&denom)?;
        Ok(Self(denom))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Check a denomination: a letter followed by 2..=127 characters from
/// `[a-zA-Z0-9/:._-]`.
pub fn validate_denom(denom: &str) -> Result<(), CoinError> {
    let len = denom.chars().count();
    let mut chars = denom.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || "/:._-".contains(c));

    if !(MIN_DENOM_LEN..=MAX_DENOM_LEN).contains(&len) || !starts_with_letter || !rest_ok {
        return Err(CoinError::InvalidDenom(denom.to_string()));
    }
    Ok(())
}

impl TryFrom<String> for Denom {
    type Error = CoinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Denom> for String {
    fn from(denom: Denom) -> Self {
        denom.0
    }
}

impl FromStr for Denom {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Denom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split `<amount><denom>` at the first letter
fn split_coin_expr(expr: &str) -> Result<(&str, &str), CoinError> {
    let expr = expr.trim();
    let idx = expr
        .find(|c: char| c.is_ascii_alphabetic())
        .ok_or_else(|| CoinError::Malformed(expr.to_string()))?;
    let (amount, denom) = expr.split_at(idx);
    if amount.is_empty() {
        return Err(CoinError::Malformed(expr.to_string()));
    }
    Ok((amount.trim(), denom))
}

// =============================================================================
// Coin
// =============================================================================

/// An integer amount of one denomination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: Denom,
    pub amount: u128,
}

impl Coin {
    pub fn new(denom: Denom, amount: u128) -> Self {
        Self { denom, amount }
    }
}

impl FromStr for Coin {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (amount, denom) = split_coin_expr(s)?;
        if !amount.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoinError::InvalidAmount(amount.to_string()));
        }
        let amount = amount
            .parse::<u128>()
            .map_err(|_| CoinError::InvalidAmount(amount.to_string()))?;
        Ok(Self::new(Denom::new(denom)?, amount))
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

// =============================================================================
// Decimal Coin
// =============================================================================

/// A decimal amount of one denomination, used for per-gas prices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecCoin {
    pub denom: Denom,
    pub amount: BigDecimal,
}

impl DecCoin {
    pub fn new(denom: Denom, amount: BigDecimal) -> Self {
        Self { denom, amount }
    }
}

impl FromStr for DecCoin {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (amount, denom) = split_coin_expr(s)?;
        let denom = Denom::new(denom)?;

        // digits with at most one decimal point, no sign or exponent
        let well_formed = amount.bytes().all(|b| b.is_ascii_digit() || b == b'.')
            && amount.bytes().filter(|b| *b == b'.').count() <= 1
            && amount.bytes().any(|b| b.is_ascii_digit());
        if !well_formed {
            return Err(CoinError::InvalidAmount(amount.to_string()));
        }

        let amount = BigDecimal::from_str(amount)
            .map_err(|_| CoinError::InvalidAmount(amount.to_string()))?;
        Ok(Self::new(denom, amount))
    }
}

impl fmt::Display for DecCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

// =============================================================================
// Fee
// =============================================================================

/// Coins offered by a transaction as its fee, at most one amount per
/// denomination. A denomination that is absent has amount zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coin>", into = "Vec<Coin>")]
pub struct Fee {
    amounts: BTreeMap<Denom, u128>,
}

impl Fee {
    /// An empty fee
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fee from coins, rejecting repeated denominations
    pub fn try_from_coins(coins: impl IntoIterator<Item = Coin>) -> Result<Self, CoinError> {
        let mut amounts = BTreeMap::new();
        for coin in coins {
            if amounts.insert(coin.denom.clone(), coin.amount).is_some() {
                return Err(CoinError::DuplicateDenom(coin.denom.to_string()));
            }
        }
        Ok(Self { amounts })
    }

    /// Parse a comma-separated coin list, e.g. `800uatom,10stake`
    pub fn parse(text: &str) -> Result<Self, CoinError> {
        let coins = text
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(Coin::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_from_coins(coins)
    }

    /// Amount offered in `denom`, zero when absent
    pub fn amount_of(&self, denom: &Denom) -> u128 {
        self.amounts.get(denom).copied().unwrap_or(0)
    }

    pub fn contains_denom(&self, denom: &Denom) -> bool {
        self.amounts.contains_key(denom)
    }

    pub fn denoms(&self) -> impl Iterator<Item = &Denom> {
        self.amounts.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    /// Coins in denomination order
    pub fn coins(&self) -> Vec<Coin> {
        self.amounts
            .iter()
            .map(|(denom, amount)| Coin::new(denom.clone(), *amount))
            .collect()
    }
}

impl TryFrom<Vec<Coin>> for Fee {
    type Error = CoinError;

    fn try_from(coins: Vec<Coin>) -> Result<Self, Self::Error> {
        Self::try_from_coins(coins)
    }
}

impl From<Fee> for Vec<Coin> {
    fn from(fee: Fee) -> Self {
        fee.coins()
    }
}

impl fmt::Display for Fee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coins: Vec<String> = self.coins().iter().map(Coin::to_string).collect();
        f.write_str(&coins.join(","))
    }
}

// =============================================================================
// Tests
// =============================================================================
