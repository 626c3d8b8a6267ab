//! Governance-controlled fee parameters
//!
//! The network-wide minimum gas prices live in on-chain parameter storage.
//! `ParamStore` holds the value committed at the latest height and hands
//! out snapshots to the admission stage.

use crate::admission::NetworkPriceSource;
use crate::core::{DecCoin, PriceTable, PriceTableError};
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock};
use thiserror::Error;

// =============================================================================
// Parameters
// =============================================================================

/// Parameter errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("Invalid minimum gas prices: {0}")]
    InvalidMinimumGasPrices(#[from] PriceTableError),
    #[error("Stale parameters: height {0} is older than committed height {1}")]
    StaleHeight(u64, u64),
}

/// Global fee module parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalFeeParams {
    /// Network minimum gas prices; empty means no network floor
    #[serde(default)]
    pub minimum_gas_prices: PriceTable,
}

impl GlobalFeeParams {
    pub fn new(minimum_gas_prices: PriceTable) -> Self {
        Self { minimum_gas_prices }
    }

    /// Build params from raw price entries, e.g. a governance proposal
    pub fn from_dec_coins(entries: Vec<DecCoin>) -> Result<Self, ParamsError> {
        Ok(Self::new(PriceTable::try_from_entries(entries)?))
    }

    /// Re-check the prices entry by entry
    pub fn validate(&self) -> Result<(), ParamsError> {
        let entries: Vec<DecCoin> = self.minimum_gas_prices.to_dec_coins();
        PriceTable::try_from_entries(entries)?;
        Ok(())
    }
}

// =============================================================================
// Param Store
// =============================================================================

#[derive(Debug, Default)]
struct Committed {
    height: u64,
    params: GlobalFeeParams,
}

/// Latest committed global fee parameters
#[derive(Debug, Default)]
pub struct ParamStore {
    committed: RwLock<Committed>,
}

impl ParamStore {
    pub fn new(height: u64, params: GlobalFeeParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self {
            committed: RwLock::new(Committed { height, params }),
        })
    }

    /// Replace the parameters as of `height`.
    ///
    /// Heights must not go backwards; re-committing at the same height is
    /// allowed.
    pub fn commit(&self, height: u64, params: GlobalFeeParams) -> Result<(), ParamsError> {
        params.validate()?;
        let mut committed = self.committed.write().unwrap_or_else(PoisonError::into_inner);
        if height < committed.height {
            return Err(ParamsError::StaleHeight(height, committed.height));
        }

        log::info!(
            "Global fee params committed at height {}: [{}]",
            height,
            params.minimum_gas_prices
        );
        *committed = Committed { height, params };
        Ok(())
    }

    pub fn height(&self) -> u64 {
        self.committed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .height
    }

    pub fn params(&self) -> GlobalFeeParams {
        self.committed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .params
            .clone()
    }
}

impl NetworkPriceSource for ParamStore {
    fn network_min_gas_prices(&self) -> PriceTable {
        self.params().minimum_gas_prices
    }
}

// =============================================================================
// Tests
// =============================================================================
