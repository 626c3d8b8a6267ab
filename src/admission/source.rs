//! Where minimum gas prices come from
//!
//! The admission stage reads a fresh snapshot from each source on every
//! check. Sources may change between checks; a snapshot never changes
//! during one.

use crate::core::PriceTable;
use std::sync::{Arc, PoisonError, RwLock};

// =============================================================================
// Price Sources
// =============================================================================

/// Node-local minimum gas prices, set by the operator
pub trait LocalPriceSource {
    fn local_min_gas_prices(&self) -> PriceTable;
}

/// Network-wide minimum gas prices, set by governance
pub trait NetworkPriceSource {
    fn network_min_gas_prices(&self) -> PriceTable;
}

impl LocalPriceSource for PriceTable {
    fn local_min_gas_prices(&self) -> PriceTable {
        self.clone()
    }
}

impl NetworkPriceSource for PriceTable {
    fn network_min_gas_prices(&self) -> PriceTable {
        self.clone()
    }
}

impl<T: LocalPriceSource + ?Sized> LocalPriceSource for Arc<T> {
    fn local_min_gas_prices(&self) -> PriceTable {
        (**self).local_min_gas_prices()
    }
}

impl<T: NetworkPriceSource + ?Sized> NetworkPriceSource for Arc<T> {
    fn network_min_gas_prices(&self) -> PriceTable {
        (**self).network_min_gas_prices()
    }
}

// =============================================================================
// Local Prices
// =============================================================================

/// Operator prices that can be replaced at runtime.
///
/// Clones share the same underlying table.
#[derive(Debug, Clone, Default)]
pub struct LocalPrices {
    inner: Arc<RwLock<PriceTable>>,
}

impl LocalPrices {
    pub fn new(prices: PriceTable) -> Self {
        Self {
            inner: Arc::new(RwLock::new(prices)),
        }
    }

    /// Replace the table; later checks see the new prices
    pub fn set(&self, prices: PriceTable) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        log::info!("Local minimum gas prices set to [{}]", prices);
        *guard = prices;
    }

    pub fn get(&self) -> PriceTable {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LocalPriceSource for LocalPrices {
    fn local_min_gas_prices(&self) -> PriceTable {
        self.get()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_table_source() {
        let table = PriceTable::parse("0.002uatom").unwrap();
        assert_eq!(table.local_min_gas_prices(), table);
        assert_eq!(table.network_min_gas_prices(), table);
    }

    #[test]
    fn test_local_prices_shared_between_clones() {
        let prices = LocalPrices::default();
        let handle = prices.clone();
        assert!(prices.local_min_gas_prices().is_empty());

        let updated = PriceTable::parse("0.01stake").unwrap();
        handle.set(updated.clone());
        assert_eq!(prices.local_min_gas_prices(), updated);
    }

    #[test]
    fn test_snapshot_unaffected_by_later_set() {
        let prices = LocalPrices::new(PriceTable::parse("0.01stake").unwrap());
        let snapshot = prices.get();
        prices.set(PriceTable::new());
        assert_eq!(snapshot.len(), 1);
        assert!(prices.get().is_empty());
    }
}
