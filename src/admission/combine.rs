//! Combining local and network minimum gas prices
//!
//! The network table, when set, fixes which denominations are accepted at
//! all. The local table can only raise the price of those denominations.
//! Local-only denominations are dropped while the network table is
//! non-empty; this is the intended policy, not an oversight.

use crate::core::PriceTable;
use bigdecimal::{BigDecimal, Zero};
use std::collections::BTreeMap;

/// Effective price table for one check.
///
/// - `network` empty: `local` unchanged
/// - otherwise: the denominations of `network`, each priced at
///   `max(network[d], local[d] or 0)`
pub fn combine(local: &PriceTable, network: &PriceTable) -> PriceTable {
    if network.is_empty() {
        return local.clone();
    }

    let zero = BigDecimal::zero();
    let prices: BTreeMap<_, _> = network
        .iter()
        .map(|(denom, network_price)| {
            let local_price = local.get(denom).unwrap_or(&zero);
            let price = if local_price > network_price {
                local_price
            } else {
                network_price
            };
            (denom.clone(), price.clone())
        })
        .collect();

    PriceTable::from_map(prices)
}

// =============================================================================
// Tests
// =============================================================================
