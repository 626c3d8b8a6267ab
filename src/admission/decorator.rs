//! Fee admission decorator
//!
//! Ties together the bypass rule, the price combiner and the fee evaluator
//! for one pipeline step:
//! 1. only the speculative (mempool) stage enforces a floor
//! 2. transactions made only of bypass messages are let through
//! 3. everything else must pay the combined minimum in some accepted denom

use crate::admission::bypass::{is_bypassed, BypassSet};
use crate::admission::combine::combine;
use crate::admission::evaluate::{evaluate, Rejection};
use crate::admission::source::{LocalPriceSource, NetworkPriceSource};
use crate::core::{PriceTable, Tx};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Pipeline Stage
// =============================================================================

/// Point in the transaction pipeline at which a check runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    /// Mempool admission and gossip, before inclusion
    Speculative,
    /// Execution of an included transaction
    Final,
    /// Gas estimation dry run
    Simulation,
}

impl PipelineStage {
    /// Only the speculative stage enforces the fee floor
    pub fn enforces_fee_floor(&self) -> bool {
        matches!(self, Self::Speculative)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown pipeline stage: {0:?} (expected speculative, final or simulation)")]
pub struct UnknownStage(String);

impl FromStr for PipelineStage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "speculative" | "check" => Ok(Self::Speculative),
            "final" | "deliver" => Ok(Self::Final),
            "simulation" | "simulate" => Ok(Self::Simulation),
            _ => Err(UnknownStage(s.to_string())),
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Speculative => "speculative",
            Self::Final => "final",
            Self::Simulation => "simulation",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Admission
// =============================================================================

/// Reason a transaction was admitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admitted {
    /// The stage does not enforce a fee floor
    StageExempt,
    /// Every message is in the bypass set
    Bypassed,
    /// The fee met the effective floor, or there was none
    FeeAccepted,
}

/// Admission decision for one transaction against explicit snapshots
pub fn check_admission(
    tx: &Tx,
    stage: PipelineStage,
    local: &PriceTable,
    network: &PriceTable,
    bypass: &BypassSet,
) -> Result<Admitted, Rejection> {
    if !stage.enforces_fee_floor() {
        return Ok(Admitted::StageExempt);
    }
    if is_bypassed(&tx.messages, bypass) {
        return Ok(Admitted::Bypassed);
    }

    let effective = combine(local, network);
    evaluate(&tx.fee, tx.gas_limit, &effective)?;
    Ok(Admitted::FeeAccepted)
}

// =============================================================================
// Decorator
// =============================================================================

/// Minimum fee stage of the validation pipeline.
///
/// Holds the bypass set fixed at construction and reads both price sources
/// afresh on every call. Holds no mutable state of its own and can be
/// shared between threads when its sources can.
#[derive(Debug, Clone)]
pub struct AdmissionDecorator<L, N> {
    bypass: BypassSet,
    local: L,
    network: N,
}

impl<L, N> AdmissionDecorator<L, N>
where
    L: LocalPriceSource,
    N: NetworkPriceSource,
{
    pub fn new(bypass: BypassSet, local: L, network: N) -> Self {
        Self {
            bypass,
            local,
            network,
        }
    }

    pub fn bypass_set(&self) -> &BypassSet {
        &self.bypass
    }

    /// Combined table that a check made now would enforce
    pub fn effective_prices(&self) -> PriceTable {
        combine(
            &self.local.local_min_gas_prices(),
            &self.network.network_min_gas_prices(),
        )
    }

    /// Run the fee admission check for `tx` at `stage`
    pub fn check(&self, tx: &Tx, stage: PipelineStage) -> Result<Admitted, Rejection> {
        let local = self.local.local_min_gas_prices();
        let network = self.network.network_min_gas_prices();

        match check_admission(tx, stage, &local, &network, &self.bypass) {
            Ok(admitted) => {
                log::debug!("Admitted tx {} at {} stage: {:?}", tx.id(), stage, admitted);
                Ok(admitted)
            }
            Err(rejection) => {
                log::info!("Rejected tx {}: {}", tx.id(), rejection);
                Err(rejection)
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
