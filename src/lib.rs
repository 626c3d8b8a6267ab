//! Global Fee: minimum-fee admission control for a transaction pipeline
//!
//! This crate decides whether a transaction's fee is high enough to enter
//! the mempool, featuring:
//! - Multi-denomination minimum gas price tables
//! - Combination of node-local and governance (network) prices, where the
//!   network set decides which denominations are accepted and local prices
//!   can only raise them
//! - Pay-in-any-one-accepted-denomination fee checks
//! - Fee-floor bypass for relayer message types (IBC packets, client updates)
//! - Floor enforced only at the speculative (mempool) stage
//!
//! # Example
//!
//! ```rust
//! use globalfee::admission::{AdmissionDecorator, BypassSet, PipelineStage};
//! use globalfee::core::{Fee, MessageShape, PriceTable, Tx};
//!
//! let local = PriceTable::parse("0.002uatom,0.002stake").unwrap();
//! let network = PriceTable::parse("0.004uatom").unwrap();
//! let decorator = AdmissionDecorator::new(BypassSet::default_relay(), local, network);
//!
//! let tx = Tx::new(
//!     vec![MessageShape::from("/cosmos.bank.v1beta1.MsgSend")],
//!     Fee::parse("800uatom").unwrap(),
//!     200_000,
//! );
//! assert!(decorator.check(&tx, PipelineStage::Speculative).is_ok());
//!
//! let cheap = Tx::new(tx.messages.clone(), Fee::parse("500uatom").unwrap(), 200_000);
//! let rejection = decorator.check(&cheap, PipelineStage::Speculative).unwrap_err();
//! println!("{}", rejection); // insufficient fees; got: 500uatom required: 800uatom
//! ```

pub mod admission;
pub mod cli;
pub mod config;
pub mod core;

// Re-export commonly used types
pub use admission::{
    check_admission, combine, evaluate, AdmissionDecorator, Admitted, BypassSet,
    LocalPriceSource, LocalPrices, NetworkPriceSource, PipelineStage, Rejection, RequiredFees,
};
pub use config::{ConfigStore, GlobalFeeParams, NodeFeeConfig, ParamStore};
pub use core::{Coin, DecCoin, Denom, Fee, MessageShape, PriceTable, Tx};
