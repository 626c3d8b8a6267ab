//! Minimum fee admission stage
//!
//! - Bypass of infrastructure message types
//! - Combination of local and network price tables
//! - Evaluation of an offered fee against the combined table
//! - The decorator wiring these into a pipeline step

pub mod bypass;
pub mod combine;
pub mod decorator;
pub mod evaluate;
pub mod source;

pub use bypass::{is_bypassed, BypassSet, DEFAULT_BYPASS_MSG_TYPES};
pub use combine::combine;
pub use decorator::{check_admission, AdmissionDecorator, Admitted, PipelineStage, UnknownStage};
pub use evaluate::{evaluate, required_fees, Rejection, RequiredFee, RequiredFees};
pub use source::{LocalPriceSource, LocalPrices, NetworkPriceSource};
