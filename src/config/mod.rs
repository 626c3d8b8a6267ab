//! Fee policy configuration
//!
//! - Node-local settings (minimum gas prices, bypass message types)
//! - Governance parameters (network minimum gas prices)

pub mod node;
pub mod params;

pub use node::{read_json, ConfigError, ConfigStore, NodeFeeConfig, CONFIG_FILE, DEFAULT_DATA_DIR};
pub use params::{GlobalFeeParams, ParamStore, ParamsError};
