//! Node-local fee configuration and its on-disk storage
//!
//! The operator's minimum gas prices and bypass message list are kept as
//! JSON in the data directory.

use crate::admission::{BypassSet, DEFAULT_BYPASS_MSG_TYPES};
use crate::config::params::GlobalFeeParams;
use crate::core::{MessageShape, PriceTable, PriceTableError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default data directory
pub const DEFAULT_DATA_DIR: &str = ".globalfee_data";

/// Default config file name inside the data directory
pub const CONFIG_FILE: &str = "fee_config.json";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid minimum gas prices: {0}")]
    InvalidPrices(#[from] PriceTableError),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

fn default_bypass_msg_types() -> Vec<String> {
    DEFAULT_BYPASS_MSG_TYPES.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Node Config
// =============================================================================

/// Operator fee settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFeeConfig {
    /// Local minimum gas prices, e.g. `0.0025uatom,0.001stake`
    #[serde(default)]
    pub minimum_gas_prices: String,
    /// Message type URLs that skip the fee floor
    #[serde(default = "default_bypass_msg_types")]
    pub bypass_min_fee_msg_types: Vec<String>,
}

impl Default for NodeFeeConfig {
    fn default() -> Self {
        Self {
            minimum_gas_prices: String::new(),
            bypass_min_fee_msg_types: default_bypass_msg_types(),
        }
    }
}

impl NodeFeeConfig {
    /// Parsed local minimum gas prices
    pub fn local_prices(&self) -> Result<PriceTable, ConfigError> {
        Ok(PriceTable::parse(&self.minimum_gas_prices)?)
    }

    /// Bypass set built from the configured message types
    pub fn bypass_set(&self) -> BypassSet {
        self.bypass_min_fee_msg_types
            .iter()
            .map(|url| MessageShape::new(url.trim()))
            .collect()
    }

    /// Check everything that can be checked without a chain
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.local_prices()?;
        if let Some(blank) = self
            .bypass_min_fee_msg_types
            .iter()
            .find(|url| url.trim().is_empty())
        {
            return Err(ConfigError::InvalidData(format!(
                "Empty bypass message type {:?}",
                blank
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Config Store
// =============================================================================

/// Reads and writes fee configuration files
pub struct ConfigStore {
    data_dir: PathBuf,
}

impl ConfigStore {
    /// Create a store, creating the data directory if needed
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    /// Check if a saved config exists
    pub fn exists(&self) -> bool {
        self.config_path().exists()
    }

    /// Save the node config
    pub fn save(&self, config: &NodeFeeConfig) -> Result<(), ConfigError> {
        config.validate()?;

        // Write to temporary file first
        let temp_path = self.data_dir.join(format!("{}.tmp", CONFIG_FILE));
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, config)?;

        // Atomic rename
        fs::rename(&temp_path, self.config_path())?;
        Ok(())
    }

    /// Load the node config, or the default one if none was saved
    pub fn load(&self) -> Result<NodeFeeConfig, ConfigError> {
        if !self.exists() {
            log::debug!("No fee config in {:?}, using defaults", self.data_dir);
            return Ok(NodeFeeConfig::default());
        }

        let config: NodeFeeConfig = read_json(&self.config_path())?;
        config.validate()?;
        Ok(config)
    }

    /// Load governance params from a JSON file
    pub fn load_params(&self, path: &Path) -> Result<GlobalFeeParams, ConfigError> {
        read_json(path)
    }
}

/// Read a JSON document from `path`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::InvalidData(format!(
            "File not found: {}",
            path.display()
        )));
    }
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = NodeFeeConfig::default();
        assert!(config.local_prices().unwrap().is_empty());
        assert_eq!(config.bypass_set(), BypassSet::default_relay());
    }

    #[test]
    fn test_missing_bypass_list_uses_default() {
        let config: NodeFeeConfig =
            serde_json::from_str(r#"{"minimum_gas_prices":"0.0025uatom"}"#).unwrap();
        assert_eq!(config.bypass_set(), BypassSet::default_relay());

        let none: NodeFeeConfig =
            serde_json::from_str(r#"{"bypass_min_fee_msg_types":[]}"#).unwrap();
        assert!(none.bypass_set().is_empty());
    }

    #[test]
    fn test_invalid_prices_rejected() {
        let config = NodeFeeConfig {
            minimum_gas_prices: "0.1uatom,0.2uatom".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPrices(_))));
    }

    #[test]
    fn test_blank_bypass_type_rejected() {
        let config = NodeFeeConfig {
            bypass_min_fee_msg_types: vec![" ".to_string()],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidData(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("data")).unwrap();
        assert!(!store.exists());
        assert_eq!(store.load().unwrap(), NodeFeeConfig::default());

        let config = NodeFeeConfig {
            minimum_gas_prices: "0.002uatom,0.002stake".to_string(),
            bypass_min_fee_msg_types: vec!["/ibc.core.channel.v1.MsgRecvPacket".to_string()],
        };
        store.save(&config).unwrap();

        assert!(store.exists());
        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn test_load_params_file() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path()).unwrap();
        let path = dir.path().join("params.json");
        fs::write(
            &path,
            r#"{"minimum_gas_prices":[{"denom":"photon","amount":"0.004"}]}"#,
        )
        .unwrap();

        let params = store.load_params(&path).unwrap();
        assert_eq!(params.minimum_gas_prices.len(), 1);

        let missing = store.load_params(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(ConfigError::InvalidData(_))));
    }
}
