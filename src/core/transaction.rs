//! Fee-relevant view of a transaction
//!
//! Decoding and signature checks happen upstream. What reaches the fee
//! stage is the list of message type tags, the offered fee and the
//! declared gas limit.

use crate::core::coin::Fee;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

/// Structural transaction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Transaction has no messages")]
    NoMessages,
    #[error("Gas limit must be positive")]
    ZeroGasLimit,
}

// =============================================================================
// Message Shape
// =============================================================================

/// Type identity of a message, e.g. `/ibc.core.channel.v1.MsgRecvPacket`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageShape(String);

impl MessageShape {
    pub fn new(type_url: impl Into<String>) -> Self {
        Self(type_url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MessageShape {
    fn from(type_url: &str) -> Self {
        Self::new(type_url)
    }
}

impl fmt::Display for MessageShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A decoded transaction as seen by the fee admission stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tx {
    /// Message type tags, in transaction order
    pub messages: Vec<MessageShape>,
    /// Offered fee
    #[serde(default)]
    pub fee: Fee,
    /// Declared gas limit
    pub gas_limit: u64,
}

impl Tx {
    pub fn new(messages: Vec<MessageShape>, fee: Fee, gas_limit: u64) -> Self {
        Self {
            messages,
            fee,
            gas_limit,
        }
    }

    /// Hex SHA-256 of the JSON encoding, for log correlation
    pub fn id(&self) -> String {
        serde_json::to_vec(self)
            .map(|bytes| hex::encode(Sha256::digest(bytes)))
            .unwrap_or_default()
    }

    /// Structural checks the fee stage relies on
    pub fn validate_basic(&self) -> Result<(), TransactionError> {
        if self.messages.is_empty() {
            return Err(TransactionError::NoMessages);
        }
        if self.gas_limit == 0 {
            return Err(TransactionError::ZeroGasLimit);
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tx() -> Tx {
        Tx::new(
            vec![MessageShape::from("/cosmos.bank.v1beta1.MsgSend")],
            Fee::parse("800uatom").unwrap(),
            100_000,
        )
    }

    #[test]
    fn test_tx_id_is_stable() {
        let tx = sample_tx();
        assert_eq!(tx.id(), tx.clone().id());
        assert_eq!(tx.id().len(), 64);

        let mut other = sample_tx();
        other.gas_limit += 1;
        assert_ne!(tx.id(), other.id());
    }

    #[test]
    fn test_validate_basic() {
        assert!(sample_tx().validate_basic().is_ok());

        let mut empty = sample_tx();
        empty.messages.clear();
        assert_eq!(empty.validate_basic(), Err(TransactionError::NoMessages));

        let mut no_gas = sample_tx();
        no_gas.gas_limit = 0;
        assert_eq!(no_gas.validate_basic(), Err(TransactionError::ZeroGasLimit));
    }

    #[test]
    fn test_tx_json() {
        let json = r#"{
            "messages": ["/ibc.core.channel.v1.MsgRecvPacket"],
            "gas_limit": 200000
        }"#;
        let tx: Tx = serde_json::from_str(json).unwrap();
        assert!(tx.fee.is_empty());
        assert_eq!(tx.messages[0].as_str(), "/ibc.core.channel.v1.MsgRecvPacket");
    }
}
