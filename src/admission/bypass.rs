//! Fee-floor bypass for infrastructure messages
//!
//! A transaction made up entirely of allow-listed message types (relayer
//! traffic such as IBC packet receipts) skips the minimum fee check.
//! Membership is decided by message type alone.

use crate::core::MessageShape;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// Bypass Set
// =============================================================================

/// IBC relayer message types exempted by default
pub const DEFAULT_BYPASS_MSG_TYPES: [&str; 5] = [
    "/ibc.core.channel.v1.MsgRecvPacket",
    "/ibc.core.channel.v1.MsgAcknowledgement",
    "/ibc.core.client.v1.MsgUpdateClient",
    "/ibc.core.channel.v1.MsgTimeout",
    "/ibc.core.channel.v1.MsgTimeoutOnClose",
];

/// Set of message types exempted from the fee floor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BypassSet(BTreeSet<MessageShape>);

impl BypassSet {
    /// An empty set: nothing bypasses the floor
    pub fn new() -> Self {
        Self::default()
    }

    /// The IBC relayer messages in [`DEFAULT_BYPASS_MSG_TYPES`]
    pub fn default_relay() -> Self {
        DEFAULT_BYPASS_MSG_TYPES.into_iter().map(MessageShape::from).collect()
    }

    pub fn contains(&self, shape: &MessageShape) -> bool {
        self.0.contains(shape)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageShape> {
        self.0.iter()
    }

    /// True iff every message is in the set
    pub fn covers(&self, messages: &[MessageShape]) -> bool {
        is_bypassed(messages, self)
    }
}

impl FromIterator<MessageShape> for BypassSet {
    fn from_iter<I: IntoIterator<Item = MessageShape>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// True iff every message has a type in `bypass`.
///
/// Callers pass non-empty message lists; decoding rejects empty transactions.
pub fn is_bypassed(messages: &[MessageShape], bypass: &BypassSet) -> bool {
    messages.iter().all(|shape| bypass.contains(shape))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const MSG_SEND: &str = "/cosmos.bank.v1beta1.MsgSend";
    const RECV_PACKET: &str = "/ibc.core.channel.v1.MsgRecvPacket";
    const UPDATE_CLIENT: &str = "/ibc.core.client.v1.MsgUpdateClient";

    fn shapes(urls: &[&str]) -> Vec<MessageShape> {
        urls.iter().map(|u| MessageShape::from(*u)).collect()
    }

    #[test]
    fn test_all_bypass_messages() {
        let bypass = BypassSet::default_relay();
        assert!(is_bypassed(&shapes(&[RECV_PACKET]), &bypass));
        assert!(is_bypassed(&shapes(&[UPDATE_CLIENT, RECV_PACKET]), &bypass));
    }

    #[test]
    fn test_mixed_messages_not_bypassed() {
        let bypass = BypassSet::default_relay();
        assert!(!is_bypassed(&shapes(&[UPDATE_CLIENT, MSG_SEND]), &bypass));
        assert!(!is_bypassed(&shapes(&[MSG_SEND]), &bypass));
    }

    #[test]
    fn test_empty_set_bypasses_nothing() {
        let bypass = BypassSet::new();
        assert!(!bypass.covers(&shapes(&[RECV_PACKET])));
    }

    #[test]
    fn test_default_relay_set() {
        let bypass = BypassSet::default_relay();
        assert_eq!(bypass.len(), DEFAULT_BYPASS_MSG_TYPES.len());
        assert!(bypass.contains(&MessageShape::from("/ibc.core.channel.v1.MsgTimeoutOnClose")));
    }

    #[test]
    fn test_custom_set() {
        let bypass: BypassSet = shapes(&[MSG_SEND]).into_iter().collect();
        assert!(bypass.covers(&shapes(&[MSG_SEND, MSG_SEND])));
        assert!(!bypass.covers(&shapes(&[RECV_PACKET])));
    }
}
