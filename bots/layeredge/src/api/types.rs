//! Wire types for the referral/light-node API.
//!
//! Responses are decoded leniently: every field is optional or defaulted, and
//! only the fields the bot actually inspects are declared. The success
//! predicates live here next to the shapes they interrogate.

use serde::{Deserialize, Serialize};

/// Exact message the node-action endpoint returns on a successful start.
pub const NODE_ACTION_SUCCESS: &str = "node action executed successfully";

/// Body of a signed node start/stop request.
#[derive(Debug, Clone, Serialize)]
pub struct SignedPayload {
    pub sign: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyReferralResponse {
    #[serde(default)]
    pub data: VerifyReferralData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyReferralData {
    #[serde(default)]
    pub valid: bool,
}

impl VerifyReferralResponse {
    /// Valid only when the nested flag is exactly `true`.
    pub fn is_valid(&self) -> bool {
        self.data.valid
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeActionResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl NodeActionResponse {
    /// Strict predicate used by node start: the message must match
    /// [`NODE_ACTION_SUCCESS`] byte for byte. Stop deliberately does not use
    /// this; any decodable body counts there (see the client).
    pub fn is_executed(&self) -> bool {
        self.message.as_deref() == Some(NODE_ACTION_SUCCESS)
    }

    /// Acceptance predicate for node stop: reaching any decodable body is
    /// enough, even one whose message signals a failure upstream. Kept as its
    /// own predicate so stop can never silently inherit the strict
    /// [`is_executed`](Self::is_executed) check.
    pub fn is_acknowledged(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeStatusResponse {
    #[serde(default)]
    pub data: NodeStatusData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeStatusData {
    #[serde(rename = "startTimestamp", default)]
    pub start_timestamp: Option<serde_json::Value>,
}

impl NodeStatusResponse {
    /// The node counts as running iff the start timestamp is present and
    /// non-null, whatever its type.
    pub fn is_running(&self) -> bool {
        matches!(&self.data.start_timestamp, Some(v) if !v.is_null())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletDetailsResponse {
    #[serde(default)]
    pub data: WalletDetailsData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletDetailsData {
    #[serde(rename = "nodePoints", default)]
    pub node_points: u64,
}

impl WalletDetailsResponse {
    pub fn points(&self) -> u64 {
        self.data.node_points
    }
}
