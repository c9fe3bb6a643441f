pub mod client;
pub mod types;

pub use client::{action_message, LayerEdgeClient, NodeAction};
pub use types::{SignedPayload, NODE_ACTION_SUCCESS};

use anyhow::Result;
use async_trait::async_trait;

/// The node operations one wallet cycle drives, abstracted so the session
/// controller can be exercised against a scripted fake.
#[async_trait]
pub trait NodeApi: Send + Sync {
    /// Checksummed wallet address the operations act on.
    fn address(&self) -> &str;

    /// True when the remote service reports the light node as running.
    async fn node_status(&self) -> Result<bool>;

    /// Stops the node; the remote service claims accrued points as a side
    /// effect.
    async fn stop_node(&self) -> Result<()>;

    /// Starts the node. `Ok(false)` means the API answered but did not
    /// confirm execution.
    async fn connect_node(&self) -> Result<bool>;

    /// Current accrued points for the wallet.
    async fn node_points(&self) -> Result<u64>;
}
