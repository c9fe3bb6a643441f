//! Per-wallet cycle controller.
//!
//! One cycle runs a fixed four-step sequence: query status, stop the node if
//! it is running, start it unconditionally, then report points. Every step is
//! best-effort; a failure is recorded and the remaining steps still run, so a
//! flaky endpoint never strands a wallet mid-cycle.

use crate::api::NodeApi;
use tracing::{info, warn};

/// Outcome of one controller step, success or failure with its reason.
/// Steps that were not reached do not appear in the report at all, which
/// keeps "failed" and "not attempted" distinguishable.
#[derive(Debug, Clone)]
pub struct StepResult {
    pub step: &'static str,
    pub success: bool,
    pub message: String,
}

impl StepResult {
    fn ok(step: &'static str, message: impl Into<String>) -> Self {
        Self {
            step,
            success: true,
            message: message.into(),
        }
    }

    fn failed(step: &'static str, message: impl Into<String>) -> Self {
        Self {
            step,
            success: false,
            message: message.into(),
        }
    }
}

/// Everything one wallet pass produced.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub address: String,
    pub was_running: bool,
    pub points: Option<u64>,
    pub steps: Vec<StepResult>,
}

impl CycleReport {
    /// A pass counts as clean when every attempted step succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.steps.iter().all(|s| s.success)
    }
}

/// Drives one full cycle for one wallet.
pub async fn run_wallet_cycle(api: &dyn NodeApi) -> CycleReport {
    let address = api.address().to_string();
    let mut steps = Vec::new();

    info!("[{}] Checking node status", address);
    let was_running = match api.node_status().await {
        Ok(running) => {
            steps.push(StepResult::ok(
                "status",
                if running { "running" } else { "not running" },
            ));
            running
        }
        Err(e) => {
            // Unknown status is treated as "not running": starting an
            // already-running node is harmless, skipping a stop only defers
            // the claim to the next cycle.
            warn!("[{}] Status check failed: {:#}", address, e);
            steps.push(StepResult::failed("status", format!("{:#}", e)));
            false
        }
    };

    if was_running {
        info!("[{}] Node running, stopping to claim points", address);
        match api.stop_node().await {
            Ok(()) => steps.push(StepResult::ok("stop", "stopped, points claimed")),
            Err(e) => {
                warn!("[{}] Failed to stop node: {:#}", address, e);
                steps.push(StepResult::failed("stop", format!("{:#}", e)));
            }
        }
    }

    info!("[{}] Reconnecting node", address);
    match api.connect_node().await {
        Ok(true) => steps.push(StepResult::ok("start", "node connected")),
        Ok(false) => {
            warn!("[{}] Node start not confirmed by API", address);
            steps.push(StepResult::failed("start", "start not confirmed"));
        }
        Err(e) => {
            warn!("[{}] Failed to connect node: {:#}", address, e);
            steps.push(StepResult::failed("start", format!("{:#}", e)));
        }
    }

    info!("[{}] Checking node points", address);
    let points = match api.node_points().await {
        Ok(points) => {
            info!("[{}] Total points: {}", address, points);
            steps.push(StepResult::ok("points", points.to_string()));
            Some(points)
        }
        Err(e) => {
            warn!("[{}] Failed to check points: {:#}", address, e);
            steps.push(StepResult::failed("points", format!("{:#}", e)));
            None
        }
    };

    CycleReport {
        address,
        was_running,
        points,
        steps,
    }
}
