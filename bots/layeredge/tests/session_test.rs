use anyhow::Result;
use async_trait::async_trait;
use layeredge_bot::api::NodeApi;
use layeredge_bot::session::run_wallet_cycle;
use std::sync::Mutex;

/// Scripted stand-in for the remote API that records every call in order.
struct ScriptedApi {
    running: bool,
    status_fails: bool,
    stop_fails: bool,
    start_confirmed: bool,
    calls: Mutex<Vec<&'static str>>,
}

impl ScriptedApi {
    fn new(running: bool) -> Self {
        Self {
            running,
            status_fails: false,
            stop_fails: false,
            start_confirmed: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }
}

#[async_trait]
impl NodeApi for ScriptedApi {
    fn address(&self) -> &str {
        "0x00000000000000000000000000000000DeaDBeef"
    }

    async fn node_status(&self) -> Result<bool> {
        self.record("status");
        if self.status_fails {
            anyhow::bail!("status endpoint unreachable");
        }
        Ok(self.running)
    }

    async fn stop_node(&self) -> Result<()> {
        self.record("stop");
        if self.stop_fails {
            anyhow::bail!("stop endpoint unreachable");
        }
        Ok(())
    }

    async fn connect_node(&self) -> Result<bool> {
        self.record("start");
        Ok(self.start_confirmed)
    }

    async fn node_points(&self) -> Result<u64> {
        self.record("points");
        Ok(1337)
    }
}

#[tokio::test]
async fn test_not_running_skips_stop_and_starts_once() {
    let api = ScriptedApi::new(false);

    let report = run_wallet_cycle(&api).await;

    assert_eq!(api.calls(), vec!["status", "start", "points"]);
    assert_eq!(api.count("stop"), 0);
    assert!(!report.was_running);
    assert_eq!(report.points, Some(1337));
    assert!(report.all_succeeded());
}

#[tokio::test]
async fn test_running_stops_exactly_once_before_start() {
    let api = ScriptedApi::new(true);

    let report = run_wallet_cycle(&api).await;

    assert_eq!(api.calls(), vec!["status", "stop", "start", "points"]);
    assert!(report.was_running);
    assert!(report.all_succeeded());
}

#[tokio::test]
async fn test_stop_failure_does_not_abort_remaining_steps() {
    let mut api = ScriptedApi::new(true);
    api.stop_fails = true;

    let report = run_wallet_cycle(&api).await;

    // Stop still attempted exactly once, and start/points still run.
    assert_eq!(api.calls(), vec!["status", "stop", "start", "points"]);
    assert!(!report.all_succeeded());
    assert_eq!(report.points, Some(1337));

    let stop = report.steps.iter().find(|s| s.step == "stop").unwrap();
    assert!(!stop.success);
    assert!(stop.message.contains("stop endpoint unreachable"));
}

#[tokio::test]
async fn test_status_failure_treated_as_not_running() {
    let mut api = ScriptedApi::new(true);
    api.status_fails = true;

    let report = run_wallet_cycle(&api).await;

    // Unknown status means no stop attempt; the cycle still reconnects and
    // reports points.
    assert_eq!(api.calls(), vec!["status", "start", "points"]);
    assert!(!report.was_running);
    assert!(!report.all_succeeded());
}

#[tokio::test]
async fn test_unconfirmed_start_recorded_as_failed_step() {
    let mut api = ScriptedApi::new(false);
    api.start_confirmed = false;

    let report = run_wallet_cycle(&api).await;

    let start = report.steps.iter().find(|s| s.step == "start").unwrap();
    assert!(!start.success);
    // Points are still queried regardless of start's outcome.
    assert_eq!(api.count("points"), 1);
}
