//! Perpetual multi-wallet loop.
//!
//! Bootstraps once (startup delay, proxy health check, wallet load), then
//! cycles over every wallet in list order forever, sleeping a rotating wait
//! between passes. Wallets are processed strictly sequentially to keep the
//! remote-side request ordering predictable and the rate-limit footprint low.

use crate::api::LayerEdgeClient;
use crate::config::BotConfig;
use crate::proxy::find_working_proxy;
use crate::session::run_wallet_cycle;
use anyhow::Result;
use core_logic::{ConfigError, ProxyManager, WalletManager};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

const STARTUP_DELAY: Duration = Duration::from_secs(3);

/// Rotating inter-cycle wait table, held as an explicit value instead of
/// hidden static state so the phase is inspectable and resettable.
///
/// `next_wait` pre-increments before indexing: a fresh scheduler over the
/// default `[25, 34, 90]` minute table yields 34, 90, 25, 34, ... with a
/// period of exactly three.
#[derive(Debug, Clone)]
pub struct WaitScheduler {
    waits: Vec<Duration>,
    index: usize,
}

impl WaitScheduler {
    pub fn new(minutes: &[u64]) -> Self {
        let minutes: &[u64] = if minutes.is_empty() {
            &[25, 34, 90]
        } else {
            minutes
        };

        Self {
            waits: minutes.iter().map(|m| Duration::from_secs(m * 60)).collect(),
            index: 0,
        }
    }

    pub fn next_wait(&mut self) -> Duration {
        self.index = (self.index + 1) % self.waits.len();
        self.waits[self.index]
    }
}

/// Runs the bot forever. Returns only on a configuration error; the cycle
/// itself has no terminal state short of process termination.
pub async fn run(cfg: BotConfig) -> Result<()> {
    sleep(STARTUP_DELAY).await;

    // One-time proxy selection; the winner stays attached to every client
    // for the life of the process. All proxy failures fall back to direct.
    let proxies = match ProxyManager::load_proxies(&cfg.proxies_file) {
        Ok(proxies) => proxies,
        Err(e) => {
            warn!("Error reading proxy file: {:#}. Continuing without proxy.", e);
            Vec::new()
        }
    };
    let proxy = find_working_proxy(&cfg, &proxies).await;

    let wallets = match WalletManager::load_wallets(&cfg.wallets_file) {
        Ok(wallets) => wallets,
        Err(e) => {
            error!("Failed to load wallet list: {:#}", e);
            error!(
                "Fix or remove {} (expected a JSON array of address/privateKey records), \
                 or recreate it with `layeredge-bot register`",
                cfg.wallets_file
            );
            return Ok(());
        }
    };

    if wallets.is_empty() {
        let err = ConfigError::NoWallets {
            hint: format!(
                "create wallets with `layeredge-bot register` or place them in {}",
                cfg.wallets_file
            ),
        };
        error!("Wallet configuration missing: {}", err);
        return Ok(());
    }

    info!("Wallet processing: {} wallets total", wallets.len());
    let mut waits = WaitScheduler::new(&cfg.wait_minutes);

    loop {
        for wallet in &wallets {
            let client = match LayerEdgeClient::new(
                &cfg,
                proxy.clone(),
                Some(wallet.private_key.as_str()),
            ) {
                Ok(client) => client,
                Err(e) => {
                    // One bad record never halts the fleet.
                    error!("[{}] Wallet processing failed: {:#}", wallet.address, e);
                    continue;
                }
            };

            match &proxy {
                Some(proxy) => info!(
                    "Processing wallet {} via proxy {}",
                    client.address(),
                    proxy
                ),
                None => info!("Processing wallet {}", client.address()),
            }

            let report = run_wallet_cycle(&client).await;
            if report.all_succeeded() {
                info!("[{}] Wallet processing complete", report.address);
            } else {
                warn!("[{}] Wallet processing finished with errors", report.address);
            }
        }

        let wait = waits.next_wait();
        info!(
            "Cycle complete - waiting {} minutes before next run",
            wait.as_secs() / 60
        );
        sleep(wait).await;
    }
}
