//! Referral onboarding: verify the invite code, mint fresh wallets, register
//! them under the code and persist them to the wallet store.

use crate::api::LayerEdgeClient;
use crate::config::BotConfig;
use crate::proxy::find_working_proxy;
use anyhow::Result;
use core_logic::{ProxyManager, WalletManager, WalletRecord};
use tracing::{error, info, warn};

pub async fn run(cfg: BotConfig, count: u32) -> Result<()> {
    let proxies = match ProxyManager::load_proxies(&cfg.proxies_file) {
        Ok(proxies) => proxies,
        Err(e) => {
            warn!("Error reading proxy file: {:#}. Continuing without proxy.", e);
            Vec::new()
        }
    };
    let proxy = find_working_proxy(&cfg, &proxies).await;

    // Validate the code once before minting anything.
    let probe = LayerEdgeClient::new(&cfg, proxy.clone(), None)?;
    match probe.check_invite().await {
        Ok(true) => info!("Invite code valid: {}", cfg.ref_code),
        Ok(false) => {
            error!("Invite code rejected: {}", cfg.ref_code);
            return Ok(());
        }
        Err(e) => {
            error!("Failed to check invite code: {:#}", e);
            return Ok(());
        }
    }

    let mut registered = 0u32;
    for i in 1..=count {
        // Every registration gets its own freshly generated wallet.
        let client = LayerEdgeClient::new(&cfg, proxy.clone(), None)?;

        match client.register_wallet().await {
            Ok(_) => {
                WalletManager::append_wallet(
                    &cfg.wallets_file,
                    WalletRecord {
                        address: client.address().to_string(),
                        private_key: client.private_key_hex(),
                    },
                )?;
                registered += 1;
                info!(
                    "[{}/{}] Wallet {} registered and saved",
                    i,
                    count,
                    client.address()
                );
            }
            Err(e) => {
                error!("[{}/{}] Failed to register wallet: {:#}", i, count, e);
            }
        }
    }

    info!("Registration done: {}/{} wallets saved", registered, count);
    Ok(())
}
