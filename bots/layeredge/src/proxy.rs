use crate::config::BotConfig;
use anyhow::{Context, Result};
use core_logic::ProxyEndpoint;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Builds an HTTP client with the per-request timeout and, when given, the
/// proxy transport attached. The proxy scheme was already validated at parse
/// time, so `Proxy::all` only fails on genuinely broken URLs.
pub fn build_client(proxy: Option<&ProxyEndpoint>, timeout: Duration) -> Result<Client> {
    let mut builder = Client::builder().timeout(timeout);

    if let Some(endpoint) = proxy {
        let proxy = reqwest::Proxy::all(&endpoint.url)
            .with_context(|| format!("Invalid proxy URL: {}", endpoint.url))?;
        builder = builder.proxy(proxy);
    }

    builder.build().context("Failed to build HTTP client")
}

async fn probe_endpoint(cfg: &BotConfig, endpoint: ProxyEndpoint) -> bool {
    let timeout = Duration::from_secs(cfg.proxy_test_timeout_secs);
    let client = match build_client(Some(&endpoint), timeout) {
        Ok(client) => client,
        Err(_) => return false,
    };

    match client.get(&cfg.proxy_test_url).send().await {
        Ok(response) => response.status() == reqwest::StatusCode::OK,
        Err(_) => false,
    }
}

/// Probes candidates in list order against the configured IP-echo endpoint
/// and returns the first one answering 200. Fail-open: no candidates or no
/// survivors means "run without proxy".
pub async fn find_working_proxy(
    cfg: &BotConfig,
    candidates: &[ProxyEndpoint],
) -> Option<ProxyEndpoint> {
    find_working_proxy_with(candidates, |endpoint| probe_endpoint(cfg, endpoint)).await
}

/// Selection logic with the probe injected, so ordering and short-circuit
/// behavior are testable without a network.
pub async fn find_working_proxy_with<F, Fut>(
    candidates: &[ProxyEndpoint],
    mut probe: F,
) -> Option<ProxyEndpoint>
where
    F: FnMut(ProxyEndpoint) -> Fut,
    Fut: Future<Output = bool>,
{
    if candidates.is_empty() {
        info!("No proxies configured. Running without proxy.");
        return None;
    }

    info!("Proxy testing: {} candidates...", candidates.len());

    for endpoint in candidates {
        info!("Testing proxy {}", endpoint);
        if probe(endpoint.clone()).await {
            info!(
                "Found working proxy: {} ({} transport)",
                endpoint,
                endpoint.kind.as_str()
            );
            return Some(endpoint.clone());
        }
    }

    warn!("No working proxy found. Running without proxy.");
    None
}
