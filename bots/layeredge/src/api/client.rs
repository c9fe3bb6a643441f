use crate::api::types::{
    NodeActionResponse, NodeStatusResponse, SignedPayload, VerifyReferralResponse,
    WalletDetailsResponse,
};
use crate::api::NodeApi;
use crate::config::BotConfig;
use crate::proxy::build_client;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use core_logic::{with_retry, NetworkError, ProxyEndpoint, RetryConfig, WalletError};
use ethers::signers::{LocalWallet, Signer};
use ethers::utils::to_checksum;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::error;

/// Which of the two signed node actions is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeAction {
    Start,
    Stop,
}

impl NodeAction {
    /// Verb embedded in the signed message.
    pub fn verb(&self) -> &'static str {
        match self {
            NodeAction::Start => "activation",
            NodeAction::Stop => "deactivation",
        }
    }

    /// Trailing path segment of the node-action endpoint.
    pub fn path(&self) -> &'static str {
        match self {
            NodeAction::Start => "start",
            NodeAction::Stop => "stop",
        }
    }
}

/// Plaintext the wallet signs to authorize a node action. The remote side
/// recovers the signer from this exact string, so the address must be the
/// checksummed form and the timestamp the same epoch millis sent in the body.
pub fn action_message(address: &str, action: NodeAction, timestamp: i64) -> String {
    format!(
        "Node {} request for {} at {}",
        action.verb(),
        address,
        timestamp
    )
}

/// One wallet's view of the remote reward API.
///
/// Bound at construction to a signing key and an optional proxy; both stay
/// fixed for the client's lifetime. Proxy rotation only happens across
/// startup health checks, never per call.
pub struct LayerEdgeClient {
    http: Client,
    wallet: LocalWallet,
    address: String,
    base_url: String,
    ref_code: String,
    proxy: Option<ProxyEndpoint>,
    timeout: Duration,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl LayerEdgeClient {
    /// Builds a client for one wallet. With no private key a fresh random
    /// wallet is generated, which is how the registration flow mints wallets.
    pub fn new(
        cfg: &BotConfig,
        proxy: Option<ProxyEndpoint>,
        private_key: Option<&str>,
    ) -> Result<Self> {
        let wallet = match private_key {
            Some(key) => key
                .parse::<LocalWallet>()
                .map_err(|_| WalletError::InvalidKeyFormat)
                .context("Invalid private key in wallet record")?,
            None => LocalWallet::new(&mut rand::thread_rng()),
        };

        let address = to_checksum(&wallet.address(), None);
        let timeout = Duration::from_secs(cfg.request_timeout_secs);
        let http = build_client(proxy.as_ref(), timeout)?;

        Ok(Self {
            http,
            wallet,
            address,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            ref_code: cfg.ref_code.clone(),
            proxy,
            timeout,
            max_retries: cfg.max_retries,
            retry_delay_ms: cfg.retry_delay_ms,
        })
    }

    /// Checksummed address derived from the signing key.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Hex-encoded private key, exported when persisting a freshly generated
    /// wallet.
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.wallet.signer().to_bytes())
    }

    /// Executes one API call under the bounded flat-delay retry budget.
    /// Non-2xx statuses and undecodable bodies count as failed attempts.
    /// Exhaustion logs the final error (and the proxy, when one is attached)
    /// and surfaces the error; callers treat it as a soft failure.
    async fn request_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        method: Method,
        url: String,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let retry = RetryConfig::new(self.max_retries, self.retry_delay_ms);

        let result = with_retry(retry, operation, || {
            let url = url.clone();
            let body = body.clone();
            let method = method.clone();
            async move {
                let mut request = self.http.request(method, &url);
                if let Some(body) = &body {
                    request = request.json(body);
                }

                let response = request.send().await.map_err(|e| {
                    if e.is_timeout() {
                        anyhow::Error::from(NetworkError::Timeout {
                            timeout_ms: self.timeout.as_millis() as u64,
                            endpoint: url.clone(),
                        })
                    } else {
                        anyhow::Error::from(e).context(format!("Request to {} failed", url))
                    }
                })?;

                let status = response.status();
                if !status.is_success() {
                    return Err(NetworkError::HttpError {
                        status_code: status.as_u16(),
                        endpoint: url.clone(),
                    }
                    .into());
                }

                response
                    .json::<T>()
                    .await
                    .map_err(|e| {
                        NetworkError::InvalidResponse {
                            endpoint: url.clone(),
                            reason: e.to_string(),
                        }
                        .into()
                    })
            }
        })
        .await;

        match result {
            Ok(value) => Ok(value),
            Err(e) => {
                error!("Max retries reached - request failed: {:#}", e);
                if let Some(proxy) = &self.proxy {
                    error!("Failed proxy: {}", proxy);
                }
                Err(e)
            }
        }
    }

    /// Builds the signed body for a node start/stop call. The message binds
    /// the action, the checksummed address and a fresh epoch-millis
    /// timestamp; the signature is EIP-191 personal-message style.
    async fn signed_payload(&self, action: NodeAction) -> Result<SignedPayload> {
        let timestamp = Utc::now().timestamp_millis();
        let message = action_message(&self.address, action, timestamp);

        let signature = self
            .wallet
            .sign_message(message.as_bytes())
            .await
            .context("Failed to sign node-action message")?;

        Ok(SignedPayload {
            sign: format!("0x{}", signature),
            timestamp,
        })
    }

    /// Verifies the referral code. True only when the API answers with an
    /// exact `valid: true`.
    pub async fn check_invite(&self) -> Result<bool> {
        let url = format!("{}/api/referral/verify-referral-code", self.base_url);
        let body = json!({ "invite_code": self.ref_code });

        let response: VerifyReferralResponse = self
            .request_json("check_invite", Method::POST, url, Some(body))
            .await?;

        Ok(response.is_valid())
    }

    /// Registers this wallet under the referral code. Any decodable response
    /// body counts as success.
    pub async fn register_wallet(&self) -> Result<serde_json::Value> {
        let url = format!(
            "{}/api/referral/register-wallet/{}",
            self.base_url, self.ref_code
        );
        let body = json!({ "walletAddress": self.address });

        self.request_json("register_wallet", Method::POST, url, Some(body))
            .await
    }

    async fn node_action(&self, action: NodeAction) -> Result<NodeActionResponse> {
        let payload = self.signed_payload(action).await?;
        let url = format!(
            "{}/api/light-node/node-action/{}/{}",
            self.base_url,
            self.address,
            action.path()
        );

        self.request_json(
            "node_action",
            Method::POST,
            url,
            Some(serde_json::to_value(payload)?),
        )
        .await
    }
}

#[async_trait]
impl NodeApi for LayerEdgeClient {
    fn address(&self) -> &str {
        &self.address
    }

    async fn node_status(&self) -> Result<bool> {
        let url = format!(
            "{}/api/light-node/node-status/{}",
            self.base_url, self.address
        );

        let response: NodeStatusResponse = self
            .request_json("node_status", Method::GET, url, None)
            .await?;

        Ok(response.is_running())
    }

    async fn connect_node(&self) -> Result<bool> {
        let response = self.node_action(NodeAction::Start).await?;
        Ok(response.is_executed())
    }

    async fn stop_node(&self) -> Result<()> {
        // Looser predicate than start, on purpose: the upstream API's true
        // stop semantics are unknown, so any decodable body is accepted.
        let response = self.node_action(NodeAction::Stop).await?;
        if response.is_acknowledged() {
            Ok(())
        } else {
            Err(NetworkError::InvalidResponse {
                endpoint: "node_action/stop".to_string(),
                reason: "stop not acknowledged".to_string(),
            }
            .into())
        }
    }

    async fn node_points(&self) -> Result<u64> {
        let url = format!(
            "{}/api/referral/wallet-details/{}",
            self.base_url, self.address
        );

        let response: WalletDetailsResponse = self
            .request_json("node_points", Method::GET, url, None)
            .await?;

        Ok(response.points())
    }
}
